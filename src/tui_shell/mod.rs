use anyhow::Result;

mod app;

mod form;
mod input;
mod modal;

// Core TUI types for submodules via `super::...`.
use app::{App, Modal, TuiStore};

pub fn run_with_options(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
