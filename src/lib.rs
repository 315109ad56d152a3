pub mod controller;
pub mod gate;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod settings;
pub mod tui;

mod tui_shell;
