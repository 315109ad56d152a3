use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::controller::{
    Controller, ControllerError, FetchMode, ModalKind, NoticeLevel, SnippetsLoaded,
};
use crate::gate::DeleteGate;
use crate::model::{CodeSnippet, language_label};
use crate::remote::RestClient;
use crate::repo::SnippetStore;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use super::form::{ProjectForm, SnippetForm};
use super::modal;

mod event_loop;
mod render;

/// Stores the TUI can drive: fetches run on worker threads that own a clone.
pub(super) trait TuiStore: SnippetStore + Clone + Send + 'static {}

impl<S: SnippetStore + Clone + Send + 'static> TuiStore for S {}

pub(super) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }
    let client = RestClient::new(opts.remote).context("create store client")?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::new(client);
    let res = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Focus {
    Projects,
    Snippets,
}

#[derive(Debug)]
pub(in crate::tui_shell) enum Modal {
    AddProject(ProjectForm),
    EditProject(ProjectForm),
    AddSnippet(SnippetForm),
    DeleteProject(DeleteGate),
}

impl Modal {
    pub(in crate::tui_shell) fn kind(&self) -> ModalKind {
        match self {
            Modal::AddProject(_) => ModalKind::AddProject,
            Modal::EditProject(_) => ModalKind::EditProject,
            Modal::AddSnippet(_) => ModalKind::AddSnippet,
            Modal::DeleteProject(_) => ModalKind::DeleteProject,
        }
    }
}

pub(in crate::tui_shell) struct App<S> {
    pub(in crate::tui_shell) controller: Controller<S>,
    pub(in crate::tui_shell) focus: Focus,
    pub(in crate::tui_shell) snippet_cursor: usize,
    pub(in crate::tui_shell) modal: Option<Modal>,

    // Finished snippet loads from worker threads.
    loaded_tx: Sender<SnippetsLoaded>,
    loaded_rx: Receiver<SnippetsLoaded>,

    pub(in crate::tui_shell) quit: bool,
}

impl<S: TuiStore> App<S> {
    pub(in crate::tui_shell) fn new(store: S) -> Self {
        let (loaded_tx, loaded_rx) = mpsc::channel();
        Self {
            controller: Controller::new(store).with_fetch_mode(FetchMode::Deferred),
            focus: Focus::Projects,
            snippet_cursor: 0,
            modal: None,
            loaded_tx,
            loaded_rx,
            quit: false,
        }
    }

    /// Initial project load.
    pub(in crate::tui_shell) fn start(&mut self) {
        let res = self.controller.load_projects();
        self.finish("load projects", res);
    }

    /// Hand the queued snippet load, if any, to a worker thread.
    fn dispatch_fetch(&mut self) {
        let Some(ticket) = self.controller.take_fetch() else {
            return;
        };
        let store = self.controller.store().clone();
        let tx = self.loaded_tx.clone();
        tracing::debug!(project = %ticket.project_id, generation = ticket.generation, "fetching snippets");
        std::thread::spawn(move || {
            // The receiver is gone only when the app has exited.
            tx.send(ticket.run(&store)).ok();
        });
    }

    /// Apply every snippet load that has finished since the last tick.
    pub(in crate::tui_shell) fn drain_fetches(&mut self) {
        while let Ok(loaded) = self.loaded_rx.try_recv() {
            if self.controller.apply_snippets(loaded) {
                self.clamp_cursor();
            }
        }
    }

    /// Block until the outstanding snippet load lands.
    #[cfg(test)]
    pub(in crate::tui_shell) fn settle(&mut self) {
        while self.controller.is_fetching_snippets() {
            match self.loaded_rx.recv_timeout(Duration::from_secs(5)) {
                Ok(loaded) => {
                    self.controller.apply_snippets(loaded);
                }
                Err(_) => break,
            }
        }
        self.clamp_cursor();
    }

    fn finish(&mut self, action: &str, res: Result<(), ControllerError>) {
        if let Err(err) = res {
            // Store failures are already logged and queued as notices.
            tracing::debug!(error = %err, "{} did not complete", action);
        }
        self.sync_modal();
        self.clamp_cursor();
        self.dispatch_fetch();
    }

    fn clamp_cursor(&mut self) {
        let n = self.controller.snippets().len();
        self.snippet_cursor = self.snippet_cursor.min(n.saturating_sub(1));
    }

    /// Drop a dialog the controller has closed, e.g. when its project vanished.
    fn sync_modal(&mut self) {
        if let Some(m) = &self.modal
            && !self.controller.state().modals.is_open(m.kind())
        {
            self.modal = None;
        }
    }

    pub(in crate::tui_shell) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Projects => Focus::Snippets,
            Focus::Snippets => Focus::Projects,
        };
    }

    pub(in crate::tui_shell) fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            Focus::Projects => {
                let projects = self.controller.projects();
                if projects.is_empty() {
                    return;
                }
                let current = self
                    .controller
                    .selected()
                    .and_then(|s| projects.iter().position(|p| p.id == s.id))
                    .unwrap_or(0);
                let next = current
                    .saturating_add_signed(delta)
                    .min(projects.len() - 1);
                if next == current && self.controller.selected().is_some() {
                    return;
                }
                let id = projects[next].id.clone();
                self.controller.select_project(&id);
                self.snippet_cursor = 0;
                self.finish("select project", Ok(()));
            }
            Focus::Snippets => {
                let n = self.controller.snippets().len();
                if n == 0 {
                    return;
                }
                self.snippet_cursor = self
                    .snippet_cursor
                    .saturating_add_signed(delta)
                    .min(n - 1);
            }
        }
    }

    pub(in crate::tui_shell) fn highlighted_snippet(&self) -> Option<&CodeSnippet> {
        self.controller.snippets().get(self.snippet_cursor)
    }

    pub(in crate::tui_shell) fn open(&mut self, kind: ModalKind) {
        if !self.controller.open_modal(kind) {
            self.controller
                .notices_mut()
                .push(NoticeLevel::Info, "Select a project first".to_string());
            return;
        }
        let modal = match kind {
            ModalKind::AddProject => Modal::AddProject(ProjectForm::new()),
            ModalKind::EditProject => match self.controller.selected() {
                Some(p) => Modal::EditProject(ProjectForm::editing(p)),
                None => return,
            },
            ModalKind::AddSnippet => Modal::AddSnippet(SnippetForm::new()),
            ModalKind::DeleteProject => Modal::DeleteProject(DeleteGate::new()),
        };
        self.modal = Some(modal);
    }

    pub(in crate::tui_shell) fn close_modal(&mut self) {
        if let Some(m) = self.modal.take() {
            self.controller.close_modal(m.kind());
        }
    }

    /// Submitted dialogs close whether or not the store call worked; a
    /// failure shows up as a notice.
    pub(in crate::tui_shell) fn submit_project(&mut self, edit: bool, name: &str, description: &str) {
        self.close_modal();
        let res = if edit {
            self.controller.edit_project(name, description)
        } else {
            self.controller.add_project(name, description)
        };
        if !edit {
            self.snippet_cursor = 0;
        }
        self.finish(if edit { "edit project" } else { "add project" }, res);
    }

    pub(in crate::tui_shell) fn submit_snippet(&mut self, title: &str, code: &str, language: &str) {
        self.close_modal();
        let res = self.controller.add_snippet(title, code, language);
        if res.is_ok() {
            self.snippet_cursor = 0;
        }
        self.finish("add snippet", res);
    }

    pub(in crate::tui_shell) fn confirm_delete(&mut self) {
        let res = self.controller.delete_project();
        self.close_modal();
        self.snippet_cursor = 0;
        self.finish("delete project", res);
    }

    pub(in crate::tui_shell) fn delete_highlighted_snippet(&mut self) {
        let Some(id) = self.highlighted_snippet().map(|s| s.id.clone()) else {
            return;
        };
        let res = self.controller.delete_snippet(&id);
        self.finish("delete snippet", res);
    }

    pub(in crate::tui_shell) fn reload(&mut self) {
        let res = self.controller.reload();
        self.finish("reload", res);
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
