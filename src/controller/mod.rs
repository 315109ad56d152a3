//! Owner of the project/snippet state and the store round trips that change it.
//!
//! Local state only changes after the store has answered. A failed call is
//! logged, recorded as an error [`Notice`], and leaves state as it was.

use crate::model::{
    CodeSnippet, DEFAULT_LANGUAGE, NewProject, NewSnippet, Project, ProjectId, ProjectPatch,
    SnippetId,
};
use crate::remote::StoreError;
use crate::repo::SnippetStore;

mod error;
pub use self::error::ControllerError;
use self::error::required;

mod fetch;
pub use self::fetch::{FetchMode, SnippetFetch, SnippetsLoaded};

mod modals;
pub use self::modals::{ModalFlags, ModalKind};

mod notice;
pub use self::notice::{Notice, NoticeLevel, Notices};

#[derive(Debug)]
pub struct AppState {
    pub projects: Vec<Project>,
    pub selected: Option<Project>,
    pub snippets: Vec<CodeSnippet>,
    pub modals: ModalFlags,

    // True until the first project load finishes, successful or not.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            selected: None,
            snippets: Vec::new(),
            modals: ModalFlags::default(),
            loading: true,
        }
    }
}

pub struct Controller<S> {
    store: S,
    state: AppState,
    mode: FetchMode,
    generation: u64,
    in_flight: Option<SnippetFetch>,
    outbox: Option<SnippetFetch>,
    notices: Notices,
}

impl<S: SnippetStore> Controller<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: AppState::default(),
            mode: FetchMode::Inline,
            generation: 0,
            in_flight: None,
            outbox: None,
            notices: Notices::default(),
        }
    }

    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub fn selected(&self) -> Option<&Project> {
        self.state.selected.as_ref()
    }

    pub fn snippets(&self) -> &[CodeSnippet] {
        &self.state.snippets
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// A snippet load for the current selection has not landed yet.
    pub fn is_fetching_snippets(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    fn selected_id(&self) -> Option<ProjectId> {
        self.state.selected.as_ref().map(|p| p.id.clone())
    }

    pub fn load_projects(&mut self) -> Result<(), ControllerError> {
        let result = self.store.list_projects();
        self.state.loading = false;
        let rows = result.map_err(|err| self.report("load projects", err))?;
        tracing::info!(count = rows.len(), "loaded projects");
        self.state.projects = rows;

        match self.selected_id() {
            None => {
                let first = self.state.projects.first().cloned();
                if first.is_some() {
                    self.change_selection(first);
                }
            }
            Some(id) => {
                let fresh = self.state.projects.iter().find(|p| p.id == id).cloned();
                match fresh {
                    Some(fresh) => self.state.selected = Some(fresh),
                    None => {
                        // Removed by someone else since we selected it.
                        let first = self.state.projects.first().cloned();
                        self.change_selection(first);
                    }
                }
            }
        }
        Ok(())
    }

    /// Reload snippets for `project_id` if it is the selected project.
    pub fn load_snippets(&mut self, project_id: &ProjectId) {
        if self.state.selected.as_ref().map(|p| &p.id) != Some(project_id) {
            tracing::debug!(project = %project_id, "not selected; skipping snippet load");
            return;
        }
        self.request_snippets(project_id.clone());
    }

    /// Reload projects, then the selected project's snippets.
    pub fn reload(&mut self) -> Result<(), ControllerError> {
        let before = self.generation;
        self.load_projects()?;
        if self.generation == before
            && let Some(id) = self.selected_id()
        {
            self.request_snippets(id);
        }
        Ok(())
    }

    /// Select a project from the loaded list. Unknown ids are ignored.
    pub fn select_project(&mut self, id: &ProjectId) -> bool {
        let Some(project) = self.state.projects.iter().find(|p| &p.id == id).cloned() else {
            tracing::debug!(project = %id, "select: unknown project");
            return false;
        };
        self.change_selection(Some(project));
        true
    }

    /// Like [`Controller::select_project`], but keeps an existing selection of
    /// `id` without fetching its snippets again.
    pub fn ensure_selected(&mut self, id: &ProjectId) -> bool {
        if self.selected_id().as_ref() == Some(id) {
            return true;
        }
        self.select_project(id)
    }

    pub fn add_project(&mut self, name: &str, description: &str) -> Result<(), ControllerError> {
        let name = required("name", name).inspect_err(|e| tracing::warn!("add project: {}", e))?;
        let row = NewProject {
            name,
            description: description.trim().to_string(),
        };
        let project = self
            .store
            .insert_project(&row)
            .map_err(|err| self.report("create project", err))?;

        tracing::info!(project = %project.id, name = %project.name, "created project");
        self.notify(format!("Created project \"{}\"", project.name));
        self.state.projects.insert(0, project.clone());
        self.change_selection(Some(project));
        Ok(())
    }

    pub fn edit_project(&mut self, name: &str, description: &str) -> Result<(), ControllerError> {
        let Some(current) = self.state.selected.clone() else {
            tracing::debug!("edit project: nothing selected");
            return Ok(());
        };
        let name = required("name", name).inspect_err(|e| tracing::warn!("edit project: {}", e))?;
        let patch = ProjectPatch {
            name,
            description: description.trim().to_string(),
        };
        self.store
            .update_project(&current.id, &patch)
            .map_err(|err| self.report("update project", err))?;

        tracing::info!(project = %current.id, "updated project");
        let updated = Project {
            name: patch.name,
            description: Some(patch.description),
            ..current
        };
        if let Some(slot) = self.state.projects.iter_mut().find(|p| p.id == updated.id) {
            *slot = updated.clone();
        }
        self.notify(format!("Saved project \"{}\"", updated.name));
        self.state.selected = Some(updated);
        Ok(())
    }

    /// Delete the selected project. Its snippets go with it on the store side.
    pub fn delete_project(&mut self) -> Result<(), ControllerError> {
        let Some(current) = self.state.selected.clone() else {
            tracing::debug!("delete project: nothing selected");
            return Ok(());
        };
        self.store
            .delete_project(&current.id)
            .map_err(|err| self.report("delete project", err))?;

        tracing::info!(project = %current.id, "deleted project");
        self.notify(format!("Deleted project \"{}\"", current.name));
        self.state.projects.retain(|p| p.id != current.id);
        self.state.modals.set(ModalKind::DeleteProject, false);
        let next = self.state.projects.first().cloned();
        self.change_selection(next);
        Ok(())
    }

    pub fn add_snippet(
        &mut self,
        title: &str,
        code: &str,
        language: &str,
    ) -> Result<(), ControllerError> {
        let Some(project_id) = self.selected_id() else {
            tracing::debug!("add snippet: nothing selected");
            return Ok(());
        };
        let title =
            required("title", title).inspect_err(|e| tracing::warn!("add snippet: {}", e))?;
        let code = required("code", code).inspect_err(|e| tracing::warn!("add snippet: {}", e))?;
        let language = match language.trim() {
            "" => DEFAULT_LANGUAGE.to_string(),
            l => l.to_string(),
        };
        let row = NewSnippet {
            project_id,
            title,
            code,
            language,
        };
        let snippet = self
            .store
            .insert_snippet(&row)
            .map_err(|err| self.report("add snippet", err))?;

        tracing::info!(snippet = %snippet.id, project = %snippet.project_id, "added snippet");
        self.notify(format!("Added snippet \"{}\"", snippet.title));
        self.state.snippets.insert(0, snippet);
        self.supersede_pending_fetch();
        Ok(())
    }

    pub fn delete_snippet(&mut self, id: &SnippetId) -> Result<(), ControllerError> {
        self.store
            .delete_snippet(id)
            .map_err(|err| self.report("delete snippet", err))?;

        tracing::info!(snippet = %id, "deleted snippet");
        self.state.snippets.retain(|s| &s.id != id);
        self.notify("Deleted snippet".to_string());
        self.supersede_pending_fetch();
        Ok(())
    }

    /// Open a dialog. Selection-bound dialogs stay shut without a selection.
    pub fn open_modal(&mut self, kind: ModalKind) -> bool {
        if kind.needs_selection() && self.state.selected.is_none() {
            return false;
        }
        self.state.modals.set(kind, true);
        true
    }

    pub fn close_modal(&mut self, kind: ModalKind) {
        self.state.modals.set(kind, false);
    }

    /// Pending fetch queued in [`FetchMode::Deferred`], if any.
    pub fn take_fetch(&mut self) -> Option<SnippetFetch> {
        self.outbox.take()
    }

    /// Apply a finished snippet load. Returns false when the result was
    /// discarded because a newer selection or load superseded it.
    pub fn apply_snippets(&mut self, loaded: SnippetsLoaded) -> bool {
        let SnippetsLoaded { ticket, result } = loaded;
        let latest = self.in_flight.as_ref() == Some(&ticket)
            && self.state.selected.as_ref().map(|p| &p.id) == Some(&ticket.project_id);
        if !latest {
            tracing::debug!(
                project = %ticket.project_id,
                generation = ticket.generation,
                "discarding stale snippet response"
            );
            return false;
        }

        self.in_flight = None;
        match result {
            Ok(rows) => {
                tracing::debug!(project = %ticket.project_id, count = rows.len(), "loaded snippets");
                self.state.snippets = rows;
            }
            Err(err) => {
                self.report("load snippets", err);
            }
        }
        true
    }

    fn change_selection(&mut self, next: Option<Project>) {
        let same = matches!(
            (&self.state.selected, &next),
            (Some(a), Some(b)) if a.id == b.id
        );
        self.state.selected = next;
        if !same {
            self.state.snippets.clear();
        }

        match self.selected_id() {
            Some(id) => self.request_snippets(id),
            None => {
                self.in_flight = None;
                self.outbox = None;
                self.state.modals.close_selection_dependent();
            }
        }
    }

    fn request_snippets(&mut self, project_id: ProjectId) {
        self.generation += 1;
        let ticket = SnippetFetch {
            generation: self.generation,
            project_id,
        };
        self.in_flight = Some(ticket.clone());
        match self.mode {
            FetchMode::Inline => {
                let loaded = ticket.run(&self.store);
                self.apply_snippets(loaded);
            }
            FetchMode::Deferred => self.outbox = Some(ticket),
        }
    }

    // A load issued before a snippet mutation may not reflect it; reissue so
    // that load's ticket is no longer the latest.
    fn supersede_pending_fetch(&mut self) {
        if self.in_flight.is_none() {
            return;
        }
        if let Some(id) = self.selected_id() {
            tracing::debug!(project = %id, "snippets changed during load; refetching");
            self.request_snippets(id);
        }
    }

    fn notify(&mut self, message: String) {
        self.notices.push(NoticeLevel::Info, message);
    }

    fn report(&mut self, action: &str, err: StoreError) -> ControllerError {
        tracing::error!(error = %err, "{} failed", action);
        self.notices
            .push(NoticeLevel::Error, format!("Could not {}: {}", action, err));
        ControllerError::Store(err)
    }
}

#[cfg(test)]
#[path = "../tests/controller/controller_tests.rs"]
mod tests;
