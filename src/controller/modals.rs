#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    AddProject,
    AddSnippet,
    EditProject,
    DeleteProject,
}

impl ModalKind {
    /// Dialogs that act on the selected project.
    pub fn needs_selection(self) -> bool {
        !matches!(self, ModalKind::AddProject)
    }
}

/// Independent visibility flags for the four dialogs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModalFlags {
    pub add_project: bool,
    pub add_snippet: bool,
    pub edit_project: bool,
    pub delete_project: bool,
}

impl ModalFlags {
    fn slot(&mut self, kind: ModalKind) -> &mut bool {
        match kind {
            ModalKind::AddProject => &mut self.add_project,
            ModalKind::AddSnippet => &mut self.add_snippet,
            ModalKind::EditProject => &mut self.edit_project,
            ModalKind::DeleteProject => &mut self.delete_project,
        }
    }

    pub fn set(&mut self, kind: ModalKind, open: bool) {
        *self.slot(kind) = open;
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        match kind {
            ModalKind::AddProject => self.add_project,
            ModalKind::AddSnippet => self.add_snippet,
            ModalKind::EditProject => self.edit_project,
            ModalKind::DeleteProject => self.delete_project,
        }
    }

    pub fn any_open(&self) -> bool {
        self.add_project || self.add_snippet || self.edit_project || self.delete_project
    }

    /// Dialogs tied to the selection close when it goes away.
    pub fn close_selection_dependent(&mut self) {
        self.add_snippet = false;
        self.edit_project = false;
        self.delete_project = false;
    }
}
