//! Typed access to the `projects` and `code_snippets` tables.

use crate::model::{CodeSnippet, NewProject, NewSnippet, Project, ProjectId, ProjectPatch, SnippetId};
use crate::remote::{RestClient, Select, StoreError};

pub mod memory;
pub use self::memory::MemoryStore;

pub const PROJECTS: &str = "projects";
pub const CODE_SNIPPETS: &str = "code_snippets";

/// Entity-level operations the controller needs from a row store.
///
/// Lists come back newest first. Deleting a project removes its snippets.
pub trait SnippetStore {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError>;
    fn list_snippets(&self, project_id: &ProjectId) -> Result<Vec<CodeSnippet>, StoreError>;

    fn insert_project(&self, row: &NewProject) -> Result<Project, StoreError>;
    fn update_project(&self, id: &ProjectId, patch: &ProjectPatch) -> Result<(), StoreError>;
    fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError>;

    fn insert_snippet(&self, row: &NewSnippet) -> Result<CodeSnippet, StoreError>;
    fn delete_snippet(&self, id: &SnippetId) -> Result<(), StoreError>;
}

impl SnippetStore for RestClient {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.select(PROJECTS, &Select::all().newest_first())
    }

    fn list_snippets(&self, project_id: &ProjectId) -> Result<Vec<CodeSnippet>, StoreError> {
        self.select(
            CODE_SNIPPETS,
            &Select::all()
                .eq("project_id", project_id.as_str())
                .newest_first(),
        )
    }

    fn insert_project(&self, row: &NewProject) -> Result<Project, StoreError> {
        self.insert(PROJECTS, row)
    }

    fn update_project(&self, id: &ProjectId, patch: &ProjectPatch) -> Result<(), StoreError> {
        self.update(PROJECTS, id.as_str(), patch)
    }

    fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError> {
        self.delete(PROJECTS, id.as_str())
    }

    fn insert_snippet(&self, row: &NewSnippet) -> Result<CodeSnippet, StoreError> {
        self.insert(CODE_SNIPPETS, row)
    }

    fn delete_snippet(&self, id: &SnippetId) -> Result<(), StoreError> {
        self.delete(CODE_SNIPPETS, id.as_str())
    }
}
