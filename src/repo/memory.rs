//! In-process `SnippetStore` with call recording and failure injection.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use reqwest::StatusCode;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    ListProjects,
    ListSnippets,
    InsertProject,
    UpdateProject,
    DeleteProject,
    InsertSnippet,
    DeleteSnippet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    ListProjects,
    ListSnippets(ProjectId),
    InsertProject(String),
    UpdateProject(ProjectId),
    DeleteProject(ProjectId),
    InsertSnippet(ProjectId),
    DeleteSnippet(SnippetId),
}

#[derive(Debug, Default)]
struct Tables {
    // Newest first.
    projects: Vec<Project>,
    snippets: Vec<CodeSnippet>,
    seq: u64,
    calls: Vec<Call>,
    failing: HashSet<Op>,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn stamp(&self) -> String {
        let at = OffsetDateTime::UNIX_EPOCH + time::Duration::seconds(self.seq as i64);
        at.format(&Rfc3339).unwrap_or_else(|_| self.seq.to_string())
    }
}

/// Cheap to clone; clones share the same tables.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every subsequent `op` fail until [`MemoryStore::heal`].
    pub fn fail(&self, op: Op) {
        self.lock().failing.insert(op);
    }

    pub fn heal(&self, op: Op) {
        self.lock().failing.remove(&op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn projects(&self) -> Vec<Project> {
        self.lock().projects.clone()
    }

    pub fn snippets(&self) -> Vec<CodeSnippet> {
        self.lock().snippets.clone()
    }

    fn begin(&self, op: Op, call: Call) -> Result<MutexGuard<'_, Tables>, StoreError> {
        let mut t = self.lock();
        t.calls.push(call);
        if t.failing.contains(&op) {
            return Err(StoreError::api(
                &format!("{:?}", op),
                StatusCode::SERVICE_UNAVAILABLE,
                None,
                "injected failure",
            ));
        }
        Ok(t)
    }
}

impl SnippetStore for MemoryStore {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let t = self.begin(Op::ListProjects, Call::ListProjects)?;
        Ok(t.projects.clone())
    }

    fn list_snippets(&self, project_id: &ProjectId) -> Result<Vec<CodeSnippet>, StoreError> {
        let t = self.begin(Op::ListSnippets, Call::ListSnippets(project_id.clone()))?;
        Ok(t.snippets
            .iter()
            .filter(|s| &s.project_id == project_id)
            .cloned()
            .collect())
    }

    fn insert_project(&self, row: &NewProject) -> Result<Project, StoreError> {
        let mut t = self.begin(Op::InsertProject, Call::InsertProject(row.name.clone()))?;
        let seq = t.next_seq();
        let now = t.stamp();
        let project = Project {
            id: ProjectId(format!("p-{}", seq)),
            name: row.name.clone(),
            description: Some(row.description.clone()),
            created_at: now.clone(),
            updated_at: now,
        };
        t.projects.insert(0, project.clone());
        Ok(project)
    }

    fn update_project(&self, id: &ProjectId, patch: &ProjectPatch) -> Result<(), StoreError> {
        let mut t = self.begin(Op::UpdateProject, Call::UpdateProject(id.clone()))?;
        t.next_seq();
        let now = t.stamp();
        if let Some(p) = t.projects.iter_mut().find(|p| &p.id == id) {
            p.name = patch.name.clone();
            p.description = Some(patch.description.clone());
            p.updated_at = now;
        }
        Ok(())
    }

    fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError> {
        let mut t = self.begin(Op::DeleteProject, Call::DeleteProject(id.clone()))?;
        t.projects.retain(|p| &p.id != id);
        t.snippets.retain(|s| &s.project_id != id);
        Ok(())
    }

    fn insert_snippet(&self, row: &NewSnippet) -> Result<CodeSnippet, StoreError> {
        let mut t = self.begin(Op::InsertSnippet, Call::InsertSnippet(row.project_id.clone()))?;
        if !t.projects.iter().any(|p| p.id == row.project_id) {
            return Err(StoreError::api(
                "insert into code_snippets",
                StatusCode::CONFLICT,
                Some("23503"),
                "insert or update on table \"code_snippets\" violates foreign key constraint",
            ));
        }
        let seq = t.next_seq();
        let now = t.stamp();
        let snippet = CodeSnippet {
            id: SnippetId(format!("s-{}", seq)),
            project_id: row.project_id.clone(),
            title: row.title.clone(),
            code: row.code.clone(),
            language: row.language.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        t.snippets.insert(0, snippet.clone());
        Ok(snippet)
    }

    fn delete_snippet(&self, id: &SnippetId) -> Result<(), StoreError> {
        let mut t = self.begin(Op::DeleteSnippet, Call::DeleteSnippet(id.clone()))?;
        t.snippets.retain(|s| &s.id != id);
        Ok(())
    }
}
