//! Snippet loads as explicit, generation-tagged tickets.

use crate::model::{CodeSnippet, ProjectId};
use crate::remote::StoreError;
use crate::repo::SnippetStore;

/// A request to load the snippets of one project.
///
/// Only the most recently issued ticket may be applied; anything older
/// belongs to a selection the user has already left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnippetFetch {
    pub generation: u64,
    pub project_id: ProjectId,
}

impl SnippetFetch {
    pub fn run<S: SnippetStore + ?Sized>(self, store: &S) -> SnippetsLoaded {
        let result = store.list_snippets(&self.project_id);
        SnippetsLoaded {
            ticket: self,
            result,
        }
    }
}

#[derive(Debug)]
pub struct SnippetsLoaded {
    pub ticket: SnippetFetch,
    pub result: Result<Vec<CodeSnippet>, StoreError>,
}

/// How the controller runs the fetch a selection change implies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// Load before the triggering operation returns.
    #[default]
    Inline,
    /// Queue the ticket; the caller drains it with `take_fetch` and
    /// hands the result back to `apply_snippets`.
    Deferred,
}
