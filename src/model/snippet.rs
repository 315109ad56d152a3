use serde::{Deserialize, Serialize};

use super::ids::{ProjectId, SnippetId};

/// Suggested language tags. The store does not enforce them.
pub const LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "cpp",
    "csharp",
    "go",
    "rust",
    "php",
    "ruby",
    "swift",
    "kotlin",
    "html",
    "css",
    "sql",
    "bash",
    "other",
];

pub const DEFAULT_LANGUAGE: &str = "javascript";

/// A row of the `code_snippets` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub id: SnippetId,
    pub project_id: ProjectId,
    pub title: String,
    pub code: String,
    pub language: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewSnippet {
    pub project_id: ProjectId,
    pub title: String,
    pub code: String,
    pub language: String,
}

/// Display label for a language tag (`"python"` -> `"Python"`).
pub fn language_label(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
