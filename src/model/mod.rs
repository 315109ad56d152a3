mod config;
mod ids;
mod project;
mod snippet;

pub use self::config::{RemoteConfig, StoreConfig};
pub use self::ids::{ProjectId, SnippetId};
pub use self::project::{NewProject, Project, ProjectPatch};
pub use self::snippet::{CodeSnippet, DEFAULT_LANGUAGE, LANGUAGES, NewSnippet, language_label};
