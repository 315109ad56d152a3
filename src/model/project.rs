use serde::{Deserialize, Serialize};

use super::ids::ProjectId;

/// A row of the `projects` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,

    // The hosted store returns `""` or `null` for a missing description.
    #[serde(default)]
    pub description: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl Project {
    /// Description with the empty string folded into `None`.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Insert payload; the store fills `id` and timestamps.
#[derive(Clone, Debug, Serialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProjectPatch {
    pub name: String,
    pub description: String,
}
