use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{label}: {source}")]
    Transport {
        label: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{label} failed ({status}): {message}")]
    Api {
        label: String,
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("parse {label} response: {source}")]
    Decode {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("insert into {table} returned no row")]
    EmptyInsert { table: String },
}

impl StoreError {
    pub fn api(label: &str, status: StatusCode, code: Option<&str>, message: &str) -> Self {
        StoreError::Api {
            label: label.to_string(),
            status: status.as_u16(),
            code: code.map(str::to_string),
            message: message.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Api { status, .. } => Some(*status),
            StoreError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT.as_u16())
    }

    /// Whether repeating the same read could plausibly succeed.
    pub(super) fn is_transient(&self) -> bool {
        match self {
            StoreError::Transport { source, .. } => {
                source.is_connect() || source.is_timeout()
            }
            StoreError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
