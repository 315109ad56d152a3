//! Error payload returned by the row store.

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,

    #[serde(default)]
    pub details: Option<String>,

    #[serde(default)]
    pub hint: Option<String>,
}

impl ApiErrorBody {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.to_string()),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Message plus details, on one line.
    pub fn summary(&self) -> String {
        match &self.details {
            Some(d) if !d.is_empty() => format!("{} ({})", self.message, d),
            _ => self.message.clone(),
        }
    }
}
