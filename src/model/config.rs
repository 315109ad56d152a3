use serde::{Deserialize, Serialize};

/// Connection settings for the remote row store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,
}

impl StoreConfig {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: StoreConfig) -> StoreConfig {
        StoreConfig {
            base_url: other.base_url.or(self.base_url),
            api_key: other.api_key.or(self.api_key),
        }
    }
}

/// A fully resolved store endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
}
