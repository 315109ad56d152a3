//! Blocking client for the PostgREST-style row store.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::RemoteConfig;

mod error;
pub use self::error::StoreError;

mod http_client;
use self::http_client::with_retries;

mod query;
pub use self::query::{Direction, Order, Select};

mod types;
pub use self::types::ApiErrorBody;

mod operations;

/// Prefix under which the store exposes its tables.
pub const REST_PREFIX: &str = "/rest/v1";

#[derive(Clone)]
pub struct RestClient {
    remote: RemoteConfig,
    client: reqwest::blocking::Client,
}

impl RestClient {
    pub fn new(remote: RemoteConfig) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("snipdeck")
            .build()
            .map_err(|source| StoreError::Transport {
                label: "build http client".to_string(),
                source,
            })?;
        Ok(Self { remote, client })
    }

    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }
}
