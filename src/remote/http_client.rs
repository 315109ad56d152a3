use reqwest::StatusCode;
use reqwest::blocking::{RequestBuilder, Response};

use super::*;

pub(super) fn with_retries<T>(
    mut f: impl FnMut() -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    const ATTEMPTS: usize = 3;
    let mut i = 0;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) if err.is_transient() && i + 1 < ATTEMPTS => {
                tracing::debug!(attempt = i + 1, error = %err, "retrying store read");
                std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                i += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

impl RestClient {
    pub(super) fn send(&self, req: RequestBuilder, label: &str) -> Result<Response, StoreError> {
        let resp = req
            .header("apikey", &self.remote.api_key)
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .map_err(|source| StoreError::Transport {
                label: label.to_string(),
                source,
            })?;
        self.ensure_ok(resp, label)
    }

    fn ensure_ok(&self, resp: Response, label: &str) -> Result<Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(StoreError::api(
                label,
                status,
                None,
                "unauthorized (api key rejected; run `snipdeck config set --url ... --key ...`)",
            ));
        }

        let text = resp.text().unwrap_or_default();
        let body: Option<ApiErrorBody> = serde_json::from_str(&text).ok();
        Err(match body {
            Some(body) => StoreError::api(label, status, body.code.as_deref(), &body.summary()),
            None if text.trim().is_empty() => StoreError::api(
                label,
                status,
                None,
                status.canonical_reason().unwrap_or("error"),
            ),
            None => StoreError::api(label, status, None, text.trim()),
        })
    }

    pub(super) fn read_json<T: DeserializeOwned>(
        &self,
        resp: Response,
        label: &str,
    ) -> Result<T, StoreError> {
        let bytes = resp.bytes().map_err(|source| StoreError::Transport {
            label: label.to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            label: label.to_string(),
            source,
        })
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.remote.api_key)
    }

    pub(super) fn table_url(&self, table: &str) -> String {
        format!(
            "{}{}/{}",
            self.remote.base_url.trim_end_matches('/'),
            REST_PREFIX,
            table
        )
    }
}
