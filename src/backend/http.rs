//! reqwest implementation of the verification backend.
//!
//! Any non-2xx status is a transport failure. Error bodies are mined for the
//! backend's `detail` field, which is either a string or a list of
//! validation entries carrying `msg`.

use super::{VerificationBackend, SCANS_PATH, SCAN_PATH, SHIFT_STATS_PATH, STATS_PATH};
use crate::error::{ConfigError, FetchError, TransportError};
use crate::models::{ScanRecord, ScanRequest, ShiftBucket, ShiftDistribution, SummaryStats};
use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// `base_url` must be an absolute http(s) URL, e.g. `http://127.0.0.1:8000`
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| {
            ConfigError::ValidationFailed(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationFailed(format!(
                "API base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T>(&self, path: &'static str) -> BoxFuture<'static, Result<T, FetchError>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self.client.get(self.endpoint(path));
        async move {
            let body = send_checked(request).await?;
            serde_json::from_str::<T>(&body).map_err(|e| FetchError::Decode {
                endpoint: path.to_string(),
                reason: e.to_string(),
            })
        }
        .boxed()
    }
}

/// Send `request` and return the body of a 2xx response
async fn send_checked(request: reqwest::RequestBuilder) -> Result<String, TransportError> {
    let response = request
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Network(format!("Failed to read response body: {}", e)))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(TransportError::Status {
            status: status.as_u16(),
            detail: extract_detail(&body),
        })
    }
}

/// Human-readable `detail` from an error body, if it has one
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

impl VerificationBackend for HttpBackend {
    fn submit_scan(&self, request: ScanRequest) -> BoxFuture<'static, Result<String, TransportError>> {
        let builder = self.client.post(self.endpoint(SCAN_PATH)).json(&request);
        async move { send_checked(builder).await }.boxed()
    }

    fn fetch_recent_scans(&self) -> BoxFuture<'static, Result<Vec<ScanRecord>, FetchError>> {
        self.get_json::<Vec<ScanRecord>>(SCANS_PATH)
    }

    fn fetch_summary(&self) -> BoxFuture<'static, Result<SummaryStats, FetchError>> {
        self.get_json::<SummaryStats>(STATS_PATH)
    }

    fn fetch_shift_distribution(&self) -> BoxFuture<'static, Result<Vec<ShiftBucket>, FetchError>> {
        self.get_json::<ShiftDistribution>(SHIFT_STATS_PATH)
            .map(|result| result.map(|dist| dist.shifts))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_validation() {
        assert!(HttpBackend::new("http://127.0.0.1:8000").is_ok());
        assert!(HttpBackend::new("not a url").is_err());
        assert!(HttpBackend::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/").expect("valid url");
        assert_eq!(backend.endpoint(SCAN_PATH), "http://localhost:8000/api/scan");
    }

    #[test]
    fn test_detail_string() {
        assert_eq!(
            extract_detail(r#"{"detail": "Both barcodes must be provided."}"#).as_deref(),
            Some("Both barcodes must be provided.")
        );
    }

    #[test]
    fn test_detail_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "barcode2"], "msg": "field required", "type": "value_error.missing"}]}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("field required"));
    }

    #[test]
    fn test_detail_absent() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": 5}"#), None);
    }
}
