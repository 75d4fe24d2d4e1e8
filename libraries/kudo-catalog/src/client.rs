//! Shared HTTP client for upstream requests.

use crate::error::{CatalogError, Result};
use reqwest::{header::ACCEPT, Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// User agent sent to upstreams that ask for one identifying the app (LRCLIB)
pub const APP_USER_AGENT: &str = "Kudo Music Player/1.0 (https://kudo.app)";

/// Browser user agent for upstreams that reject non-browser clients
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Thin wrapper over `reqwest::Client` with per-attempt timeouts
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(timeout)
            .user_agent(APP_USER_AGENT)
            .build()?;

        Ok(Self { http, timeout })
    }

    /// Start a GET request with the default timeout
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).timeout(self.timeout)
    }

    /// Send a request and decode a JSON body
    ///
    /// Non-success statuses and HTML bodies (error pages, bot walls) are
    /// reported as distinct errors so callers can fall through to the next
    /// upstream.
    pub async fn json(&self, request: RequestBuilder, url: &str) -> Result<Value> {
        let text = self.text(request.header(ACCEPT, "application/json"), url).await?;

        let trimmed = text.trim_start();
        if trimmed.starts_with('<') {
            return Err(CatalogError::NotJson(url.to_string()));
        }

        serde_json::from_str(trimmed)
            .map_err(|e| CatalogError::Parse(format!("{}: {}", url, e)))
    }

    /// Send a request and read the body as text
    pub async fn text(&self, request: RequestBuilder, url: &str) -> Result<String> {
        debug!(url = %url, "Upstream request");

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(CatalogError::Upstream {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// String or number field as a string
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-empty string field
pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Numeric field that may arrive as a number or a numeric string
pub(crate) fn number_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_helpers() {
        let value = json!({"id": 42, "name": "  Song ", "empty": "", "duration": "215"});

        assert_eq!(string_field(&value, "id").as_deref(), Some("42"));
        assert_eq!(string_field(&value, "name").as_deref(), Some("Song"));
        assert_eq!(string_field(&value, "empty"), None);
        assert_eq!(str_field(&value, "name"), Some("Song"));
        assert_eq!(number_field(&value, "duration"), Some(215.0));
        assert_eq!(number_field(&value, "missing"), None);
    }
}
