use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::error::ApiError;
use crate::utils::build_query_string;
use crate::utils::json_converter::first_string;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Connection details shared by every backend call.
#[derive(Clone, Debug)]
pub struct ApiContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub token: String,
}

impl ApiContext {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Build an HTTP client with the crate's user agent and the given timeout.
    pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client, ApiError> {
        reqwest::Client::builder()
            .user_agent(format!("Quoter/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))
    }
}

/// Core HTTP client function for making API calls.
/// Handles authentication, request building, and error responses.
pub async fn api_call(
    ctx: &ApiContext,
    method: &str,
    endpoint: &str,
    body: Option<&Value>,
    params: Option<&[(String, String)]>,
) -> Result<Value, ApiError> {
    if ctx.base_url.trim().is_empty() {
        return Err(ApiError::NotConfigured);
    }

    // --- Curl Logging ---
    let mut url_for_log = format!("{}{}", ctx.base_url, endpoint);
    if let Some(p) = params {
        if !p.is_empty() {
            url_for_log = format!("{}?{}", url_for_log, build_query_string(p));
        }
    }

    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));

    if !ctx.token.is_empty() {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Authorization: Bearer ***'").fg(yansi::Color::Magenta)
        ));
    }
    if let Some(d) = body {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!("{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
    }
    log_output(format!("Request:\n{}", parts.join(" ")));
    // --------------------

    let url = format!("{}{}", ctx.base_url, endpoint);
    let mut req = match method {
        "POST" => ctx.client.post(&url),
        "PUT" => ctx.client.put(&url),
        "DELETE" => ctx.client.delete(&url),
        _ => ctx.client.get(&url),
    };
    req = req.header("Accept", "application/json");
    if !ctx.token.is_empty() {
        req = req.bearer_auth(&ctx.token);
    }
    if let Some(p) = params {
        req = req.query(p);
    }
    if let Some(b) = body {
        req = req.json(b);
    }

    let response = req.send().await.map_err(|e| {
        tracing::warn!(%e, endpoint, "request failed");
        ApiError::Network(e.to_string())
    })?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        log_output(format!("Response:\n{}", Paint::new(format!("HTTP {}: {}", status, text)).fg(yansi::Color::Red)));
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| error_message(&v))
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        return Err(ApiError::Status { status: status.as_u16(), message });
    }

    // Grayed out color (dimmed/dark gray)
    log_output(format!("Response:\n{}", Paint::new(&text).rgb(100, 100, 100)));

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull a human-readable message out of an error body.
pub fn error_message(body: &Value) -> Option<String> {
    if let Some(msg) = first_string(body, &["message", "error", "detail"]) {
        return Some(msg);
    }
    // `{"error": {"message": "..."}}`
    body.get("error").and_then(|e| first_string(e, &["message", "detail"]))
}

/// Strip `{"data": …}` envelopes. Paginated lists nest one more level.
pub fn unwrap_envelope(payload: Value) -> Value {
    let mut current = payload;
    for _ in 0..2 {
        let inner = match current.as_object_mut() {
            Some(obj) if obj.contains_key("data") => obj.remove("data").unwrap_or(Value::Null),
            _ => break,
        };
        current = inner;
    }
    current
}

/// Decode a list payload element by element, skipping entries that do not fit.
pub fn decode_list<T: serde::de::DeserializeOwned>(payload: Value, what: &str) -> Result<Vec<T>, ApiError> {
    match unwrap_envelope(payload) {
        Value::Array(items) => {
            let total = items.len();
            let decoded: Vec<T> = items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<T>(item) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        tracing::warn!(%e, what, "skipping malformed entry");
                        None
                    }
                })
                .collect();
            tracing::debug!(what, total, kept = decoded.len(), "decoded list");
            Ok(decoded)
        }
        Value::Null => Ok(Vec::new()),
        other => Err(ApiError::Decode(format!(
            "expected a list of {}, got {}",
            what,
            kind_of(&other)
        ))),
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_nested_pagination_envelope() {
        let v = json!({"data": {"data": [1, 2], "total": 2}});
        assert_eq!(unwrap_envelope(v), json!([1, 2]));
    }

    #[test]
    fn leaves_plain_payloads_alone() {
        assert_eq!(unwrap_envelope(json!([1])), json!([1]));
        assert_eq!(unwrap_envelope(json!({"pricing": {}})), json!({"pricing": {}}));
    }

    #[test]
    fn error_message_prefers_top_level_message() {
        assert_eq!(error_message(&json!({"message": "Invalid region"})).as_deref(), Some("Invalid region"));
        assert_eq!(error_message(&json!({"error": {"message": "nope"}})).as_deref(), Some("nope"));
        assert_eq!(error_message(&json!({"ok": false})), None);
    }

    #[test]
    fn decode_list_skips_bad_entries() {
        #[derive(serde::Deserialize)]
        struct Row {
            #[allow(dead_code)]
            name: String,
        }
        let rows: Vec<Row> = decode_list(json!({"data": [{"name": "a"}, {"nope": 1}]}), "rows").unwrap();
        assert_eq!(rows.len(), 1);
        assert!(decode_list::<Row>(json!({"data": "x"}), "rows").is_err());
    }
}
