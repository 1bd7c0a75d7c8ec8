//! Text-completion client for the enrichment engine.
//!
//! The endpoint is treated as an untrusted free-text source: the response is
//! expected to contain one embedded JSON object somewhere in the prose, and
//! everything about it is validated after extraction. Absence of a valid
//! object is a soft failure the caller recovers from.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::provider::body_snippet;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct GenerativeClient {
    client: Client,
    endpoint: String,
}

impl GenerativeClient {
    pub fn new(endpoint: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// Build a client from config, or None when no endpoint is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let endpoint = config.generative_url()?;
        Self::new(endpoint.to_string()).ok()
    }

    /// Send a prompt and return the raw completion text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        debug!("Generative call: {} chars of prompt", prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider {
                status: status.as_u16(),
                snippet: body_snippet(&body),
            });
        }

        let body = response.text().await?;

        // Some backends wrap the completion in {"text": ...} or
        // {"response": ...}; unwrap those, otherwise the body is the text
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
            for field in ["text", "response", "completion"] {
                if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                    return Ok(text.to_string());
                }
            }
        }
        Ok(body)
    }
}

/// Extract the first balanced `{...}` JSON object embedded in free text.
/// Quote- and escape-aware so braces inside string values do not break the
/// balance count.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_object_from_prose() {
        let text = "Sure! Here is the analysis you asked for:\n\
                    {\"avg_move_pct\": 1.2, \"direction_bias\": \"bullish\"}\n\
                    Let me know if you need anything else.";
        let extracted = extract_json_object(text).unwrap();
        let value: serde_json::Value = serde_json::from_str(extracted).unwrap();
        assert_eq!(value["avg_move_pct"], 1.2);
    }

    #[test]
    fn test_handles_nested_and_quoted_braces() {
        let text = r#"prefix {"outer": {"inner": 1}, "note": "a } in a string"} suffix"#;
        let extracted = extract_json_object(text).unwrap();
        assert_eq!(
            extracted,
            r#"{"outer": {"inner": 1}, "note": "a } in a string"}"#
        );
    }

    #[test]
    fn test_no_object_returns_none() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("unbalanced { oops"), None);
    }

    #[tokio::test]
    #[ignore] // Requires GENERATIVE_API_URL and network access
    async fn test_live_completion() {
        let config = Config::from_env();
        let client = GenerativeClient::from_config(&config).unwrap();
        let text = client.complete("Reply with {\"ok\": true}").await.unwrap();
        assert!(extract_json_object(&text).is_some());
    }
}
