//! Hosted key-value store spoken over the Upstash Redis REST API.
//!
//! Each operation issues one `POST <base_url>` with a JSON command array
//! (`["SET", key, value]`) and a bearer token; the service answers with a
//! `{"result": ...}` or `{"error": ...}` envelope. Stored values travel as
//! JSON-encoded strings so the wire shape stays opaque to the service.

use crate::kv::{pattern_prefix, KvStore};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

pub struct UpstashStore {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

/// Response envelope returned for every REST command.
#[derive(Debug, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl UpstashStore {
    pub fn new(base_url: String, token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Storage(format!("Failed to build http client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    /// Execute a single Redis command and unwrap the response envelope.
    async fn command(&self, cmd: Vec<Value>) -> Result<Value> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(&cmd)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("KV request failed: {}", e)))?;

        let status = response.status();
        let envelope: CommandResponse = response
            .json()
            .await
            .map_err(|e| AppError::Storage(format!("Malformed KV response: {}", e)))?;

        if let Some(error) = envelope.error {
            return Err(AppError::Storage(format!("KV command failed: {}", error)));
        }
        if !status.is_success() {
            return Err(AppError::Storage(format!(
                "KV request returned status {}",
                status
            )));
        }

        Ok(envelope.result.unwrap_or(Value::Null))
    }
}

/// Decode one stored entry: the service hands back the JSON-encoded string
/// we wrote, or null for a missing key.
fn decode_entry(raw: &Value) -> Option<Value> {
    match raw {
        Value::Null => None,
        Value::String(s) => serde_json::from_str(s).ok(),
        other => Some(other.clone()),
    }
}

#[async_trait]
impl KvStore for UpstashStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let result = self
            .command(vec!["GET".into(), key.into()])
            .await?;
        Ok(decode_entry(&result))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let serialized = serde_json::to_string(&value)
            .map_err(|e| AppError::Storage(format!("Failed to serialize value: {}", e)))?;
        self.command(vec!["SET".into(), key.into(), serialized.into()])
            .await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        // DEL reports the number of removed keys; deleting a missing key is
        // still a success.
        self.command(vec!["DEL".into(), key.into()]).await?;
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        // Same restriction as the file store so the two variants stay
        // interchangeable, even though the service would accept a full glob.
        if pattern_prefix(pattern).is_none() {
            return Err(AppError::Storage(format!(
                "Unsupported key pattern: {}",
                pattern
            )));
        }

        let result = self
            .command(vec!["KEYS".into(), pattern.into()])
            .await?;
        match result {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()),
            other => Err(AppError::Storage(format!(
                "Unexpected KEYS response: {}",
                other
            ))),
        }
    }

    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut cmd: Vec<Value> = vec!["MGET".into()];
        cmd.extend(keys.iter().map(|key| Value::from(key.as_str())));

        let result = self.command(cmd).await?;
        match result {
            Value::Array(items) => Ok(items.iter().map(decode_entry).collect()),
            other => Err(AppError::Storage(format!(
                "Unexpected MGET response: {}",
                other
            ))),
        }
    }
}
