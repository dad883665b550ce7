//! Key-value storage abstraction.
//!
//! This module provides the `KvStore` trait that abstracts over the two
//! interchangeable persistence backends:
//!
//! - **Upstash**: hosted Redis-compatible store spoken over its REST API
//! - **File**: local JSON file, rewritten wholesale on every mutation
//!
//! The backend is selected once at process start from configuration and
//! never changes for the process lifetime; there is no runtime failover.
//!
//! # Example
//!
//! ```rust,ignore
//! use voxboard::kv::KvProvider;
//!
//! // Local file store (default for development)
//! let store = KvProvider::File { path: ".agents.json".into() }.create_store()?;
//!
//! // Hosted store (requires a https URL and token)
//! let store = KvProvider::Upstash { url, token }.create_store()?;
//! ```

use crate::types::Result;
use crate::utils::config::KvConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub mod file;
pub mod upstash;

pub use file::FileStore;
pub use upstash::UpstashStore;

/// Uniform get/set/del/keys/mget contract over string keys and JSON values.
///
/// Every operation is a single independent request to the backend; no
/// transaction spans multiple keys.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Single-key lookup. Absence is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Unconditional write, create-or-replace.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Delete a key. Succeeds whether or not the key existed.
    async fn del(&self, key: &str) -> Result<()>;

    /// Enumerate keys matching `pattern`.
    ///
    /// Only a single trailing `*` wildcard is supported; the pattern is a
    /// prefix query, never a general glob. Enumeration order is whatever the
    /// backend yields.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// Bulk lookup, one entry per input key in input order.
    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>>;
}

/// Storage backend configuration.
#[derive(Debug, Clone)]
pub enum KvProvider {
    /// Hosted Redis-REST store (network, durable).
    Upstash {
        /// REST endpoint, e.g. `https://usw1-example.upstash.io`
        url: String,
        /// Bearer token for the REST endpoint
        token: String,
    },
    /// Local JSON-file-backed store (development fallback).
    File {
        /// Path to the backing file; created on first write.
        path: String,
    },
}

impl KvProvider {
    /// Pick the backend from typed configuration.
    ///
    /// Hosted wins only when `KvConfig::hosted` yields usable credentials.
    pub fn from_config(config: &KvConfig) -> Self {
        match config.hosted() {
            Some((url, token)) => KvProvider::Upstash {
                url: url.to_string(),
                token: token.to_string(),
            },
            None => KvProvider::File {
                path: config.data_file.clone(),
            },
        }
    }

    /// Create a store from this provider configuration.
    pub fn create_store(&self) -> Result<Arc<dyn KvStore>> {
        match self {
            KvProvider::Upstash { url, token } => {
                tracing::info!(url = %url, "using hosted kv store");
                Ok(Arc::new(UpstashStore::new(url.clone(), token.clone())?))
            }
            KvProvider::File { path } => {
                tracing::info!(path = %path, "using file-backed kv store");
                Ok(Arc::new(FileStore::open(path)))
            }
        }
    }
}

/// Split a key pattern into its prefix, rejecting anything beyond a single
/// trailing `*`.
///
/// `agent:*` → `agent:`; a pattern without a wildcard matches exactly.
pub(crate) fn pattern_prefix(pattern: &str) -> Option<(&str, bool)> {
    match pattern.strip_suffix('*') {
        Some(prefix) if !prefix.contains('*') => Some((prefix, true)),
        None if !pattern.contains('*') => Some((pattern, false)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_selection_prefers_hosted() {
        let config = KvConfig {
            url: Some("https://kv.example.com".to_string()),
            token: Some("tok".to_string()),
            data_file: ".agents.json".to_string(),
        };
        assert!(matches!(
            KvProvider::from_config(&config),
            KvProvider::Upstash { .. }
        ));
    }

    #[test]
    fn provider_selection_falls_back_to_file() {
        let config = KvConfig {
            url: Some("https://your_kv_url_here".to_string()),
            token: Some("tok".to_string()),
            data_file: ".agents.json".to_string(),
        };
        assert!(matches!(
            KvProvider::from_config(&config),
            KvProvider::File { .. }
        ));
    }

    #[test]
    fn pattern_prefix_accepts_trailing_star_only() {
        assert_eq!(pattern_prefix("agent:*"), Some(("agent:", true)));
        assert_eq!(pattern_prefix("agent:john"), Some(("agent:john", false)));
        assert_eq!(pattern_prefix("*:agent"), None);
        assert_eq!(pattern_prefix("a*b*"), None);
    }
}
