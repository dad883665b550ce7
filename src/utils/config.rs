use serde::Deserialize;
use std::env;

/// URL value that marks an unconfigured hosted KV in scaffolded .env files.
const KV_URL_PLACEHOLDER: &str = "your_kv_url_here";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub kv: KvConfig,
    pub admin: AdminConfig,
    pub vapi: VapiConfig,
    /// Toggles the `Secure` flag on the admin session cookie.
    pub production: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KvConfig {
    /// REST endpoint of the hosted key-value service, if configured.
    pub url: Option<String>,
    /// Bearer token for the hosted service.
    pub token: Option<String>,
    /// Backing file for the local fallback store.
    pub data_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Shared admin password. Login always fails when unset.
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VapiConfig {
    /// Publishable key handed to the browser-side call widget.
    pub public_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
            },
            kv: KvConfig {
                url: env::var("KV_REST_API_URL")
                    .or_else(|_| env::var("UPSTASH_REDIS_REST_URL"))
                    .ok(),
                token: env::var("KV_REST_API_TOKEN")
                    .or_else(|_| env::var("UPSTASH_REDIS_REST_TOKEN"))
                    .ok(),
                data_file: env::var("DATA_FILE").unwrap_or_else(|_| ".agents.json".to_string()),
            },
            admin: AdminConfig {
                password: env::var("ADMIN_PASSWORD").ok(),
            },
            vapi: VapiConfig {
                public_key: env::var("VAPI_PUBLIC_KEY").ok(),
            },
            production: env::var("APP_ENV").map(|v| v == "production").unwrap_or(false),
        })
    }
}

impl KvConfig {
    /// Returns the hosted-service credentials when they are usable.
    ///
    /// The hosted variant is selected only when both URL and token are set,
    /// the URL is https and it is not a scaffold placeholder. Anything else
    /// means the local file store.
    pub fn hosted(&self) -> Option<(&str, &str)> {
        match (self.url.as_deref(), self.token.as_deref()) {
            (Some(url), Some(token))
                if url.starts_with("https") && !url.contains(KV_URL_PLACEHOLDER) =>
            {
                Some((url, token))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kv(url: Option<&str>, token: Option<&str>) -> KvConfig {
        KvConfig {
            url: url.map(str::to_string),
            token: token.map(str::to_string),
            data_file: ".agents.json".to_string(),
        }
    }

    #[test]
    fn hosted_requires_url_and_token() {
        assert!(kv(None, None).hosted().is_none());
        assert!(kv(Some("https://kv.example.com"), None).hosted().is_none());
        assert!(kv(None, Some("tok")).hosted().is_none());
    }

    #[test]
    fn hosted_rejects_placeholder_and_plain_http() {
        assert!(kv(Some("https://your_kv_url_here"), Some("tok"))
            .hosted()
            .is_none());
        assert!(kv(Some("http://kv.example.com"), Some("tok"))
            .hosted()
            .is_none());
    }

    #[test]
    fn hosted_accepts_valid_credentials() {
        let cfg = kv(Some("https://kv.example.com"), Some("tok"));
        assert_eq!(cfg.hosted(), Some(("https://kv.example.com", "tok")));
    }
}
