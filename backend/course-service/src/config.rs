/// Configuration management
use std::time::Duration;

use serde::Deserialize;

use actix_middleware::WELL_KNOWN_JWKS_PATH;
use auth_core::{AuthConfig, KeySource};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_key_id")]
    pub key_id: String,
    pub private_key_path: String,
    pub public_key_path: String,
    pub jwks_url: Option<String>,
    #[serde(default)]
    pub trusted_issuers: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5004
}

fn default_key_id() -> String {
    "1".to_string()
}

fn default_http_timeout_secs() -> u64 {
    5
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn jwks_url(&self) -> String {
        self.jwks_url.clone().unwrap_or_else(|| {
            format!("http://{}:{}{WELL_KNOWN_JWKS_PATH}", self.host, self.port)
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(
            &self.key_id,
            KeySource::Files {
                private_key_path: self.private_key_path.clone().into(),
                public_key_path: self.public_key_path.clone().into(),
            },
            self.jwks_url(),
            self.trusted_issuers
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
        .with_fetch_timeout(Duration::from_secs(self.http_timeout_secs))
    }
}
