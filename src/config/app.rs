//! Application configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // Server
    pub ip: String,
    pub port: u16,

    // Storage
    /// Snapshot file, relative to the base directory
    pub data_file: String,

    // Auth
    /// Token signing secret; falls back to the `SECRET` environment variable
    pub secret: Option<String>,
    /// Token lifetime in seconds
    pub token_ttl: i64,
    pub password_iterations: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3003,

            data_file: "db.json".to_string(),

            secret: None,
            token_ttl: 3600,
            password_iterations: 100_000,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Override settings from `PORT` and `SECRET`
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT {:?}: {}", port, e))?;
            tracing::debug!("Port overridden from environment: {}", self.port);
        }
        if let Ok(secret) = std::env::var("SECRET") {
            if !secret.is_empty() {
                self.secret = Some(secret);
            }
        }
        Ok(())
    }

    /// The token secret, which the server cannot run without
    pub fn require_secret(&self) -> Result<&str> {
        self.secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("No token secret: set `secret` in _config.yml or SECRET"))
    }
}
