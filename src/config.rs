// config.rs - configuration for the CLI demo and the transport client
//
// The distilled codec has no server loop to configure, so this keeps
// only what `main.rs`'s `send` subcommand needs: where the RADIUS
// server is and what secret to use. Loading still follows the
// source's shape (TOML via `toml`, `serde` defaults, validate-after-parse).

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RadiusError, Result};

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_auth_port() -> u16 {
    1812
}

fn default_acct_port() -> u16 {
    1813
}

fn default_timeout_secs() -> u64 {
    2
}

/// Configuration for talking to one RADIUS server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RADIUS server host or IP (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Authentication port (default: 1812)
    #[serde(default = "default_auth_port")]
    pub auth_port: u16,

    /// Accounting port (default: 1813)
    #[serde(default = "default_acct_port")]
    pub acct_port: u16,

    /// Shared secret
    pub secret: String,

    /// Reply timeout in seconds (default: 2)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| RadiusError::Dictionary(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| RadiusError::Dictionary(format!("failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Write this configuration to a file as TOML.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RadiusError::Dictionary(format!("failed to serialize config: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            return Err(RadiusError::Dictionary("secret must not be empty".into()));
        }
        if self.auth_port == self.acct_port {
            return Err(RadiusError::Dictionary(
                "auth_port and acct_port must differ".into(),
            ));
        }
        Ok(())
    }

    /// The authentication endpoint as a `host:port` string.
    pub fn auth_addr(&self) -> String {
        format!("{}:{}", self.host, self.auth_port)
    }

    /// The accounting endpoint as a `host:port` string.
    pub fn acct_addr(&self) -> String {
        format!("{}:{}", self.host, self.acct_port)
    }

    /// The configured reply timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
