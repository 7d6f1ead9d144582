//! Configuration loading
//!
//! Environment-variable driven configuration with a prefix-based loader,
//! validated defaults, and no configuration files. Everything the service
//! needs beyond backend connection credentials has a sensible default.

use crate::admin::gate::LoginGateConfig;
use crate::admin::AdminConfig;
use crate::backend::rest::BackendConfig;
use crate::core::error::{Error, Result};
use crate::core::netgate::DEFAULT_LOOKUP_URL;
use crate::core::throttle::ThrottleConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use validator::Validate;

/// HTTP server bind settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Login-gate tunables
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GateSettings {
    #[validate(range(min = 1))]
    pub max_failures: u32,
    #[validate(range(min = 1))]
    pub cooldown_secs: u64,
    pub retry_delay_ms: u64,
    #[validate(length(min = 1))]
    pub ip_echo_url: String,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            max_failures: 5,
            cooldown_secs: 15 * 60,
            retry_delay_ms: 1000,
            ip_echo_url: DEFAULT_LOOKUP_URL.to_string(),
        }
    }
}

impl GateSettings {
    /// Project into the gate's runtime configuration
    pub fn to_gate_config(&self) -> LoginGateConfig {
        LoginGateConfig {
            throttle: ThrottleConfig {
                max_failures: self.max_failures,
                cooldown: Duration::from_secs(self.cooldown_secs),
            },
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

/// Full service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub backend: BackendConfig,
    #[validate(nested)]
    pub admin: AdminConfig,
    #[validate(nested)]
    pub gate: GateSettings,
}

/// Environment variable loader with a fixed prefix
pub struct EnvironmentLoader {
    prefix: String,
}

impl EnvironmentLoader {
    /// Create a loader with the default `COFFEY_` prefix
    pub fn new() -> Self {
        Self::with_prefix("COFFEY_")
    }

    /// Create a loader with a custom prefix
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn get_var(&self, name: &str) -> Option<String> {
        env::var(format!("{}{}", self.prefix, name)).ok()
    }

    /// Load configuration: defaults overridden by environment variables,
    /// then validated.
    pub fn load(&self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(host) = self.get_var("HOST") {
            config.server.host = host;
        }
        if let Some(port) = self.get_var("PORT").and_then(|s| s.parse().ok()) {
            config.server.port = port;
        }

        if let Some(url) = self.get_var("BACKEND_URL") {
            config.backend.url = url;
        }
        if let Some(api_key) = self.get_var("BACKEND_API_KEY") {
            config.backend.api_key = api_key;
        }

        if let Some(secret) = self.get_var("JWT_SECRET") {
            config.admin.jwt_secret = secret;
        }
        if let Some(expiration) = self.get_var("JWT_EXPIRATION").and_then(|s| s.parse().ok()) {
            config.admin.jwt_expiration = expiration;
        }
        if let Some(path) = self.get_var("LOGIN_PATH") {
            config.admin.login_path = path;
        }

        if let Some(max) = self.get_var("MAX_FAILURES").and_then(|s| s.parse().ok()) {
            config.gate.max_failures = max;
        }
        if let Some(secs) = self.get_var("COOLDOWN_SECS").and_then(|s| s.parse().ok()) {
            config.gate.cooldown_secs = secs;
        }
        if let Some(ms) = self.get_var("RETRY_DELAY_MS").and_then(|s| s.parse().ok()) {
            config.gate.retry_delay_ms = ms;
        }
        if let Some(url) = self.get_var("IP_ECHO_URL") {
            config.gate.ip_echo_url = url;
        }

        config
            .validate()
            .map_err(|e| Error::config(e.to_string()))?;
        Ok(config)
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new()
    }
}
