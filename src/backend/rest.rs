//! REST client for the hosted auth/database service
//!
//! Talks to the service's password-grant token endpoint for sign-in and to
//! its table endpoints for audit/security inserts. The shared HTTP client is
//! injected so all outbound calls reuse one connection pool.

use crate::backend::{AuditEntry, AuthBackend, SecurityEvent};
use crate::core::error::{Error, Result};
use crate::core::principal::Principal;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use validator::Validate;

/// Table receiving audit entries
pub const AUDIT_TABLE: &str = "audit_logs";
/// Table receiving security events
pub const SECURITY_TABLE: &str = "security_logs";

/// Hosted backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BackendConfig {
    /// Base URL of the hosted service
    #[validate(length(min = 1))]
    pub url: String,
    /// Anonymous API key sent with every request
    pub api_key: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            api_key: String::new(),
        }
    }
}

/// Password-grant token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    user: BackendUser,
}

/// User object as the hosted service returns it
#[derive(Debug, Deserialize)]
struct BackendUser {
    id: String,
    email: String,
    #[serde(default)]
    user_metadata: HashMap<String, Value>,
}

impl From<BackendUser> for Principal {
    fn from(user: BackendUser) -> Self {
        let metadata = user
            .user_metadata
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();
        Principal {
            id: user.id,
            email: user.email,
            metadata,
        }
    }
}

/// REST implementation of [`AuthBackend`]
pub struct RestBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl RestBackend {
    pub fn new(client: reqwest::Client, config: BackendConfig) -> Self {
        Self { client, config }
    }

    async fn insert_row<T: Serialize>(&self, table: &str, row: &T) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.config.url, table);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::backend(format!(
                "insert into {} failed with status {}",
                table,
                response.status()
            )))
        }
    }
}

#[async_trait]
impl AuthBackend for RestBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.config.url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        match response.status() {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(Error::authentication("invalid login credentials"))
            }
            status if status.is_success() => {
                let token: TokenResponse = response.json().await?;
                Ok(token.user.into())
            }
            status => Err(Error::backend(format!(
                "sign-in failed with status {status}"
            ))),
        }
    }

    async fn insert_audit(&self, entry: AuditEntry) -> Result<()> {
        self.insert_row(AUDIT_TABLE, &entry).await
    }

    async fn insert_security_event(&self, event: SecurityEvent) -> Result<()> {
        self.insert_row(SECURITY_TABLE, &event).await
    }
}
