//! Hosted database-and-auth backend interface
//!
//! Every persistence operation in the gate is a direct call into the hosted
//! service; this module is the seam. The backend owns credential truth,
//! session expiry encoding, and audit retention.

pub mod rest;

use crate::core::error::Result;
use crate::core::principal::Principal;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Immutable record of a privileged action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub user_id: String,
    pub action: String,
    pub details: Value,
    /// Best-effort client address, often unavailable
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Security event kinds mirrored from the security log table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityEventKind {
    LoginAttempt,
    SuspiciousActivity,
    BlockedIp,
}

/// Best-effort security event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityEvent {
    pub event_type: SecurityEventKind,
    pub details: Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Client to the hosted auth/database service
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Authoritative credential check; returns the session principal
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal>;

    /// Insert one audit row; callers treat failures as best-effort
    async fn insert_audit(&self, entry: AuditEntry) -> Result<()>;

    /// Insert one security-event row; best-effort as well
    async fn insert_security_event(&self, event: SecurityEvent) -> Result<()>;
}
