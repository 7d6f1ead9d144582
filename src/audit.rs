//! Best-effort audit and security-event logging
//!
//! Writes never change the outcome of the action being recorded: a failed
//! insert is logged locally at `warn` and swallowed. The backend owns
//! retention and deletion of the rows.

use crate::backend::{AuditEntry, AuthBackend, SecurityEvent, SecurityEventKind};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

/// Request-scoped client attributes attached to every record
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    /// Best-effort network address, often unavailable
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Records privileged actions and security events against the backend
#[derive(Clone)]
pub struct AuditRecorder {
    backend: Arc<dyn AuthBackend>,
}

impl AuditRecorder {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self { backend }
    }

    /// Record one privileged action. Insert failures are swallowed so the
    /// caller's outcome is never affected.
    pub async fn log_action(
        &self,
        principal_id: &str,
        action: &str,
        details: Value,
        client: &ClientInfo,
    ) {
        let entry = AuditEntry {
            user_id: principal_id.to_string(),
            action: action.to_string(),
            details,
            ip_address: client.ip.clone(),
            user_agent: client.user_agent.clone(),
            timestamp: Utc::now(),
        };
        if let Err(err) = self.backend.insert_audit(entry).await {
            tracing::warn!("audit log write failed: {err}");
        }
    }

    /// Record one security event, same best-effort discipline.
    pub async fn log_security_event(
        &self,
        kind: SecurityEventKind,
        details: Value,
        client: &ClientInfo,
    ) {
        let event = SecurityEvent {
            event_type: kind,
            details,
            ip_address: client.ip.clone(),
            user_agent: client.user_agent.clone(),
            timestamp: Utc::now(),
        };
        if let Err(err) = self.backend.insert_security_event(event).await {
            tracing::warn!("security log write failed: {err}");
        }
    }
}
