//! Login flow orchestration
//!
//! A submission walks the gates in a fixed order: attempt throttle, login
//! window, network range, credential pre-filters, backend sign-in, role
//! authorizer. Every failure, whatever its kind, increments the throttle and
//! imposes the same retry delay before the caller sees the error; a
//! throttled submission is rejected before the backend is ever contacted.
//! Success resets the throttle and records one audit entry.

use crate::audit::{AuditRecorder, ClientInfo};
use crate::backend::{AuthBackend, SecurityEventKind};
use crate::core::error::{Error, Result};
use crate::core::netgate::{check_login_window, NetworkGate};
use crate::core::principal::{is_admin, Principal};
use crate::core::throttle::{LoginThrottle, ThrottleConfig};
use crate::core::validation::{email_shape_ok, PasswordPolicy};
use chrono::{Timelike, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Gate tunables
#[derive(Debug, Clone)]
pub struct LoginGateConfig {
    pub throttle: ThrottleConfig,
    /// Fixed delay imposed after every failed submission
    pub retry_delay: Duration,
}

impl Default for LoginGateConfig {
    fn default() -> Self {
        Self {
            throttle: ThrottleConfig::default(),
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Terminal success state of one submission
#[derive(Debug)]
pub struct AdminSession {
    pub principal: Principal,
}

/// Sequential login gate owning all per-session mutable state
pub struct LoginGate {
    throttle: LoginThrottle,
    netgate: NetworkGate,
    policy: PasswordPolicy,
    backend: Arc<dyn AuthBackend>,
    audit: AuditRecorder,
    retry_delay: Duration,
}

impl LoginGate {
    pub fn new(config: LoginGateConfig, netgate: NetworkGate, backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            throttle: LoginThrottle::new(config.throttle),
            netgate,
            policy: PasswordPolicy::default(),
            audit: AuditRecorder::new(Arc::clone(&backend)),
            backend,
            retry_delay: config.retry_delay,
        }
    }

    /// Run one submission using the local clock for the window check
    pub async fn attempt(
        &mut self,
        email: &str,
        password: &str,
        client: &ClientInfo,
    ) -> Result<AdminSession> {
        let hour = chrono::Local::now().hour();
        self.attempt_at(email, password, hour, client).await
    }

    /// Run one submission with an explicit local-clock hour
    pub async fn attempt_at(
        &mut self,
        email: &str,
        password: &str,
        hour: u32,
        client: &ClientInfo,
    ) -> Result<AdminSession> {
        if !self.throttle.can_attempt() {
            return self.deny(Error::Throttled, client).await;
        }

        match self.run_checks(email, password, hour).await {
            Ok(principal) => {
                self.throttle.reset();
                self.audit
                    .log_action(
                        &principal.id,
                        "login",
                        serde_json::json!({
                            "email": principal.email,
                            "timestamp": Utc::now().to_rfc3339(),
                        }),
                        client,
                    )
                    .await;
                Ok(AdminSession { principal })
            }
            Err(err) => self.deny(err, client).await,
        }
    }

    async fn run_checks(&self, email: &str, password: &str, hour: u32) -> Result<Principal> {
        check_login_window(hour)?;
        self.netgate.check().await?;

        if !email_shape_ok(email) {
            return Err(Error::authentication("malformed email address"));
        }
        if !self.policy.validate(password) {
            return Err(Error::InvalidPasswordFormat);
        }

        let principal = self.backend.sign_in(email, password).await?;

        if !is_admin(Some(&principal)) {
            return Err(Error::UnauthorizedRole);
        }
        Ok(principal)
    }

    async fn deny(&mut self, err: Error, client: &ClientInfo) -> Result<AdminSession> {
        self.throttle.record_failure();
        tracing::debug!("login denied: {err}");

        // Throttled rejections stay fully local; everything else leaves a
        // best-effort trace in the security log.
        if !matches!(err, Error::Throttled) {
            self.audit
                .log_security_event(
                    SecurityEventKind::LoginAttempt,
                    serde_json::json!({ "error": err.to_string() }),
                    client,
                )
                .await;
        }

        // Crude brute-force deterrent applied uniformly to every failure kind
        tokio::time::sleep(self.retry_delay).await;
        Err(err)
    }

    /// Current consecutive-failure count, for observability
    pub fn failed_attempts(&self) -> u32 {
        self.throttle.failures()
    }
}
