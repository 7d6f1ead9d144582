//! End-to-end login flow tests against a mock backend
//!
//! These exercise the full gate sequence with virtual time: the retry delay
//! and the throttle cooldown run against the paused tokio clock. The
//! network-address lookup points at an unreachable endpoint, so the gate
//! exercises its documented fail-open path.

use async_trait::async_trait;
use coffey_admin::admin::gate::{LoginGate, LoginGateConfig};
use coffey_admin::audit::ClientInfo;
use coffey_admin::backend::{AuditEntry, AuthBackend, SecurityEvent};
use coffey_admin::core::error::{Error, Result};
use coffey_admin::core::netgate::NetworkGate;
use coffey_admin::core::principal::Principal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const ADMIN_EMAIL: &str = "owner@coffey.example";
const ADMIN_PASSWORD: &str = "Espresso1!";

struct MockBackend {
    users: HashMap<String, (String, Principal)>,
    audits: Mutex<Vec<AuditEntry>>,
    security: Mutex<Vec<SecurityEvent>>,
    sign_in_calls: AtomicUsize,
}

impl MockBackend {
    fn with_user(email: &str, password: &str, role: &str) -> Arc<Self> {
        let principal = Principal {
            id: format!("id-{email}"),
            email: email.to_string(),
            metadata: HashMap::from([("role".to_string(), role.to_string())]),
        };
        Arc::new(Self {
            users: HashMap::from([(email.to_string(), (password.to_string(), principal))]),
            audits: Mutex::new(Vec::new()),
            security: Mutex::new(Vec::new()),
            sign_in_calls: AtomicUsize::new(0),
        })
    }

    fn audit_count(&self) -> usize {
        self.audits.lock().unwrap().len()
    }

    fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        match self.users.get(email) {
            Some((stored, principal)) if stored == password => Ok(principal.clone()),
            _ => Err(Error::authentication("invalid login credentials")),
        }
    }

    async fn insert_audit(&self, entry: AuditEntry) -> Result<()> {
        self.audits.lock().unwrap().push(entry);
        Ok(())
    }

    async fn insert_security_event(&self, event: SecurityEvent) -> Result<()> {
        self.security.lock().unwrap().push(event);
        Ok(())
    }
}

fn test_gate(backend: Arc<MockBackend>) -> LoginGate {
    // Unreachable echo endpoint: the network check must pass open.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let netgate = NetworkGate::new(client, "http://127.0.0.1:9/ip");
    LoginGate::new(LoginGateConfig::default(), netgate, backend)
}

#[tokio::test(start_paused = true)]
async fn test_admin_login_creates_session_and_one_audit_entry() {
    let backend = MockBackend::with_user(ADMIN_EMAIL, ADMIN_PASSWORD, "admin");
    let mut gate = test_gate(backend.clone());
    let client = ClientInfo::default();

    let session = gate
        .attempt_at(ADMIN_EMAIL, ADMIN_PASSWORD, 10, &client)
        .await
        .expect("admin login should succeed");

    assert_eq!(session.principal.email, ADMIN_EMAIL);
    assert_eq!(session.principal.role(), Some("admin"));
    assert_eq!(gate.failed_attempts(), 0);

    let audits = backend.audits.lock().unwrap();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, "login");
    assert_eq!(audits[0].user_id, format!("id-{ADMIN_EMAIL}"));
    drop(audits);
    assert!(backend.security.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_non_admin_valid_credentials_denied_without_audit() {
    let backend = MockBackend::with_user("barista@coffey.example", ADMIN_PASSWORD, "editor");
    let mut gate = test_gate(backend.clone());
    let client = ClientInfo::default();

    let err = gate
        .attempt_at("barista@coffey.example", ADMIN_PASSWORD, 10, &client)
        .await
        .expect_err("non-admin must be denied");

    assert!(matches!(err, Error::UnauthorizedRole));
    assert_eq!(backend.audit_count(), 0);
    assert_eq!(backend.security.lock().unwrap().len(), 1);
    assert_eq!(gate.failed_attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sixth_attempt_throttled_before_backend_contact() {
    let backend = MockBackend::with_user(ADMIN_EMAIL, ADMIN_PASSWORD, "admin");
    let mut gate = test_gate(backend.clone());
    let client = ClientInfo::default();

    for _ in 0..5 {
        let err = gate
            .attempt_at(ADMIN_EMAIL, "WrongPass1!", 10, &client)
            .await
            .expect_err("wrong password must fail");
        assert!(matches!(err, Error::Authentication { .. }));
    }
    assert_eq!(backend.sign_in_calls(), 5);

    // Even correct credentials are rejected while throttled, and the
    // backend is never contacted.
    let err = gate
        .attempt_at(ADMIN_EMAIL, ADMIN_PASSWORD, 10, &client)
        .await
        .expect_err("sixth attempt must be throttled");
    assert!(matches!(err, Error::Throttled));
    assert_eq!(backend.sign_in_calls(), 5);
    assert_eq!(backend.audit_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_elapse_allows_fresh_attempt() {
    let backend = MockBackend::with_user(ADMIN_EMAIL, ADMIN_PASSWORD, "admin");
    let mut gate = test_gate(backend.clone());
    let client = ClientInfo::default();

    for _ in 0..5 {
        let _ = gate
            .attempt_at(ADMIN_EMAIL, "WrongPass1!", 10, &client)
            .await;
    }

    tokio::time::advance(Duration::from_secs(15 * 60 + 1)).await;

    let session = gate
        .attempt_at(ADMIN_EMAIL, ADMIN_PASSWORD, 10, &client)
        .await
        .expect("attempt after cooldown must be allowed");
    assert_eq!(session.principal.role(), Some("admin"));
    // Counter behaves as freshly reset after the success
    assert_eq!(gate.failed_attempts(), 0);
    assert_eq!(backend.audit_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_login_window_boundaries_end_to_end() {
    let backend = MockBackend::with_user(ADMIN_EMAIL, ADMIN_PASSWORD, "admin");
    let mut gate = test_gate(backend.clone());
    let client = ClientInfo::default();

    let err = gate
        .attempt_at(ADMIN_EMAIL, ADMIN_PASSWORD, 5, &client)
        .await
        .expect_err("hour 5 is outside the window");
    assert!(matches!(err, Error::OutOfHours { hour: 5 }));

    gate.attempt_at(ADMIN_EMAIL, ADMIN_PASSWORD, 6, &client)
        .await
        .expect("hour 6 is inside the window");
    gate.attempt_at(ADMIN_EMAIL, ADMIN_PASSWORD, 22, &client)
        .await
        .expect("hour 22 is inside the window");
}

#[tokio::test(start_paused = true)]
async fn test_password_prefilter_runs_before_backend() {
    let backend = MockBackend::with_user(ADMIN_EMAIL, ADMIN_PASSWORD, "admin");
    let mut gate = test_gate(backend.clone());
    let client = ClientInfo::default();

    let err = gate
        .attempt_at(ADMIN_EMAIL, "short1!", 10, &client)
        .await
        .expect_err("7-character password must be rejected");
    assert!(matches!(err, Error::InvalidPasswordFormat));
    assert_eq!(backend.sign_in_calls(), 0);
    assert_eq!(gate.failed_attempts(), 1);
}
