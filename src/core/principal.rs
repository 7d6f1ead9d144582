//! The authenticated identity and the role authorizer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role claim value that unlocks the admin area
pub const ADMIN_ROLE: &str = "admin";

/// Metadata key carrying the role claim
pub const ROLE_KEY: &str = "role";

/// The authenticated user object returned by the hosted auth service.
///
/// Owned by the auth subsystem and read-only to everything else. The
/// free-form metadata carries the role claim; no separate permissions table
/// is consulted at request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Principal {
    /// The role claim, if present
    pub fn role(&self) -> Option<&str> {
        self.metadata.get(ROLE_KEY).map(String::as_str)
    }
}

/// The sole authorization signal: a principal exists and its role claim
/// equals `admin`.
pub fn is_admin(principal: Option<&Principal>) -> bool {
    principal.is_some_and(|p| p.role() == Some(ADMIN_ROLE))
}
