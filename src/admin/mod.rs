//! Admin panel surface: login flow, session guard, and the guarded area

pub mod gate;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;

pub use routes::create_admin_router;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Admin surface configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminConfig {
    /// Path unauthenticated visitors are redirected to
    #[validate(length(min = 1))]
    pub login_path: String,
    /// Secret for session token signing
    #[validate(length(min = 1))]
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    #[validate(range(min = 1))]
    pub jwt_expiration: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            login_path: "/admin/login".to_string(),
            jwt_secret: "default-jwt-secret-change-in-production".to_string(),
            jwt_expiration: 3600, // 1 hour, matching the backend session timeout
        }
    }
}
