//! Session tokens for the admin area
//!
//! After the gate admits a principal, a signed HS256 token carrying its id,
//! email, and role claim is set as an HttpOnly cookie. The route guard
//! validates the token on every admin request and re-checks the role claim;
//! expiry is enforced by token validation itself.

use crate::core::error::{Error, Result};
use crate::core::principal::{Principal, ROLE_KEY};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cookie name for the session token
pub const AUTH_COOKIE_NAME: &str = "coffey_admin_token";

/// Claims carried by the session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Principal id
    pub sub: String,
    pub email: String,
    /// Role claim copied from the principal metadata
    pub role: String,
    /// Expiration timestamp
    pub exp: usize,
    /// Issued-at timestamp
    pub iat: usize,
}

impl SessionClaims {
    /// Project the claims back into a principal for the role authorizer
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.sub.clone(),
            email: self.email.clone(),
            metadata: HashMap::from([(ROLE_KEY.to_string(), self.role.clone())]),
        }
    }
}

/// Issues and validates session tokens
pub struct SessionManager {
    jwt_secret: String,
    jwt_expiration: u64,
}

impl SessionManager {
    pub fn new(jwt_secret: String, jwt_expiration: u64) -> Self {
        Self {
            jwt_secret,
            jwt_expiration,
        }
    }

    /// Session lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.jwt_expiration
    }

    /// Mint a token for an admitted principal; returns the token and its
    /// absolute expiry timestamp.
    pub fn issue(&self, principal: &Principal) -> Result<(String, u64)> {
        let now = Utc::now().timestamp() as u64;
        let expires_at = now + self.jwt_expiration;

        let claims = SessionClaims {
            sub: principal.id.clone(),
            email: principal.email.clone(),
            role: principal.role().unwrap_or_default().to_string(),
            exp: expires_at as usize,
            iat: now as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| Error::internal(format!("token generation error: {e}")))?;

        Ok((token, expires_at))
    }

    /// Validate a token's signature and expiry and return its claims
    pub fn validate(&self, token: &str) -> Result<SessionClaims> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|e| Error::authentication(format!("token validation error: {e}")))?;

        Ok(token_data.claims)
    }
}

/// Set-Cookie value for a freshly issued token
pub fn create_auth_cookie(token: &str, expires_in_secs: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        AUTH_COOKIE_NAME, token, expires_in_secs
    )
}
