//! Client-side credential pre-filters
//!
//! These run before the hosted backend is contacted and only reject
//! obviously malformed input; the backend remains the authority on
//! credentials.

/// Special characters the password policy accepts
pub const SPECIAL_CHARS: &str = "!@#$%^&*";

/// Password shape policy: minimum length plus required character classes
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    /// True only if the password has the minimum length and contains at
    /// least one uppercase letter, one lowercase letter, one digit, and one
    /// character from [`SPECIAL_CHARS`].
    pub fn validate(&self, password: &str) -> bool {
        if password.chars().count() < self.min_length {
            return false;
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return false;
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return false;
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        password.chars().any(|c| SPECIAL_CHARS.contains(c))
    }
}

/// Basic email shape check: non-empty and contains an `@`
pub fn email_shape_ok(email: &str) -> bool {
    let trimmed = email.trim();
    !trimmed.is_empty() && trimmed.contains('@')
}
