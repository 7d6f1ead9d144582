//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the admin gate service
#[derive(Error, Debug)]
pub enum Error {
    #[error("too many login attempts")]
    Throttled,

    #[error("login attempted outside business hours (hour {hour})")]
    OutOfHours { hour: u32 },

    #[error("login attempted from disallowed network address {address}")]
    NetworkNotAllowed { address: String },

    #[error("password does not meet the format policy")]
    InvalidPasswordFormat,

    #[error("authentication failed: {message}")]
    Authentication { message: String },

    #[error("authenticated principal does not carry the admin role")]
    UnauthorizedRole,

    #[error("backend error: {message}")]
    Backend { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },

    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("JSON parsing error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a backend error
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The single inline message shown to the user at the login boundary.
    ///
    /// Every gate failure collapses to one of these strings; backend and
    /// internal details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Throttled => "Too many login attempts. Please try again later.",
            Error::OutOfHours { .. } => "Login only allowed during business hours",
            Error::NetworkNotAllowed { .. } => "Access only allowed from local network",
            Error::InvalidPasswordFormat => "Invalid password format",
            Error::Authentication { .. } => "Invalid login credentials",
            Error::UnauthorizedRole => "Unauthorized access",
            _ => "Failed to login",
        }
    }
}
