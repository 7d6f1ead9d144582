//! Core gate components: errors, principal, throttle, context checks, validation

pub mod error;
pub mod netgate;
pub mod principal;
pub mod throttle;
pub mod validation;
