//! Coffey Admin - access gate and admin panel service for the coffee shop site

pub mod admin;
pub mod audit;
pub mod backend;
pub mod config;
pub mod core;

pub use crate::core::error::{Error, Result};
