//! Core functionality for ghrest
//!
//! This module contains the settings shared by the library and the CLI:
//! - Client configuration (file and environment overrides)
//! - Credentials

pub mod config;
pub mod credentials;

pub use config::{Config, ConfigKey};
pub use credentials::Auth;
