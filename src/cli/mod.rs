//! CLI module for ghrest
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod auth;
pub mod commands;
pub mod config;
pub mod gist;
pub mod lookup;
pub mod output;
pub mod search;

pub use commands::{Cli, Commands};
