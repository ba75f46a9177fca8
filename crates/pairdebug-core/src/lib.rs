//! # pairdebug-core
//!
//! Core types, configuration, and utilities for pairdebug.
//!
//! This crate provides shared functionality used across all pairdebug crates:
//!
//! - **Configuration**: Loading, environment overrides, and validation
//! - **Types**: Room and connection identifiers
//! - **Utilities**: Path resolution, environment handling, and secret strings

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod secret;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
pub use secret::SecretString;
pub use types::{ConnectionId, RoomId};
