//! Configuration management for the community duel service
//!
//! This module handles configuration loading from environment variables,
//! validation, and default values.

pub mod app;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, StoreSettings};
