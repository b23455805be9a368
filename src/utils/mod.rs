//! Configuration utilities.

/// TOML infrastructure configuration (`rolegate.toml`).
pub mod toml_config;
