//! Filesystem-facing pieces of the Property Manager rule builder.
//!
//! Loads `papi.toml` deploy configuration and reads and writes rule-tree JSON
//! documents. Everything goes through `tokio::fs`.

pub mod config;
pub mod rules_file;
