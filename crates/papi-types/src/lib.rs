//! Shared types for the Property Manager rule builder.
//!
//! This crate contains the data shapes used across the workspace: rule-tree
//! JSON documents, the kind/metadata tags passed to builder delegates,
//! Property Manager API request/response types, deploy configuration and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod papi;
pub mod rule;
pub mod rule_tree;
