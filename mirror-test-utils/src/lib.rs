//! Test utilities shared across the incident-mirror workspace
//!
//! This crate provides common testing infrastructure including:
//! - Process environment overrides ([`EnvVarGuard`])
//! - A temporary runner workspace with template, event and output files
//!   ([`TempWorkspace`])
//! - Event payload and incident report fixtures ([`fixtures`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod workspace;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use workspace::TempWorkspace;
