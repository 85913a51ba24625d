//! # Incident Mirror CLI Library
//!
//! The run pipeline behind the `incident-mirror` binary: read the issue
//! event, fetch the linked incident report, publish the mirrored issue and
//! sync it to the project board.

pub mod cli;
pub mod clients;
pub mod pipeline;
pub mod publish;
pub mod sync;

pub use pipeline::{Pipeline, RunOutcome};
