//! bumpwright core - shared foundation for release automation
//!
//! This crate provides the error taxonomy, the types passed between the
//! resolver, analyzer, updater and publisher, configuration loading, and the
//! small templating helpers used by the release workflow.

pub mod config;
pub mod error;
pub mod types;
pub mod workflow;

pub use error::{BumpwrightError, Result};
pub use types::{BumpSource, BumpType, CommitAnalysis, ReleaseSummary};
