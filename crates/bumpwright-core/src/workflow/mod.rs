//! Workflow helpers shared by the release commands

mod release;
mod version;

pub use release::*;
pub use version::*;
