//! bumpwright strategies - version resolution and bumping
//!
//! This crate finds the current released version from tags, lists the
//! commits since that release, and computes the next semantic version.

mod resolver;
mod semver;
mod traits;

pub use resolver::{is_release_noise, Resolution, VersionResolver};
pub use semver::{bump_version, SemVerStrategy};
pub use traits::VersionStrategy;
