//! Version strategy traits

use bumpwright_core::error::Result;
use bumpwright_core::types::BumpType;

/// Parses versions and computes the next one for a bump type
pub trait VersionStrategy: Send + Sync {
    /// Parse a version string
    fn parse(&self, version: &str) -> Result<semver::Version>;

    /// Compute the next version for a bump type
    fn bump(&self, current: &semver::Version, bump_type: BumpType) -> semver::Version;
}
