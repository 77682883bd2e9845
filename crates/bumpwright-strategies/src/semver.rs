//! SemVer version strategy

use ::semver::{BuildMetadata, Prerelease, Version};
use tracing::debug;

use bumpwright_core::error::{Result, VersionError};
use bumpwright_core::types::BumpType;

use crate::traits::VersionStrategy;

/// Semantic Versioning strategy
///
/// Follows the SemVer 2.0.0 specification: https://semver.org/
#[derive(Debug, Clone, Copy, Default)]
pub struct SemVerStrategy;

impl SemVerStrategy {
    /// Create a new SemVer strategy
    pub fn new() -> Self {
        Self
    }
}

impl VersionStrategy for SemVerStrategy {
    fn parse(&self, version: &str) -> Result<Version> {
        let trimmed = version.trim();
        // Accept a leading `v` or `=` the way tag-derived versions are often written
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('='))
            .unwrap_or(trimmed);

        Version::parse(trimmed).map_err(|_| VersionError::InvalidVersion(version.to_string()).into())
    }

    fn bump(&self, current: &Version, bump_type: BumpType) -> Version {
        let mut next = current.clone();
        let was_prerelease = !next.pre.is_empty();

        match bump_type {
            BumpType::Major => {
                // A prerelease of x.0.0 is released as x.0.0
                if !(was_prerelease && next.minor == 0 && next.patch == 0) {
                    next.major += 1;
                }
                next.minor = 0;
                next.patch = 0;
            }
            BumpType::Minor => {
                if !(was_prerelease && next.patch == 0) {
                    next.minor += 1;
                }
                next.patch = 0;
            }
            BumpType::Patch => {
                if !was_prerelease {
                    next.patch += 1;
                }
            }
        }

        next.pre = Prerelease::EMPTY;
        next.build = BuildMetadata::EMPTY;
        next
    }
}

/// Compute the next version from a version string and a bump type name.
///
/// Unrecognised bump types are treated as `patch`. Fails with
/// `VersionError::InvalidVersion` when `current` is not a semantic version.
pub fn bump_version(current: &str, bump_type: &str) -> Result<String> {
    let strategy = SemVerStrategy::new();
    let version = strategy.parse(current)?;
    let bump = BumpType::parse_lenient(bump_type);
    let next = strategy.bump(&version, bump);
    debug!(current, bump = %bump, next = %next, "bumped version");
    Ok(next.to_string())
}
