//! Exit codes for the CLI

use bumpwright_core::error::{ConfigError, HostError, VersionError};
use bumpwright_core::BumpwrightError;

/// Success
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git or host error
pub const GIT_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Map a top-level failure to an exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<BumpwrightError>() {
        return match err {
            BumpwrightError::Config(_) => CONFIG_ERROR,
            BumpwrightError::Host(_) => GIT_ERROR,
            BumpwrightError::Version(_) => VERSION_ERROR,
            _ => ERROR,
        };
    }

    if err.is::<ConfigError>() {
        CONFIG_ERROR
    } else if err.is::<HostError>() {
        GIT_ERROR
    } else if err.is::<VersionError>() {
        VERSION_ERROR
    } else {
        ERROR
    }
}
