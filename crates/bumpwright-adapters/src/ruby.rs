//! Ruby version files: gemspecs and `version.rb`

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use bumpwright_core::error::AdapterError;

use crate::ecosystem::{listing_failed, rewrite_file, FileOutcome};
use crate::text::replace_first;
use crate::workspace::Workspace;

static GEMSPEC_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\.version\s*=\s*["'][^"']+["']"#).expect("Invalid regex"));

static VERSION_CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"VERSION\s*=\s*["'][^"']+["']"#).expect("Invalid regex"));

/// Replace the first `spec.version = "..."`
pub fn set_gemspec_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    replace_first(&GEMSPEC_VERSION, content, &format!(".version = \"{}\"", version), path)
}

/// Replace the first `VERSION = "..."` constant
pub fn set_version_constant(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    replace_first(&VERSION_CONSTANT, content, &format!("VERSION = \"{}\"", version), path)
}

pub(crate) fn rewrite(ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
    let mut outcomes = Vec::new();

    match ws.top_level_with_suffix(".gemspec") {
        Ok(files) => {
            for file in files {
                outcomes.extend(rewrite_file(ws, &file, |c| set_gemspec_version(c, version, &file)));
            }
        }
        Err(e) => outcomes.push(listing_failed("*.gemspec", e)),
    }

    let pattern = "**/version.rb";
    match ws.find_files(pattern) {
        Ok(files) => {
            for file in files {
                outcomes.extend(rewrite_file(ws, &file, |c| set_version_constant(c, version, &file)));
            }
        }
        Err(e) => outcomes.push(listing_failed(pattern, e)),
    }

    outcomes
}
