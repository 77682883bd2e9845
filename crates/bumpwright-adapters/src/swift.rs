//! Package.swift version constant

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use bumpwright_core::error::AdapterError;

use crate::ecosystem::{rewrite_file, FileOutcome};
use crate::text::replace_first;
use crate::workspace::Workspace;

static LET_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"let\s+version\s*=\s*"[^"]+""#).expect("Invalid regex"));

/// Replace the first `let version = "..."`
pub fn set_package_swift_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    replace_first(&LET_VERSION, content, &format!("let version = \"{}\"", version), path)
}

pub(crate) fn rewrite(ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
    let manifest = Path::new("Package.swift");
    rewrite_file(ws, manifest, |c| set_package_swift_version(c, version, manifest))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_swift() {
        let manifest = "// swift-tools-version:5.9\nimport PackageDescription\n\nlet version   =  \"1.0.0\"\n";
        let updated = set_package_swift_version(manifest, "1.1.0", Path::new("Package.swift")).unwrap();
        assert!(updated.ends_with("let version = \"1.1.0\"\n"));
    }

    #[test]
    fn test_manifest_without_constant() {
        let manifest = "import PackageDescription\nlet package = Package(name: \"Demo\")\n";
        assert!(set_package_swift_version(manifest, "1.1.0", Path::new("Package.swift")).is_err());
    }
}
