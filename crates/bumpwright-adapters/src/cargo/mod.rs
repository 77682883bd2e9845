//! Cargo.toml version

use std::path::Path;

use toml_edit::{DocumentMut, Item};

use bumpwright_core::error::AdapterError;

use crate::ecosystem::{rewrite_file, FileOutcome};
use crate::text::set_toml_string;
use crate::workspace::Workspace;

fn is_string(item: Option<&Item>) -> bool {
    item.and_then(Item::as_str).is_some()
}

/// Set `package.version` and `workspace.package.version` where they hold a literal.
///
/// A member that inherits with `version.workspace = true` is left alone.
pub fn set_cargo_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    let mut doc: DocumentMut = content.parse().map_err(|e| AdapterError::parse(path, e))?;
    let mut changed = false;

    if is_string(doc.get("package").and_then(|p| p.get("version"))) {
        set_toml_string(&mut doc["package"]["version"], version);
        changed = true;
    }

    let workspace_version = doc
        .get("workspace")
        .and_then(|w| w.get("package"))
        .and_then(|p| p.get("version"));
    if is_string(workspace_version) {
        set_toml_string(&mut doc["workspace"]["package"]["version"], version);
        changed = true;
    }

    if !changed {
        return Err(AdapterError::VersionFieldMissing(path.to_path_buf()));
    }
    Ok(doc.to_string())
}

pub(crate) fn rewrite(ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
    let manifest = Path::new("Cargo.toml");
    rewrite_file(ws, manifest, |c| set_cargo_version(c, version, manifest))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_version_preserves_formatting() {
        let original = r#"[package]
name = "test-crate"
version = "1.0.0"
edition = "2021"

# This is a comment

[dependencies]
serde = { version = "1.0", features = ["derive"] }
"#;
        let updated = set_cargo_version(original, "2.0.0", Path::new("Cargo.toml")).unwrap();

        assert!(updated.contains("version = \"2.0.0\"\nedition"));
        assert!(updated.contains("# This is a comment"));
        // Dependency versions are not package versions
        assert!(updated.contains("serde = { version = \"1.0\""));
    }

    #[test]
    fn test_workspace_package_version() {
        let original = r#"[workspace]
members = ["crates/*"]

[workspace.package]
version = "0.3.0"
edition = "2021"
"#;
        let updated = set_cargo_version(original, "0.4.0", Path::new("Cargo.toml")).unwrap();
        let doc: DocumentMut = updated.parse().unwrap();
        assert_eq!(doc["workspace"]["package"]["version"].as_str(), Some("0.4.0"));
    }

    #[test]
    fn test_inherited_version_left_alone() {
        let original = "[package]\nname = \"member\"\nversion.workspace = true\n";
        assert!(matches!(
            set_cargo_version(original, "1.0.0", Path::new("Cargo.toml")),
            Err(AdapterError::VersionFieldMissing(_))
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            set_cargo_version("[package", "1.0.0", Path::new("Cargo.toml")),
            Err(AdapterError::ManifestParseError { .. })
        ));
    }
}
