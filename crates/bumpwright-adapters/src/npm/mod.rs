//! npm version files: package.json and package-lock.json

use std::path::Path;

use serde_json::Value;

use bumpwright_core::error::AdapterError;

use crate::ecosystem::{rewrite_file, FileOutcome};
use crate::text::{parse_object, to_json};
use crate::workspace::Workspace;

const INDENT: usize = 2;

/// Set `.version` in package.json
pub fn set_package_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    let mut manifest = parse_object(content, path)?;
    manifest.insert("version".to_string(), Value::from(version));
    to_json(&manifest, INDENT, path)
}

/// Set `.version` and the root package entry in package-lock.json
pub fn set_lockfile_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    let mut lock = parse_object(content, path)?;
    lock.insert("version".to_string(), Value::from(version));

    if let Some(root) = lock
        .get_mut("packages")
        .and_then(|p| p.get_mut(""))
        .and_then(Value::as_object_mut)
    {
        root.insert("version".to_string(), Value::from(version));
    }

    to_json(&lock, INDENT, path)
}

pub(crate) fn rewrite(ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
    let manifest = Path::new("package.json");
    let lockfile = Path::new("package-lock.json");

    [
        rewrite_file(ws, manifest, |c| set_package_version(c, version, manifest)),
        rewrite_file(ws, lockfile, |c| set_lockfile_version(c, version, lockfile)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::MemoryWorkspace;

    #[test]
    fn test_package_json_round_trip() {
        let original = r#"{"name":"demo","version":"1.0.0","scripts":{"test":"jest"},"private":true}"#;
        let updated = set_package_version(original, "1.1.0", Path::new("package.json")).unwrap();

        assert_eq!(
            updated,
            "{\n  \"name\": \"demo\",\n  \"version\": \"1.1.0\",\n  \"scripts\": {\n    \"test\": \"jest\"\n  },\n  \"private\": true\n}\n"
        );
        let value: Value = serde_json::from_str(&updated).unwrap();
        assert_eq!(value["version"], "1.1.0");
    }

    #[test]
    fn test_package_json_without_version() {
        let updated = set_package_version(r#"{"name":"demo"}"#, "0.1.0", Path::new("package.json")).unwrap();
        let value: Value = serde_json::from_str(&updated).unwrap();
        assert_eq!(value["version"], "0.1.0");
    }

    #[test]
    fn test_lockfile_root_package() {
        let original = r#"{
  "name": "demo",
  "version": "1.0.0",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "demo", "version": "1.0.0" },
    "node_modules/left-pad": { "version": "1.3.0" }
  }
}"#;
        let updated = set_lockfile_version(original, "2.0.0", Path::new("package-lock.json")).unwrap();
        let value: Value = serde_json::from_str(&updated).unwrap();

        assert_eq!(value["version"], "2.0.0");
        assert_eq!(value["packages"][""]["version"], "2.0.0");
        assert_eq!(value["packages"]["node_modules/left-pad"]["version"], "1.3.0");
    }

    #[test]
    fn test_malformed_package_json_skipped() {
        let ws = MemoryWorkspace::new()
            .with_file("package.json", "{ not json")
            .with_file("package-lock.json", r#"{"version":"1.0.0"}"#);

        let outcomes = rewrite(&ws, "1.0.1");
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(&outcomes[0], FileOutcome::Skipped { .. }));
        assert!(matches!(&outcomes[1], FileOutcome::Updated(_)));
        assert_eq!(ws.get("package.json").as_deref(), Some("{ not json"));
    }
}
