//! composer.json version

use std::path::Path;

use serde_json::Value;

use bumpwright_core::error::AdapterError;

use crate::ecosystem::{rewrite_file, FileOutcome};
use crate::text::{parse_object, to_json};
use crate::workspace::Workspace;

const INDENT: usize = 4;

/// Set `.version` in composer.json
pub fn set_composer_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    let mut manifest = parse_object(content, path)?;
    manifest.insert("version".to_string(), Value::from(version));
    to_json(&manifest, INDENT, path)
}

pub(crate) fn rewrite(ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
    let manifest = Path::new("composer.json");
    rewrite_file(ws, manifest, |c| set_composer_version(c, version, manifest))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composer_four_space_indent() {
        let original = r#"{"name": "acme/demo", "version": "1.0.0", "require": {"php": ">=8.1"}}"#;
        let updated = set_composer_version(original, "1.0.1", Path::new("composer.json")).unwrap();

        assert_eq!(
            updated,
            "{\n    \"name\": \"acme/demo\",\n    \"version\": \"1.0.1\",\n    \"require\": {\n        \"php\": \">=8.1\"\n    }\n}\n"
        );
    }
}
