//! .NET project files (*.csproj, *.fsproj)

use std::path::Path;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use bumpwright_core::error::AdapterError;

use crate::ecosystem::{listing_failed, rewrite_file, FileOutcome};
use crate::workspace::Workspace;

const PROJECT_SUFFIXES: [&str; 2] = [".csproj", ".fsproj"];
const VERSION_TAGS: [&str; 3] = ["Version", "AssemblyVersion", "FileVersion"];

static TAG_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    VERSION_TAGS
        .iter()
        .map(|tag| {
            let pattern = format!("<{tag}>[^<]+</{tag}>");
            (*tag, Regex::new(&pattern).expect("Invalid regex"))
        })
        .collect()
});

/// Rewrite every version tag; add `<Version>` to the first PropertyGroup if absent
pub fn set_project_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    let mut updated = content.to_string();
    let mut changed = false;

    for (tag, pattern) in TAG_PATTERNS.iter() {
        if pattern.is_match(&updated) {
            let replacement = format!("<{tag}>{version}</{tag}>");
            updated = pattern.replace_all(&updated, NoExpand(&replacement)).into_owned();
            changed = true;
        }
    }

    if !updated.contains("<Version>") && updated.contains("</PropertyGroup>") {
        updated = updated.replacen(
            "</PropertyGroup>",
            &format!("  <Version>{version}</Version>\n  </PropertyGroup>"),
            1,
        );
        changed = true;
    }

    if !changed {
        return Err(AdapterError::VersionFieldMissing(path.to_path_buf()));
    }
    Ok(updated)
}

pub(crate) fn rewrite(ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
    let mut outcomes = Vec::new();

    for suffix in PROJECT_SUFFIXES {
        match ws.top_level_with_suffix(suffix) {
            Ok(files) => {
                for file in files {
                    outcomes.extend(rewrite_file(ws, &file, |c| set_project_version(c, version, &file)));
                }
            }
            Err(e) => outcomes.push(listing_failed(suffix, e)),
        }
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::MemoryWorkspace;

    #[test]
    fn test_existing_tags_rewritten() {
        let project = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <Version>1.0.0</Version>
    <AssemblyVersion>1.0.0.0</AssemblyVersion>
    <FileVersion>1.0.0.0</FileVersion>
  </PropertyGroup>
</Project>"#;
        let updated = set_project_version(project, "1.2.0", Path::new("App.csproj")).unwrap();

        assert!(updated.contains("<Version>1.2.0</Version>"));
        assert!(updated.contains("<AssemblyVersion>1.2.0</AssemblyVersion>"));
        assert!(updated.contains("<FileVersion>1.2.0</FileVersion>"));
        assert_eq!(updated.matches("<Version>").count(), 1);
    }

    #[test]
    fn test_version_inserted() {
        let project = "<Project>\n  <PropertyGroup>\n    <OutputType>Exe</OutputType>\n  </PropertyGroup>\n</Project>";
        let updated = set_project_version(project, "0.1.0", Path::new("App.csproj")).unwrap();

        assert_eq!(
            updated,
            "<Project>\n  <PropertyGroup>\n    <OutputType>Exe</OutputType>\n    <Version>0.1.0</Version>\n  </PropertyGroup>\n</Project>"
        );
    }

    #[test]
    fn test_no_property_group() {
        assert!(set_project_version("<Project />", "0.1.0", Path::new("App.csproj")).is_err());
    }

    #[test]
    fn test_rewrite_all_project_files() {
        let ws = MemoryWorkspace::new()
            .with_file("App.csproj", "<Project><PropertyGroup><Version>1.0.0</Version></PropertyGroup></Project>")
            .with_file("Lib.fsproj", "<Project><PropertyGroup></PropertyGroup></Project>")
            .with_file("tests/Tests.csproj", "<Project><PropertyGroup></PropertyGroup></Project>");

        let outcomes = rewrite(&ws, "3.0.0");
        assert_eq!(outcomes.len(), 2);
        assert!(ws.get("App.csproj").unwrap().contains("<Version>3.0.0</Version>"));
        assert!(ws.get("Lib.fsproj").unwrap().contains("<Version>3.0.0</Version>"));
        assert!(!ws.get("tests/Tests.csproj").unwrap().contains("Version"));
    }
}
