//! Python version files: pyproject.toml, setup.py and `__version__` in packages

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use toml_edit::{DocumentMut, Item};
use tracing::debug;

use bumpwright_core::error::AdapterError;

use crate::ecosystem::{listing_failed, rewrite_file, FileOutcome};
use crate::text::{replace_first, set_toml_string};
use crate::workspace::Workspace;

static SETUP_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version\s*=\s*["'][^"']+["']"#).expect("Invalid regex"));

static DUNDER_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"__version__\s*=\s*["'][^"']+["']"#).expect("Invalid regex"));

/// Whether `[project]` declares its version as dynamic
fn version_is_dynamic(project: &Item) -> bool {
    project
        .get("dynamic")
        .and_then(|d| d.as_array())
        .map(|arr| arr.iter().any(|v| v.as_str() == Some("version")))
        .unwrap_or(false)
}

/// Set `project.version`, or `tool.poetry.version`, preserving formatting
pub fn set_pyproject_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    let mut doc: DocumentMut = content.parse().map_err(|e| AdapterError::parse(path, e))?;

    let has_static_project = doc
        .get("project")
        .map(|p| p.is_table_like() && !version_is_dynamic(p))
        .unwrap_or(false);

    if has_static_project {
        set_toml_string(&mut doc["project"]["version"], version);
    } else if doc
        .get("tool")
        .and_then(|t| t.get("poetry"))
        .map(Item::is_table_like)
        .unwrap_or(false)
    {
        set_toml_string(&mut doc["tool"]["poetry"]["version"], version);
    } else {
        return Err(AdapterError::VersionFieldMissing(path.to_path_buf()));
    }

    Ok(doc.to_string())
}

/// Replace the first `version="..."` keyword in setup.py
pub fn set_setup_py_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    replace_first(&SETUP_VERSION, content, &format!("version=\"{}\"", version), path)
}

/// Replace the first `__version__ = "..."` assignment
pub fn set_dunder_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    replace_first(&DUNDER_VERSION, content, &format!("__version__ = \"{}\"", version), path)
}

pub(crate) fn rewrite(ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
    let mut outcomes = Vec::new();

    let pyproject = Path::new("pyproject.toml");
    outcomes.extend(rewrite_file(ws, pyproject, |c| set_pyproject_version(c, version, pyproject)));

    let setup = Path::new("setup.py");
    outcomes.extend(rewrite_file(ws, setup, |c| set_setup_py_version(c, version, setup)));

    let pattern = "**/__init__.py";
    match ws.find_files(pattern) {
        Ok(files) => {
            for file in files {
                let declares_version = ws
                    .read_to_string(&file)
                    .map(|c| c.contains("__version__"))
                    .unwrap_or(false);
                if !declares_version {
                    continue;
                }
                debug!(path = %file.display(), "package declares __version__");
                outcomes.extend(rewrite_file(ws, &file, |c| set_dunder_version(c, version, &file)));
            }
        }
        Err(e) => outcomes.push(listing_failed(pattern, e)),
    }

    outcomes
}
