//! Language ecosystems and their version files

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use bumpwright_core::error::AdapterError;

use crate::workspace::Workspace;
use crate::{cargo, csharp, go, java, npm, php, python, ruby, swift};

/// How an ecosystem announces itself in the top-level directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// An exact file name
    File(&'static str),
    /// Any top-level file with this suffix
    Extension(&'static str),
}

/// What happened to one version file
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was rewritten
    Updated(PathBuf),
    /// The file exists but could not be rewritten
    Skipped { path: PathBuf, error: AdapterError },
}

/// Read, transform and write back one file. Missing files yield `None`.
pub(crate) fn rewrite_file<F>(ws: &dyn Workspace, path: &Path, transform: F) -> Option<FileOutcome>
where
    F: FnOnce(&str) -> Result<String, AdapterError>,
{
    if !ws.exists(path) {
        return None;
    }

    let result = ws
        .read_to_string(path)
        .and_then(|content| transform(&content))
        .and_then(|updated| ws.write(path, &updated));

    Some(match result {
        Ok(()) => {
            debug!(path = %path.display(), "rewrote version file");
            FileOutcome::Updated(path.to_path_buf())
        }
        Err(error) => {
            warn!(path = %path.display(), error = %error, "skipping version file");
            FileOutcome::Skipped {
                path: path.to_path_buf(),
                error,
            }
        }
    })
}

/// Outcome for a list-producing step that failed before touching any file
pub(crate) fn listing_failed(pattern: &str, error: AdapterError) -> FileOutcome {
    warn!(pattern, error = %error, "could not list files");
    FileOutcome::Skipped {
        path: PathBuf::from(pattern),
        error,
    }
}

/// Supported language ecosystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ecosystem {
    Python,
    NodeJs,
    Rust,
    Go,
    Java,
    CSharp,
    Ruby,
    Php,
    Swift,
}

impl Ecosystem {
    /// Every ecosystem, in processing order
    pub const ALL: [Ecosystem; 9] = [
        Self::Python,
        Self::NodeJs,
        Self::Rust,
        Self::Go,
        Self::Java,
        Self::CSharp,
        Self::Ruby,
        Self::Php,
        Self::Swift,
    ];

    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::NodeJs => "nodejs",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Java => "java",
            Self::CSharp => "csharp",
            Self::Ruby => "ruby",
            Self::Php => "php",
            Self::Swift => "swift",
        }
    }

    /// Marker files; any one present means the ecosystem is in use
    pub fn markers(&self) -> &'static [Marker] {
        use Marker::{Extension, File};
        match self {
            Self::Python => &[File("setup.py"), File("pyproject.toml"), File("setup.cfg")],
            Self::NodeJs => &[File("package.json")],
            Self::Rust => &[File("Cargo.toml")],
            Self::Go => &[File("go.mod")],
            Self::Java => &[File("pom.xml"), File("build.gradle"), File("build.gradle.kts")],
            Self::CSharp => &[Extension(".csproj"), Extension(".fsproj")],
            Self::Ruby => &[Extension(".gemspec"), File("Gemfile")],
            Self::Php => &[File("composer.json")],
            Self::Swift => &[File("Package.swift")],
        }
    }

    /// Whether any marker is present at the top level
    pub fn detect(&self, ws: &dyn Workspace) -> bool {
        self.markers().iter().any(|marker| match marker {
            Marker::File(name) => ws.exists(Path::new(name)),
            Marker::Extension(suffix) => ws
                .top_level_with_suffix(suffix)
                .map(|files| !files.is_empty())
                .unwrap_or(false),
        })
    }

    /// All ecosystems present in the workspace
    pub fn detect_all(ws: &dyn Workspace) -> Vec<Ecosystem> {
        Self::ALL.into_iter().filter(|e| e.detect(ws)).collect()
    }

    /// Rewrite this ecosystem's version files
    pub fn rewrite(&self, ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
        match self {
            Self::Python => python::rewrite(ws, version),
            Self::NodeJs => npm::rewrite(ws, version),
            Self::Rust => cargo::rewrite(ws, version),
            Self::Go => go::rewrite(ws, version),
            Self::Java => java::rewrite(ws, version),
            Self::CSharp => csharp::rewrite(ws, version),
            Self::Ruby => ruby::rewrite(ws, version),
            Self::Php => php::rewrite(ws, version),
            Self::Swift => swift::rewrite(ws, version),
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::MemoryWorkspace;

    #[test]
    fn test_detect_by_file() {
        let ws = MemoryWorkspace::new()
            .with_file("setup.cfg", "")
            .with_file("Cargo.toml", "");

        assert_eq!(
            Ecosystem::detect_all(&ws),
            vec![Ecosystem::Python, Ecosystem::Rust]
        );
    }

    #[test]
    fn test_detect_by_extension() {
        let ws = MemoryWorkspace::new()
            .with_file("App.fsproj", "")
            .with_file("mygem.gemspec", "");

        assert_eq!(
            Ecosystem::detect_all(&ws),
            vec![Ecosystem::CSharp, Ecosystem::Ruby]
        );
    }

    #[test]
    fn test_nested_markers_ignored() {
        let ws = MemoryWorkspace::new()
            .with_file("web/package.json", "{}")
            .with_file("src/App.csproj", "");

        assert!(Ecosystem::detect_all(&ws).is_empty());
    }

    #[test]
    fn test_gemfile_marks_ruby() {
        let ws = MemoryWorkspace::new().with_file("Gemfile", "");
        assert!(Ecosystem::Ruby.detect(&ws));
        assert!(!Ecosystem::Php.detect(&ws));
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = Ecosystem::ALL.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            names,
            ["python", "nodejs", "rust", "go", "java", "csharp", "ruby", "php", "swift"]
        );
    }

    #[test]
    fn test_rewrite_file_missing_is_none() {
        let ws = MemoryWorkspace::new();
        assert!(rewrite_file(&ws, Path::new("pom.xml"), |c| Ok(c.to_string())).is_none());
    }

    #[test]
    fn test_rewrite_file_failure_is_skipped() {
        let ws = MemoryWorkspace::new().with_file("pom.xml", "<project/>");
        let outcome = rewrite_file(&ws, Path::new("pom.xml"), |_| {
            Err(AdapterError::VersionFieldMissing(PathBuf::from("pom.xml")))
        });

        assert!(matches!(outcome, Some(FileOutcome::Skipped { .. })));
        assert_eq!(ws.get("pom.xml").as_deref(), Some("<project/>"));
    }
}
