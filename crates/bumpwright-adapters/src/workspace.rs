//! Filesystem capability handed to the updater
//!
//! All paths are relative to the workspace root.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use globset::{Glob, GlobMatcher};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use bumpwright_core::error::AdapterError;

/// Directories never descended into by recursive searches
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules", "venv", ".venv", "target"];

/// Read/write access to a project tree
pub trait Workspace: Send + Sync {
    /// Whether a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a file as UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String, AdapterError>;

    /// Create or overwrite a file
    fn write(&self, path: &Path, content: &str) -> Result<(), AdapterError>;

    /// Files directly under the root, sorted by name
    fn top_level_files(&self) -> Result<Vec<PathBuf>, AdapterError>;

    /// Files anywhere in the tree matching a glob, sorted.
    /// Hidden and excluded directories are skipped.
    fn find_files(&self, pattern: &str) -> Result<Vec<PathBuf>, AdapterError>;

    /// Top-level files whose name ends with `suffix`
    fn top_level_with_suffix(&self, suffix: &str) -> Result<Vec<PathBuf>, AdapterError> {
        Ok(self
            .top_level_files()?
            .into_iter()
            .filter(|p| p.to_string_lossy().ends_with(suffix))
            .collect())
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher, AdapterError> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|e| AdapterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

fn is_skipped_dir(name: &str, exclude_dirs: &[String]) -> bool {
    name.starts_with('.') || exclude_dirs.iter().any(|d| d == name)
}

/// Workspace backed by the real filesystem
#[derive(Debug, Clone)]
pub struct OsWorkspace {
    root: PathBuf,
    exclude_dirs: Vec<String>,
}

impl OsWorkspace {
    /// Workspace rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the excluded directory names
    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    fn keep_entry(&self, entry: &DirEntry) -> bool {
        // Never filter the root itself
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        !is_skipped_dir(&entry.file_name().to_string_lossy(), &self.exclude_dirs)
    }
}

impl Workspace for OsWorkspace {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, AdapterError> {
        let full = self.resolve(path);
        std::fs::read_to_string(&full).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AdapterError::ManifestNotFound(path.to_path_buf()),
            _ => AdapterError::Io(e),
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), AdapterError> {
        std::fs::write(self.resolve(path), content).map_err(|e| AdapterError::update(path, e))
    }

    fn top_level_files(&self) -> Result<Vec<PathBuf>, AdapterError> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(PathBuf::from(entry.file_name()));
            }
        }
        files.sort();
        Ok(files)
    }

    fn find_files(&self, pattern: &str) -> Result<Vec<PathBuf>, AdapterError> {
        let matcher = compile(pattern)?;
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.keep_entry(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if matcher.is_match(relative) {
                files.push(relative.to_path_buf());
            }
        }

        files.sort();
        debug!(pattern, count = files.len(), "found files");
        Ok(files)
    }
}

/// In-memory workspace
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    files: RwLock<BTreeMap<PathBuf, String>>,
    exclude_dirs: Vec<String>,
}

impl MemoryWorkspace {
    /// Empty workspace with the default excluded directories
    pub fn new() -> Self {
        Self {
            files: RwLock::new(BTreeMap::new()),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add a file
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.into());
        }
        self
    }

    /// Current content of a file
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().ok()?.get(path.as_ref()).cloned()
    }

    /// All paths, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn in_skipped_dir(&self, path: &Path) -> bool {
        let mut components: Vec<Component<'_>> = path.components().collect();
        // The last component is the file name
        components.pop();
        components.iter().any(|c| match c {
            Component::Normal(name) => is_skipped_dir(&name.to_string_lossy(), &self.exclude_dirs),
            _ => false,
        })
    }
}

fn poisoned() -> AdapterError {
    AdapterError::Io(std::io::Error::other("workspace lock poisoned"))
}

impl Workspace for MemoryWorkspace {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, AdapterError> {
        self.files
            .read()
            .map_err(|_| poisoned())?
            .get(path)
            .cloned()
            .ok_or_else(|| AdapterError::ManifestNotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), AdapterError> {
        self.files
            .write()
            .map_err(|_| poisoned())?
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn top_level_files(&self) -> Result<Vec<PathBuf>, AdapterError> {
        Ok(self
            .paths()
            .into_iter()
            .filter(|p| p.components().count() == 1)
            .collect())
    }

    fn find_files(&self, pattern: &str) -> Result<Vec<PathBuf>, AdapterError> {
        let matcher = compile(pattern)?;
        Ok(self
            .paths()
            .into_iter()
            .filter(|p| !self.in_skipped_dir(p) && matcher.is_match(p))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, path: &str, content: &str) {
        let full = root.join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, content).unwrap();
    }

    #[test]
    fn test_os_find_files_recursive() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "__init__.py", "");
        write(temp.path(), "pkg/__init__.py", "");
        write(temp.path(), "pkg/sub/__init__.py", "");
        write(temp.path(), "node_modules/dep/__init__.py", "");
        write(temp.path(), "venv/lib/__init__.py", "");
        write(temp.path(), ".git/hooks/__init__.py", "");
        write(temp.path(), "pkg/not_init.py", "");

        let ws = OsWorkspace::new(temp.path());
        let found = ws.find_files("**/__init__.py").unwrap();

        assert_eq!(
            found,
            vec![
                PathBuf::from("__init__.py"),
                PathBuf::from("pkg/__init__.py"),
                PathBuf::from("pkg/sub/__init__.py"),
            ]
        );
    }

    #[test]
    fn test_os_custom_excludes() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "vendor/lib/version.rb", "");
        write(temp.path(), "lib/gem/version.rb", "");

        let ws = OsWorkspace::new(temp.path()).with_exclude_dirs(vec!["vendor".to_string()]);
        let found = ws.find_files("**/version.rb").unwrap();

        assert_eq!(found, vec![PathBuf::from("lib/gem/version.rb")]);
    }

    #[test]
    fn test_os_read_write_top_level() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.csproj", "<Project/>");
        write(temp.path(), "a.txt", "x");
        write(temp.path(), "src/c.csproj", "");

        let ws = OsWorkspace::new(temp.path());
        assert_eq!(
            ws.top_level_files().unwrap(),
            vec![PathBuf::from("a.txt"), PathBuf::from("b.csproj")]
        );
        assert_eq!(
            ws.top_level_with_suffix(".csproj").unwrap(),
            vec![PathBuf::from("b.csproj")]
        );

        ws.write(Path::new(".version"), "1.2.3").unwrap();
        assert!(ws.exists(Path::new(".version")));
        assert_eq!(ws.read_to_string(Path::new(".version")).unwrap(), "1.2.3");
    }

    #[test]
    fn test_os_missing_file() {
        let temp = TempDir::new().unwrap();
        let ws = OsWorkspace::new(temp.path());
        assert!(!ws.exists(Path::new("package.json")));
        assert!(matches!(
            ws.read_to_string(Path::new("package.json")),
            Err(AdapterError::ManifestNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let ws = MemoryWorkspace::new();
        assert!(matches!(
            ws.find_files("**/[unclosed"),
            Err(AdapterError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_memory_workspace() {
        let ws = MemoryWorkspace::new()
            .with_file("Gemfile", "")
            .with_file("lib/foo/version.rb", "")
            .with_file("node_modules/x/version.rb", "")
            .with_file(".bundle/version.rb", "");

        assert_eq!(ws.top_level_files().unwrap(), vec![PathBuf::from("Gemfile")]);
        assert_eq!(
            ws.find_files("**/version.rb").unwrap(),
            vec![PathBuf::from("lib/foo/version.rb")]
        );

        ws.write(Path::new("Gemfile"), "source 'x'").unwrap();
        assert_eq!(ws.get("Gemfile").as_deref(), Some("source 'x'"));
    }
}
