//! Version file updater

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use bumpwright_core::error::AdapterError;

use crate::ecosystem::{Ecosystem, FileOutcome};
use crate::workspace::Workspace;

/// Default name of the plain version marker file
pub const DEFAULT_VERSION_FILE: &str = ".version";

/// A file that existed but could not be rewritten
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: AdapterError,
}

/// What an update run touched
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Ecosystems detected at the top level
    pub ecosystems: Vec<Ecosystem>,
    /// Rewritten files, in processing order
    pub updated: Vec<PathBuf>,
    /// Files left untouched because their rewrite failed
    pub skipped: Vec<SkippedFile>,
}

impl UpdateReport {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Updated(path) => self.updated.push(path),
            FileOutcome::Skipped { path, error } => self.skipped.push(SkippedFile { path, error }),
        }
    }
}

/// Rewrites version fields across all detected ecosystems
pub struct VersionFileUpdater<'a> {
    workspace: &'a dyn Workspace,
    version_file: PathBuf,
}

impl<'a> VersionFileUpdater<'a> {
    /// Updater over `workspace`
    pub fn new(workspace: &'a dyn Workspace) -> Self {
        Self {
            workspace,
            version_file: PathBuf::from(DEFAULT_VERSION_FILE),
        }
    }

    /// Use a different marker file name
    pub fn with_version_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.version_file = path.into();
        self
    }

    /// Ecosystems present in the workspace
    pub fn detect(&self) -> Vec<Ecosystem> {
        Ecosystem::detect_all(self.workspace)
    }

    /// Write `version` into every detected ecosystem's files, then the marker file.
    ///
    /// Per-file failures are recorded in the report. Only a failure to write
    /// the marker file is an error.
    #[instrument(skip(self))]
    pub fn update(&self, version: &str) -> Result<UpdateReport, AdapterError> {
        let mut report = UpdateReport {
            ecosystems: self.detect(),
            ..Default::default()
        };

        let names: Vec<&str> = report.ecosystems.iter().map(Ecosystem::name).collect();
        info!(ecosystems = ?names, "Detected project types");

        for ecosystem in report.ecosystems.clone() {
            for outcome in ecosystem.rewrite(self.workspace, version) {
                report.record(outcome);
            }
        }

        self.workspace.write(&self.version_file, version)?;
        report.updated.push(self.version_file.clone());

        if !report.skipped.is_empty() {
            warn!(count = report.skipped.len(), "Some version files were skipped");
        }
        info!(updated = report.updated.len(), "Updated version files");
        Ok(report)
    }

    /// Marker file path
    pub fn version_file(&self) -> &Path {
        &self.version_file
    }
}

/// Update all version files in `workspace`
pub fn update_version_files(workspace: &dyn Workspace, version: &str) -> Result<UpdateReport, AdapterError> {
    VersionFileUpdater::new(workspace).update(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::{MemoryWorkspace, OsWorkspace};
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_empty_workspace_writes_marker_only() {
        let ws = MemoryWorkspace::new();
        let report = update_version_files(&ws, "1.0.0").unwrap();

        assert!(report.ecosystems.is_empty());
        assert_eq!(report.updated, vec![PathBuf::from(".version")]);
        assert_eq!(ws.get(".version").as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_polyglot_workspace() {
        let ws = MemoryWorkspace::new()
            .with_file("package.json", r#"{"name":"web","version":"0.9.0"}"#)
            .with_file("Cargo.toml", "[package]\nname = \"core\"\nversion = \"0.9.0\"\n")
            .with_file("composer.json", r#"{"name":"acme/x"}"#)
            .with_file("Package.swift", "import PackageDescription\n");

        let report = VersionFileUpdater::new(&ws)
            .with_version_file("VERSION")
            .update("1.0.0")
            .unwrap();

        assert_eq!(
            report.ecosystems,
            vec![Ecosystem::NodeJs, Ecosystem::Rust, Ecosystem::Php, Ecosystem::Swift]
        );
        assert_eq!(
            report.updated,
            vec![
                PathBuf::from("package.json"),
                PathBuf::from("Cargo.toml"),
                PathBuf::from("composer.json"),
                PathBuf::from("VERSION"),
            ]
        );
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, PathBuf::from("Package.swift"));

        let package: Value = serde_json::from_str(&ws.get("package.json").unwrap()).unwrap();
        assert_eq!(package["version"], "1.0.0");
        assert!(ws.get(".version").is_none());
    }

    #[test]
    fn test_os_workspace_end_to_end() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("go.mod"), "module example.com/x\n").unwrap();
        std::fs::write(temp.path().join("setup.py"), "setup(version=\"0.0.1\")\n").unwrap();

        let ws = OsWorkspace::new(temp.path());
        let report = update_version_files(&ws, "0.1.0").unwrap();

        assert_eq!(report.ecosystems, vec![Ecosystem::Python, Ecosystem::Go]);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("setup.py")).unwrap(),
            "setup(version=\"0.1.0\")\n"
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join("version.go")).unwrap(),
            "package main\n\nconst Version = \"0.1.0\"\n"
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join(".version")).unwrap(),
            "0.1.0"
        );
    }
}
