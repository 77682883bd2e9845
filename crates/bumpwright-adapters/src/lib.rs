//! bumpwright adapters - Version file updates
//!
//! Detects which language ecosystems a project uses from marker files and
//! rewrites the version field in each ecosystem's manifests.

pub mod cargo;
pub mod csharp;
pub mod ecosystem;
pub mod go;
pub mod java;
pub mod npm;
pub mod php;
pub mod python;
pub mod ruby;
pub mod swift;
mod text;
pub mod updater;
pub mod workspace;

pub use ecosystem::{Ecosystem, FileOutcome, Marker};
pub use updater::{update_version_files, SkippedFile, UpdateReport, VersionFileUpdater};
pub use workspace::{MemoryWorkspace, OsWorkspace, Workspace};
