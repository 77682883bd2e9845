//! Go version constant

use std::path::Path;

use tracing::{debug, warn};

use crate::ecosystem::FileOutcome;
use crate::workspace::Workspace;

/// File that carries the `Version` constant
pub const VERSION_FILE: &str = "version.go";

/// Contents of the generated version file
pub fn render_version_go(version: &str) -> String {
    format!("package main\n\nconst Version = \"{}\"\n", version)
}

/// version.go is generated, not merged, so it is written whether or not it exists
pub(crate) fn rewrite(ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
    let path = Path::new(VERSION_FILE);
    let outcome = match ws.write(path, &render_version_go(version)) {
        Ok(()) => {
            debug!(path = VERSION_FILE, "wrote version constant");
            FileOutcome::Updated(path.to_path_buf())
        }
        Err(error) => {
            warn!(path = VERSION_FILE, error = %error, "skipping version file");
            FileOutcome::Skipped {
                path: path.to_path_buf(),
                error,
            }
        }
    };
    vec![outcome]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::MemoryWorkspace;

    #[test]
    fn test_version_go_overwritten() {
        let ws = MemoryWorkspace::new()
            .with_file("go.mod", "module example.com/demo\n")
            .with_file("version.go", "package main\n\n// old\nconst Version = \"0.1.0\"\n");

        let outcomes = rewrite(&ws, "0.2.0");
        assert!(matches!(&outcomes[..], [FileOutcome::Updated(_)]));
        assert_eq!(
            ws.get("version.go").as_deref(),
            Some("package main\n\nconst Version = \"0.2.0\"\n")
        );
    }
}
