//! GitHub Actions step outputs

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

/// Appends `name=value` records to the file named by `GITHUB_OUTPUT`
#[derive(Debug, Clone, Default)]
pub struct ActionOutputs {
    path: Option<PathBuf>,
}

impl ActionOutputs {
    /// Write to `path`; `None` disables output recording
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Whether outputs are being recorded
    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Target file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record one output
    pub fn set(&self, name: &str, value: &str) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let record = format_record(name, value, &delimiter_for(value));
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(record.as_bytes())?;
        debug!(name, path = %path.display(), "wrote step output");
        Ok(())
    }

    /// Record several outputs in order
    pub fn set_all(&self, outputs: &[(&str, &str)]) -> std::io::Result<()> {
        for (name, value) in outputs {
            self.set(name, value)?;
        }
        Ok(())
    }
}

/// A heredoc delimiter that does not occur in `value`
fn delimiter_for(value: &str) -> String {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let mut delimiter = format!("ghadelimiter_{}_{}", std::process::id(), seed);
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    delimiter
}

/// Single-line values use `name=value`, anything else the heredoc form
fn format_record(name: &str, value: &str, delimiter: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_single_line_record() {
        assert_eq!(format_record("version", "1.2.3", "EOF"), "version=1.2.3\n");
    }

    #[test]
    fn test_multiline_record() {
        assert_eq!(
            format_record("changelog", "## Notes\n- a", "EOF"),
            "changelog<<EOF\n## Notes\n- a\nEOF\n"
        );
    }

    #[test]
    fn test_delimiter_not_in_value() {
        let value = "line one\nline two";
        let delimiter = delimiter_for(value);
        assert!(delimiter.starts_with("ghadelimiter_"));
        assert!(!value.contains(&delimiter));
    }

    #[test]
    fn test_outputs_appended() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");
        std::fs::write(&path, "existing=1\n").unwrap();

        let outputs = ActionOutputs::new(Some(path.clone()));
        outputs
            .set_all(&[("previous_version", "1.0.0"), ("version", "1.1.0")])
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing=1\nprevious_version=1.0.0\nversion=1.1.0\n");
    }

    #[test]
    fn test_disabled_outputs_are_noop() {
        let outputs = ActionOutputs::default();
        assert!(!outputs.is_enabled());
        outputs.set("version", "1.0.0").unwrap();
    }
}
