//! Java version files: Maven pom.xml and Gradle build scripts

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use bumpwright_core::error::AdapterError;

use crate::ecosystem::{rewrite_file, FileOutcome};
use crate::text::replace_first;
use crate::workspace::Workspace;

static POM_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<version>[^<]+</version>").expect("Invalid regex"));

static GRADLE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version\s*=\s*["'][^"']+["']"#).expect("Invalid regex"));

const GRADLE_FILES: [&str; 2] = ["build.gradle", "build.gradle.kts"];

/// Replace the first `<version>` element in document order.
///
/// When `<parent>` precedes the project's own version, that is the parent's.
pub fn set_pom_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    replace_first(&POM_VERSION, content, &format!("<version>{}</version>", version), path)
}

/// Replace the first `version = "..."` assignment
pub fn set_gradle_version(content: &str, version: &str, path: &Path) -> Result<String, AdapterError> {
    replace_first(&GRADLE_VERSION, content, &format!("version = \"{}\"", version), path)
}

pub(crate) fn rewrite(ws: &dyn Workspace, version: &str) -> Vec<FileOutcome> {
    let mut outcomes = Vec::new();

    let pom = Path::new("pom.xml");
    outcomes.extend(rewrite_file(ws, pom, |c| set_pom_version(c, version, pom)));

    for name in GRADLE_FILES {
        let gradle = Path::new(name);
        outcomes.extend(rewrite_file(ws, gradle, |c| set_gradle_version(c, version, gradle)));
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::MemoryWorkspace;

    #[test]
    fn test_pom_first_version_only() {
        let pom = r#"<project>
  <groupId>com.example</groupId>
  <artifactId>demo</artifactId>
  <version>1.0.0</version>
  <dependencies>
    <dependency>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
    </dependency>
  </dependencies>
</project>"#;
        let updated = set_pom_version(pom, "1.1.0", Path::new("pom.xml")).unwrap();

        assert!(updated.contains("<version>1.1.0</version>"));
        assert!(updated.contains("<version>4.13.2</version>"));
    }

    #[test]
    fn test_gradle_forms() {
        let groovy = "group = 'com.example'\nversion = '0.1.0'\n";
        assert_eq!(
            set_gradle_version(groovy, "0.2.0", Path::new("build.gradle")).unwrap(),
            "group = 'com.example'\nversion = \"0.2.0\"\n"
        );

        let kotlin = "version=\"0.1.0\"\n";
        assert_eq!(
            set_gradle_version(kotlin, "0.2.0", Path::new("build.gradle.kts")).unwrap(),
            "version = \"0.2.0\"\n"
        );
    }

    #[test]
    fn test_rewrite_java_project() {
        let ws = MemoryWorkspace::new()
            .with_file("pom.xml", "<project><version>1.0.0</version></project>")
            .with_file("build.gradle.kts", "plugins { java }\n");

        let outcomes = rewrite(&ws, "2.0.0");
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(&outcomes[0], FileOutcome::Updated(_)));
        // No version assignment in the Gradle script
        assert!(matches!(&outcomes[1], FileOutcome::Skipped { .. }));
    }
}
