//! Gradle build script updater.

use crate::error::{GitReleaseError, Result};
use crate::updaters::Updater;
use regex::Regex;

/// Updater for the top-level `version = "..."` assignment of a Gradle build
/// script (Groovy or Kotlin DSL).
pub struct GradleUpdater;

fn version_regex() -> Result<Regex> {
    Regex::new(r#"(?m)^version\s*=\s*['"]([\d.]+)['"]"#)
        .map_err(|err| GitReleaseError::config(format!("gradle version pattern: {}", err)))
}

impl Updater for GradleUpdater {
    fn read_version(&self, contents: &str) -> Result<String> {
        version_regex()?
            .captures(contents)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                GitReleaseError::version_not_found(
                    "no top-level version assignment in gradle file",
                )
            })
    }

    fn write_version(&self, contents: &str, version: &str) -> Result<String> {
        let pattern = version_regex()?;
        if !pattern.is_match(contents) {
            return Err(GitReleaseError::version_not_found(
                "no top-level version assignment in gradle file",
            ));
        }
        let replacement = format!("version = \"{}\"", version);
        Ok(pattern.replace(contents, replacement.as_str()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRADLE: &str = r#"plugins {
    id 'java'
}

version = "6.3.1"

dependencies {
    testImplementation 'junit:junit:4.13.2'
}
"#;

    #[test]
    fn test_read_version() {
        assert_eq!(GradleUpdater.read_version(GRADLE).unwrap(), "6.3.1");
    }

    #[test]
    fn test_read_version_single_quotes() {
        assert_eq!(
            GradleUpdater.read_version("version = '1.0.0'\n").unwrap(),
            "1.0.0"
        );
    }

    #[test]
    fn test_write_version() {
        let updated = GradleUpdater.write_version(GRADLE, "6.4.0").unwrap();
        assert!(updated.contains("version = \"6.4.0\""));
        assert!(updated.contains("junit:junit:4.13.2"));
    }

    #[test]
    fn test_indented_assignment_does_not_match() {
        let contents = "subprojects {\n    version = \"1.0.0\"\n}\n";
        assert!(GradleUpdater.read_version(contents).is_err());
    }
}
