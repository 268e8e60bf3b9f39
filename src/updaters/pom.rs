//! Maven POM updater.

use crate::error::{GitReleaseError, Result};
use crate::updaters::{detect_indent, Updater};
use regex::Regex;

/// Updater for the root-level `<version>` tag of a `pom.xml`.
///
/// The project version sits at a single indent level; dependency and plugin
/// versions are nested deeper and never match.
pub struct PomUpdater;

fn version_tag_regex(contents: &str) -> Result<Regex> {
    let indent = detect_indent(contents);
    Regex::new(&format!(
        r"(?m)^{}<version>([\d.]+)</version>",
        regex::escape(&indent)
    ))
    .map_err(|err| GitReleaseError::config(format!("pom version pattern: {}", err)))
}

impl Updater for PomUpdater {
    fn read_version(&self, contents: &str) -> Result<String> {
        version_tag_regex(contents)?
            .captures(contents)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                GitReleaseError::version_not_found("no root-level <version> tag in pom file")
            })
    }

    fn write_version(&self, contents: &str, version: &str) -> Result<String> {
        let pattern = version_tag_regex(contents)?;
        if !pattern.is_match(contents) {
            return Err(GitReleaseError::version_not_found(
                "no root-level <version> tag in pom file",
            ));
        }
        let indent = detect_indent(contents);
        let replacement = format!("{}<version>{}</version>", indent, version);
        Ok(pattern.replace(contents, replacement.as_str()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<project>
    <groupId>org.example</groupId>
    <artifactId>demo</artifactId>
    <version>1.4.2</version>
    <dependencies>
        <dependency>
            <artifactId>junit</artifactId>
            <version>4.13.2</version>
        </dependency>
    </dependencies>
</project>
"#;

    #[test]
    fn test_read_root_version_only() {
        assert_eq!(PomUpdater.read_version(POM).unwrap(), "1.4.2");
    }

    #[test]
    fn test_write_leaves_dependency_versions() {
        let updated = PomUpdater.write_version(POM, "1.5.0").unwrap();
        assert!(updated.contains("    <version>1.5.0</version>"));
        assert!(updated.contains("<version>4.13.2</version>"));
    }

    #[test]
    fn test_missing_version_tag_errors() {
        let pom = "<project>\n    <artifactId>demo</artifactId>\n</project>\n";
        assert!(PomUpdater.read_version(pom).is_err());
        assert!(PomUpdater.write_version(pom, "1.0.0").is_err());
    }
}
