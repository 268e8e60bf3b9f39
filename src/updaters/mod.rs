//! File updaters: format-specific strategies for reading and writing a
//! version string inside heterogeneous project files.
//!
//! A target resolves to an updater through, in order: an explicit custom
//! trait object, an explicit `type` key, or filename inference. Resolved
//! updaters are cached per run so re-reads always see the same strategy.

use crate::error::{GitReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub mod cargo;
pub mod gradle;
pub mod json;
pub mod pattern;
pub mod plain_text;
pub mod pom;

pub use cargo::{CargoLockUpdater, CargoUpdater};
pub use gradle::GradleUpdater;
pub use json::JsonUpdater;
pub use pattern::RegexUpdater;
pub use plain_text::PlainTextUpdater;
pub use pom::PomUpdater;

/// JSON manifests and lock files recognized by basename
const JSON_BUMP_FILES: &[&str] = &[
    "package.json",
    "bower.json",
    "manifest.json",
    "composer.json",
    "package-lock.json",
    "npm-shrinkwrap.json",
    "composer.lock",
];

/// Plain-text version files recognized by basename
const PLAIN_TEXT_BUMP_FILES: &[&str] = &["VERSION.txt", "version.txt"];

/// Format-specific strategy for reading and writing a version string.
///
/// `read_name` and `is_private` are optional capabilities: formats without a
/// package name or privacy marker keep the defaults.
pub trait Updater: Send + Sync {
    /// Extract the version string from the file contents
    fn read_version(&self, contents: &str) -> Result<String>;

    /// Return the file contents with the version replaced
    fn write_version(&self, contents: &str, version: &str) -> Result<String>;

    /// Package name declared by the file, when the format carries one
    fn read_name(&self, _contents: &str) -> Option<String> {
        None
    }

    /// Whether the package is marked private (suppresses the publish hint)
    fn is_private(&self, _contents: &str) -> bool {
        false
    }
}

/// Built-in updater kinds selectable via the `type` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdaterType {
    Json,
    PlainText,
    Cargo,
    CargoLock,
    Pom,
    Gradle,
    Regex,
}

/// A file whose version string the bump stage rewrites.
///
/// Deserializes from either a bare filename string or a table with options;
/// custom updaters attach through [UpdateTarget::with_updater] only.
#[derive(Clone, Serialize)]
pub struct UpdateTarget {
    pub filename: PathBuf,
    /// Explicit built-in kind; inferred from the filename when absent
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<UpdaterType>,
    /// Package name scope for multi-package documents (Cargo.lock)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Read pattern for the regex updater; must contain a named capture
    /// group called `version`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Replacement template for the regex updater; `{{version}}` expands to
    /// the new version and `$name` refers to capture groups of `pattern`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    #[serde(skip)]
    pub updater: Option<Arc<dyn Updater>>,
}

impl UpdateTarget {
    /// Target with everything inferred from the filename
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        UpdateTarget {
            filename: filename.into(),
            kind: None,
            package: None,
            pattern: None,
            replacement: None,
            updater: None,
        }
    }

    /// Target with an explicit built-in kind
    pub fn with_kind(filename: impl Into<PathBuf>, kind: UpdaterType) -> Self {
        UpdateTarget {
            kind: Some(kind),
            ..UpdateTarget::new(filename)
        }
    }

    /// Target backed by a caller-supplied updater implementation
    pub fn with_updater(filename: impl Into<PathBuf>, updater: Arc<dyn Updater>) -> Self {
        UpdateTarget {
            updater: Some(updater),
            ..UpdateTarget::new(filename)
        }
    }
}

impl fmt::Debug for UpdateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateTarget")
            .field("filename", &self.filename)
            .field("kind", &self.kind)
            .field("package", &self.package)
            .field("pattern", &self.pattern)
            .field("replacement", &self.replacement)
            .field("custom", &self.updater.is_some())
            .finish()
    }
}

impl<'de> Deserialize<'de> for UpdateTarget {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Spec {
            Filename(PathBuf),
            Table {
                filename: PathBuf,
                #[serde(rename = "type", default)]
                kind: Option<UpdaterType>,
                #[serde(default)]
                package: Option<String>,
                #[serde(default)]
                pattern: Option<String>,
                #[serde(default)]
                replacement: Option<String>,
            },
        }

        Ok(match Spec::deserialize(deserializer)? {
            Spec::Filename(filename) => UpdateTarget::new(filename),
            Spec::Table {
                filename,
                kind,
                package,
                pattern,
                replacement,
            } => UpdateTarget {
                filename,
                kind,
                package,
                pattern,
                replacement,
                updater: None,
            },
        })
    }
}

/// Per-run cache of resolved updaters, keyed by target path.
#[derive(Default)]
pub struct UpdaterRegistry {
    cache: HashMap<PathBuf, Arc<dyn Updater>>,
}

impl UpdaterRegistry {
    pub fn new() -> Self {
        UpdaterRegistry::default()
    }

    /// Resolve the updater for a target, reusing the cached strategy when the
    /// target was seen before in this run.
    ///
    /// # Returns
    /// * `Ok(updater)` - The resolved strategy
    /// * `Err(UnsupportedFile)` - No built-in matches the filename and no
    ///   `type`/custom updater was given
    /// * `Err(InvalidUpdater)` - The target's options are unusable
    pub fn resolve(&mut self, target: &UpdateTarget) -> Result<Arc<dyn Updater>> {
        if let Some(hit) = self.cache.get(&target.filename) {
            return Ok(hit.clone());
        }
        let updater = build_updater(target)?;
        self.cache.insert(target.filename.clone(), updater.clone());
        Ok(updater)
    }
}

fn build_updater(target: &UpdateTarget) -> Result<Arc<dyn Updater>> {
    if let Some(custom) = &target.updater {
        return Ok(custom.clone());
    }
    if let Some(kind) = target.kind {
        return updater_by_type(kind, target);
    }
    updater_by_filename(target)
}

fn updater_by_type(kind: UpdaterType, target: &UpdateTarget) -> Result<Arc<dyn Updater>> {
    Ok(match kind {
        UpdaterType::Json => Arc::new(JsonUpdater),
        UpdaterType::PlainText => Arc::new(PlainTextUpdater),
        UpdaterType::Cargo => Arc::new(CargoUpdater),
        UpdaterType::CargoLock => {
            let package = target.package.clone().ok_or_else(|| {
                GitReleaseError::invalid_updater(format!(
                    "the cargo-lock updater for {} requires a `package` name",
                    target.filename.display()
                ))
            })?;
            Arc::new(CargoLockUpdater::new(package))
        }
        UpdaterType::Pom => Arc::new(PomUpdater),
        UpdaterType::Gradle => Arc::new(GradleUpdater),
        UpdaterType::Regex => Arc::new(RegexUpdater::from_options(
            target.pattern.as_deref(),
            target.replacement.as_deref(),
        )?),
    })
}

fn updater_by_filename(target: &UpdateTarget) -> Result<Arc<dyn Updater>> {
    let basename = target
        .filename
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    if JSON_BUMP_FILES.contains(&basename.as_str()) {
        return updater_by_type(UpdaterType::Json, target);
    }
    if PLAIN_TEXT_BUMP_FILES.contains(&basename.as_str()) {
        return updater_by_type(UpdaterType::PlainText, target);
    }
    if basename == "Cargo.toml" {
        return updater_by_type(UpdaterType::Cargo, target);
    }
    if basename == "Cargo.lock" {
        return updater_by_type(UpdaterType::CargoLock, target);
    }
    if basename == "pom.xml" {
        return updater_by_type(UpdaterType::Pom, target);
    }
    if basename == "build.gradle" || basename == "build.gradle.kts" {
        return updater_by_type(UpdaterType::Gradle, target);
    }

    Err(GitReleaseError::unsupported_file(format!(
        "{}: specify the updater `type` or provide a custom updater",
        target.filename.display()
    )))
}

/// Leading whitespace of the first indented line; two spaces when the
/// document has no indentation.
pub(crate) fn detect_indent(contents: &str) -> String {
    for line in contents.lines() {
        let trimmed = line.trim_start();
        if !trimmed.is_empty() && trimmed.len() < line.len() {
            return line[..line.len() - trimmed.len()].to_string();
        }
    }
    "  ".to_string()
}

/// Newline convention of the document (CRLF when any CRLF is present).
pub(crate) fn detect_newline(contents: &str) -> &'static str {
    if contents.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_infers_json_from_basename() {
        let mut registry = UpdaterRegistry::new();
        let target = UpdateTarget::new("package.json");
        let updater = registry.resolve(&target).unwrap();
        assert_eq!(
            updater.read_version(r#"{"version": "1.2.3"}"#).unwrap(),
            "1.2.3"
        );
    }

    #[test]
    fn test_registry_infers_plain_text() {
        let mut registry = UpdaterRegistry::new();
        let target = UpdateTarget::new("VERSION.txt");
        let updater = registry.resolve(&target).unwrap();
        assert_eq!(updater.read_version("1.2.3\n").unwrap(), "1.2.3");
    }

    #[test]
    fn test_registry_infers_by_suffix() {
        let mut registry = UpdaterRegistry::new();
        assert!(registry.resolve(&UpdateTarget::new("sub/pom.xml")).is_ok());
        assert!(registry.resolve(&UpdateTarget::new("build.gradle")).is_ok());
        assert!(registry.resolve(&UpdateTarget::new("Cargo.toml")).is_ok());
    }

    #[test]
    fn test_registry_unknown_file_is_unsupported() {
        let mut registry = UpdaterRegistry::new();
        let result = registry.resolve(&UpdateTarget::new("mystery.xyz"));
        assert!(matches!(
            result,
            Err(GitReleaseError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn test_registry_explicit_type_beats_inference() {
        let mut registry = UpdaterRegistry::new();
        let target = UpdateTarget::with_kind("mystery.xyz", UpdaterType::PlainText);
        let updater = registry.resolve(&target).unwrap();
        assert_eq!(updater.read_version("2.0.0").unwrap(), "2.0.0");
    }

    #[test]
    fn test_registry_cargo_lock_requires_package() {
        let mut registry = UpdaterRegistry::new();
        let result = registry.resolve(&UpdateTarget::new("Cargo.lock"));
        assert!(matches!(result, Err(GitReleaseError::InvalidUpdater(_))));
    }

    #[test]
    fn test_registry_caches_resolved_updaters() {
        let mut registry = UpdaterRegistry::new();
        let target = UpdateTarget::new("package.json");
        let first = registry.resolve(&target).unwrap();
        let second = registry.resolve(&target).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_registry_custom_updater_wins() {
        struct Fixed;
        impl Updater for Fixed {
            fn read_version(&self, _contents: &str) -> Result<String> {
                Ok("9.9.9".to_string())
            }
            fn write_version(&self, contents: &str, _version: &str) -> Result<String> {
                Ok(contents.to_string())
            }
        }

        let mut registry = UpdaterRegistry::new();
        let target = UpdateTarget::with_updater("package.json", Arc::new(Fixed));
        let updater = registry.resolve(&target).unwrap();
        assert_eq!(updater.read_version("ignored").unwrap(), "9.9.9");
    }

    #[test]
    fn test_detect_indent_spaces_and_tabs() {
        assert_eq!(detect_indent("{\n    \"a\": 1\n}"), "    ");
        assert_eq!(detect_indent("{\n\t\"a\": 1\n}"), "\t");
        assert_eq!(detect_indent("{}"), "  ");
    }

    #[test]
    fn test_detect_newline() {
        assert_eq!(detect_newline("a\r\nb"), "\r\n");
        assert_eq!(detect_newline("a\nb"), "\n");
    }

    #[test]
    fn test_update_target_deserializes_from_string_or_table() {
        #[derive(Deserialize)]
        struct Wrapper {
            bump_files: Vec<UpdateTarget>,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
bump_files = [
    "package.json",
    { filename = "Cargo.lock", type = "cargo-lock", package = "demo" },
]
"#,
        )
        .unwrap();

        assert_eq!(parsed.bump_files.len(), 2);
        assert_eq!(parsed.bump_files[0].filename, PathBuf::from("package.json"));
        assert_eq!(parsed.bump_files[1].kind, Some(UpdaterType::CargoLock));
        assert_eq!(parsed.bump_files[1].package.as_deref(), Some("demo"));
    }
}
