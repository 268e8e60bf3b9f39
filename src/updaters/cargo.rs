//! Cargo manifest and lock file updaters.
//!
//! Both write line-scoped: only the targeted `version = "..."` line changes,
//! so comments, ordering, and formatting survive the rewrite.

use crate::error::{GitReleaseError, Result};
use crate::updaters::Updater;
use toml::Value;

/// Updater for `Cargo.toml` package manifests.
pub struct CargoUpdater;

impl Updater for CargoUpdater {
    fn read_version(&self, contents: &str) -> Result<String> {
        let document: Value = contents.parse()?;
        document
            .get("package")
            .and_then(|package| package.get("version"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                GitReleaseError::version_not_found("no [package] version in Cargo.toml")
            })
    }

    fn write_version(&self, contents: &str, version: &str) -> Result<String> {
        let mut in_package = false;
        let mut replaced = false;
        let mut lines: Vec<String> = Vec::new();

        for line in contents.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with('[') {
                in_package = trimmed.starts_with("[package]");
            }
            if !replaced && in_package && is_version_assignment(trimmed) {
                match replace_quoted(line, version) {
                    Some(updated) => {
                        lines.push(updated);
                        replaced = true;
                        continue;
                    }
                    None => {
                        return Err(GitReleaseError::version_not_found(
                            "the [package] version value is not a quoted string",
                        ))
                    }
                }
            }
            lines.push(line.to_string());
        }

        if !replaced {
            return Err(GitReleaseError::version_not_found(
                "no [package] version in Cargo.toml",
            ));
        }

        Ok(rejoin(lines, contents))
    }

    fn read_name(&self, contents: &str) -> Option<String> {
        let document: Value = contents.parse().ok()?;
        document
            .get("package")
            .and_then(|package| package.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn is_private(&self, _contents: &str) -> bool {
        // The publish hint only covers npm packages; crates always read as private
        true
    }
}

/// Updater for `Cargo.lock`, scoped to a single `[[package]]` entry by name.
pub struct CargoLockUpdater {
    package: String,
}

impl CargoLockUpdater {
    pub fn new(package: impl Into<String>) -> Self {
        CargoLockUpdater {
            package: package.into(),
        }
    }
}

impl Updater for CargoLockUpdater {
    fn read_version(&self, contents: &str) -> Result<String> {
        let document: Value = contents.parse()?;
        document
            .get("package")
            .and_then(Value::as_array)
            .and_then(|packages| {
                packages.iter().find(|entry| {
                    entry.get("name").and_then(Value::as_str) == Some(self.package.as_str())
                })
            })
            .and_then(|entry| entry.get("version"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                GitReleaseError::version_not_found(format!(
                    "no package named '{}' in Cargo.lock",
                    self.package
                ))
            })
    }

    fn write_version(&self, contents: &str, version: &str) -> Result<String> {
        let name_line = format!("name = \"{}\"", self.package);
        let mut lines: Vec<String> = contents.lines().map(str::to_string).collect();

        let name_index = lines
            .iter()
            .position(|line| line.trim() == name_line)
            .ok_or_else(|| {
                GitReleaseError::version_not_found(format!(
                    "no package named '{}' in Cargo.lock",
                    self.package
                ))
            })?;

        let version_index = lines[name_index..]
            .iter()
            .position(|line| line.trim_start().starts_with("version = "))
            .map(|offset| name_index + offset)
            .ok_or_else(|| {
                GitReleaseError::version_not_found(format!(
                    "package '{}' has no version line in Cargo.lock",
                    self.package
                ))
            })?;

        lines[version_index] = replace_quoted(&lines[version_index], version).ok_or_else(|| {
            GitReleaseError::version_not_found("the lock file version value is not a quoted string")
        })?;

        Ok(rejoin(lines, contents))
    }

    fn is_private(&self, _contents: &str) -> bool {
        true
    }
}

fn is_version_assignment(trimmed_line: &str) -> bool {
    trimmed_line
        .strip_prefix("version")
        .map_or(false, |rest| rest.trim_start().starts_with('='))
}

/// Replace the first double-quoted value on a line, keeping everything else.
fn replace_quoted(line: &str, version: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')? + start + 1;
    Some(format!("{}\"{}\"{}", &line[..start], version, &line[end + 1..]))
}

fn rejoin(lines: Vec<String>, original: &str) -> String {
    let mut output = lines.join("\n");
    if original.ends_with('\n') {
        output.push('\n');
    }
    output
}
