//! User-defined regex updater.

use crate::error::{GitReleaseError, Result};
use crate::updaters::Updater;
use regex::Regex;

/// Updater driven by a caller-supplied pattern.
///
/// The pattern must contain a named capture group called `version`; the
/// replacement template rewrites each match, with `{{version}}` expanding to
/// the new version and `$name`/`$1` referring to capture groups.
pub struct RegexUpdater {
    pattern: Regex,
    replacement: String,
}

impl RegexUpdater {
    /// Build the updater from target options, validating both at resolution
    /// time: a missing or group-less `pattern` and a missing `replacement`
    /// are configuration errors, not silent no-ops.
    pub fn from_options(pattern: Option<&str>, replacement: Option<&str>) -> Result<Self> {
        let raw = pattern.ok_or_else(|| {
            GitReleaseError::invalid_updater("the regex updater requires a `pattern` option")
        })?;
        let pattern = Regex::new(raw).map_err(|err| {
            GitReleaseError::invalid_updater(format!("invalid `pattern`: {}", err))
        })?;
        if !pattern
            .capture_names()
            .flatten()
            .any(|name| name == "version")
        {
            return Err(GitReleaseError::invalid_updater(
                "the `pattern` must contain a named capture group called `version`",
            ));
        }
        let replacement = replacement.ok_or_else(|| {
            GitReleaseError::invalid_updater("the regex updater requires a `replacement` option")
        })?;
        Ok(RegexUpdater {
            pattern,
            replacement: replacement.to_string(),
        })
    }
}

impl Updater for RegexUpdater {
    fn read_version(&self, contents: &str) -> Result<String> {
        self.pattern
            .captures(contents)
            .and_then(|captures| captures.name("version"))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                GitReleaseError::version_not_found("the configured `pattern` matched nothing")
            })
    }

    fn write_version(&self, contents: &str, version: &str) -> Result<String> {
        if !self.pattern.is_match(contents) {
            return Err(GitReleaseError::version_not_found(
                "the configured `pattern` matched nothing",
            ));
        }
        let expanded = self.replacement.replace("{{version}}", version);
        Ok(self
            .pattern
            .replace_all(contents, expanded.as_str())
            .into_owned())
    }
}
