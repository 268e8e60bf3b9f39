//! Plain-text version file updater.

use crate::error::Result;
use crate::updaters::Updater;

/// Updater for files that contain nothing but a version string.
pub struct PlainTextUpdater;

impl Updater for PlainTextUpdater {
    fn read_version(&self, contents: &str) -> Result<String> {
        Ok(contents.trim().to_string())
    }

    fn write_version(&self, contents: &str, version: &str) -> Result<String> {
        // The whole file is the version; keep a trailing newline if one existed
        if contents.ends_with('\n') {
            Ok(format!("{}\n", version))
        } else {
            Ok(version.to_string())
        }
    }
}
