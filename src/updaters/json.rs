//! JSON manifest updater.

use crate::error::{GitReleaseError, Result};
use crate::updaters::{detect_indent, detect_newline, Updater};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

/// Generic updater for JSON documents with a top-level `version` string.
///
/// Writes preserve the document's indentation style, newline convention, key
/// order, and presence or absence of a trailing newline, so a round-trip
/// changes the version value and nothing else.
pub struct JsonUpdater;

impl Updater for JsonUpdater {
    fn read_version(&self, contents: &str) -> Result<String> {
        let document: Value = serde_json::from_str(contents)?;
        document
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                GitReleaseError::version_not_found(
                    "no top-level \"version\" string in JSON document",
                )
            })
    }

    fn write_version(&self, contents: &str, version: &str) -> Result<String> {
        let indent = detect_indent(contents);
        let newline = detect_newline(contents);

        let mut document: Value = serde_json::from_str(contents)?;
        let object = document.as_object_mut().ok_or_else(|| {
            GitReleaseError::version_not_found("JSON document is not an object")
        })?;
        object.insert("version".to_string(), Value::String(version.to_string()));

        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        document.serialize(&mut serializer)?;

        let mut output = String::from_utf8(buffer)
            .map_err(|err| GitReleaseError::config(format!("non-UTF-8 JSON output: {}", err)))?;
        if newline == "\r\n" {
            output = output.replace('\n', "\r\n");
        }
        if contents.ends_with('\n') {
            output.push_str(newline);
        }
        Ok(output)
    }

    fn read_name(&self, contents: &str) -> Option<String> {
        let document: Value = serde_json::from_str(contents).ok()?;
        document
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn is_private(&self, contents: &str) -> bool {
        serde_json::from_str::<Value>(contents)
            .ok()
            .and_then(|document| document.get("private").and_then(Value::as_bool))
            .unwrap_or(false)
    }
}
