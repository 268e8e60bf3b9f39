//! Semantic-version increments.
//!
//! The `semver` crate parses and orders versions but does not bump them, so
//! the increment keywords are applied here. The rules match the standard
//! node-semver `inc()` behavior, including prerelease handling.

use crate::error::{GitReleaseError, Result};
use semver::{BuildMetadata, Prerelease, Version};

/// Which increment keyword to apply to a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
    Prerelease,
}

/// Apply an increment to `version`, using `identifier` as the prerelease id
/// for the `Pre*` and `Prerelease` keywords.
///
/// Rules:
/// - `Major`/`Minor`: a prerelease sitting on the component boundary
///   (e.g. `2.0.0-rc.1` for major) graduates to its release instead of
///   advancing another component.
/// - `Patch`: any prerelease strips to its release, otherwise patch + 1.
/// - `PreMajor`/`PreMinor`/`PrePatch`: unconditional component increment
///   followed by an `-identifier.0` suffix.
/// - `Prerelease`: with no existing prerelease behaves like `PrePatch`;
///   otherwise the rightmost numeric prerelease component increments, and a
///   changed identifier resets the suffix to `-identifier.0`.
///
/// # Arguments
/// * `version` - Version to increment
/// * `inc` - Increment keyword
/// * `identifier` - Optional prerelease identifier (e.g. "alpha")
///
/// # Returns
/// * `Ok(Version)` - The incremented version, build metadata cleared
/// * `Err` - If `identifier` is not a valid prerelease identifier
pub fn increment(version: &Version, inc: Increment, identifier: Option<&str>) -> Result<Version> {
    // An empty identifier means an unnamed prerelease: bare numeric suffix
    let identifier = identifier.filter(|id| !id.is_empty());
    let mut next = version.clone();
    next.build = BuildMetadata::EMPTY;

    match inc {
        Increment::Major => {
            if next.minor != 0 || next.patch != 0 || next.pre.is_empty() {
                next.major += 1;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        Increment::Minor => {
            if next.patch != 0 || next.pre.is_empty() {
                next.minor += 1;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        Increment::Patch => {
            if next.pre.is_empty() {
                next.patch += 1;
            }
            next.pre = Prerelease::EMPTY;
        }
        Increment::PreMajor => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
            next.pre = first_prerelease(identifier)?;
        }
        Increment::PreMinor => {
            next.minor += 1;
            next.patch = 0;
            next.pre = first_prerelease(identifier)?;
        }
        Increment::PrePatch => {
            next.patch += 1;
            next.pre = first_prerelease(identifier)?;
        }
        Increment::Prerelease => {
            if next.pre.is_empty() {
                next.patch += 1;
                next.pre = first_prerelease(identifier)?;
            } else {
                next.pre = next_prerelease(&next.pre, identifier)?;
            }
        }
    }

    Ok(next)
}

/// The initial prerelease suffix for a new line: `identifier.0`, or `0` when
/// no identifier is given.
fn first_prerelease(identifier: Option<&str>) -> Result<Prerelease> {
    let raw = match identifier {
        Some(id) => format!("{}.0", id),
        None => "0".to_string(),
    };
    parse_prerelease(&raw)
}

/// Advance an existing prerelease suffix.
///
/// The rightmost numeric component increments; if none exists, `0` is
/// appended. When an identifier is given and either does not lead the current
/// suffix or is not followed by a number, the suffix resets to `identifier.0`.
fn next_prerelease(current: &Prerelease, identifier: Option<&str>) -> Result<Prerelease> {
    let mut parts: Vec<String> = current.as_str().split('.').map(str::to_string).collect();

    let mut bumped = false;
    for part in parts.iter_mut().rev() {
        if let Ok(n) = part.parse::<u64>() {
            *part = (n + 1).to_string();
            bumped = true;
            break;
        }
    }
    if !bumped {
        parts.push("0".to_string());
    }

    if let Some(id) = identifier {
        let id_leads = parts.first().map(String::as_str) == Some(id);
        let numbered = parts.get(1).map_or(false, |p| p.parse::<u64>().is_ok());
        if !id_leads || !numbered {
            return parse_prerelease(&format!("{}.0", id));
        }
    }

    parse_prerelease(&parts.join("."))
}

fn parse_prerelease(raw: &str) -> Result<Prerelease> {
    Prerelease::new(raw).map_err(|_| {
        GitReleaseError::invalid_version(format!("invalid prerelease identifier '{}'", raw))
    })
}
