//! Main-package discovery.
//!
//! The release starts from the version declared by the first readable
//! package file; when none exists the newest semver tag stands in, or the
//! run aborts before any stage executes.

use crate::config::ReleaseConfig;
use crate::error::{GitReleaseError, Result};
use crate::updaters::{UpdateTarget, UpdaterRegistry};
use semver::Version;
use std::fs;
use std::path::Path;

/// Name, version, and privacy of the package driving the release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: Option<String>,
    pub version: String,
    pub private: bool,
}

/// Probe `targets` in order and return the first readable package.
///
/// Unreadable files, unresolvable updaters, and version-less contents all
/// move on to the next candidate.
pub fn find_main_package(
    root: &Path,
    targets: &[UpdateTarget],
    registry: &mut UpdaterRegistry,
) -> Option<PackageInfo> {
    for target in targets {
        let path = root.join(&target.filename);
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        let Ok(updater) = registry.resolve(target) else {
            continue;
        };
        let Ok(version) = updater.read_version(&contents) else {
            continue;
        };
        return Some(PackageInfo {
            name: updater.read_name(&contents),
            version,
            private: updater.is_private(&contents),
        });
    }
    None
}

/// Newest semver tag (by version order, not tag date) carrying `tag_prefix`.
///
/// Returns the full tag name together with the parsed version; tags that do
/// not parse after prefix stripping are skipped.
pub fn latest_semver_tag(
    repo: &git2::Repository,
    tag_prefix: &str,
) -> Result<Option<(String, Version)>> {
    let tags = repo.tag_names(None)?;
    let mut best: Option<(String, Version)> = None;

    for name in tags.iter().flatten() {
        let Some(stripped) = name.strip_prefix(tag_prefix) else {
            continue;
        };
        let Ok(version) = Version::parse(stripped) else {
            continue;
        };
        if best.as_ref().map_or(true, |(_, b)| version > *b) {
            best = Some((name.to_string(), version));
        }
    }

    Ok(best)
}

/// Resolve the package the run operates on.
///
/// Falls back to the newest version tag (or `1.0.0` in a tag-less
/// repository) when `git_tag_fallback` is enabled; otherwise a missing
/// package file is fatal before any stage runs.
pub fn resolve_package(
    root: &Path,
    config: &ReleaseConfig,
    registry: &mut UpdaterRegistry,
) -> Result<PackageInfo> {
    if let Some(info) = find_main_package(root, &config.package_files, registry) {
        return Ok(info);
    }

    if config.git_tag_fallback {
        let version = match git2::Repository::discover(root) {
            Ok(repo) => latest_semver_tag(&repo, &config.tag_prefix)?
                .map(|(_, version)| version.to_string())
                .unwrap_or_else(|| "1.0.0".to_string()),
            Err(_) => "1.0.0".to_string(),
        };
        return Ok(PackageInfo {
            name: None,
            version,
            private: false,
        });
    }

    Err(GitReleaseError::no_package_file(
        "none of the configured package files could be read; enable `git_tag_fallback` or add a package file",
    ))
}
