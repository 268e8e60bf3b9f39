//! Release-type resolution, including prerelease continuation.
//!
//! The resolver decides *which* increment keyword to apply; the arithmetic
//! itself lives in [crate::version::increment].

use crate::error::{GitReleaseError, Result};
use crate::version::increment::{increment, Increment};
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Release component to increment.
///
/// Variant order encodes priority: `Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleaseType {
    Patch,
    Minor,
    Major,
}

impl FromStr for ReleaseType {
    type Err = GitReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(ReleaseType::Major),
            "minor" => Ok(ReleaseType::Minor),
            "patch" => Ok(ReleaseType::Patch),
            other => Err(GitReleaseError::config(format!(
                "unknown release type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseType::Major => write!(f, "major"),
            ReleaseType::Minor => write!(f, "minor"),
            ReleaseType::Patch => write!(f, "patch"),
        }
    }
}

impl From<ReleaseType> for Increment {
    fn from(value: ReleaseType) -> Self {
        match value {
            ReleaseType::Major => Increment::Major,
            ReleaseType::Minor => Increment::Minor,
            ReleaseType::Patch => Increment::Patch,
        }
    }
}

/// Immutable input to a version resolution, constructed once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseContext {
    /// Version the release starts from
    pub current_version: String,
    /// Bump type requested explicitly (overrides the recommendation)
    pub requested: Option<ReleaseType>,
    /// Exact version requested explicitly (overrides everything but
    /// `first_release`)
    pub exact_version: Option<String>,
    /// Prerelease identifier; set when the run produces a prerelease
    pub prerelease_id: Option<String>,
    /// First release: keep the current version untouched
    pub first_release: bool,
}

impl ReleaseContext {
    /// Interpret a raw `release-as` value.
    ///
    /// A bump keyword (`major`/`minor`/`patch`) becomes the requested type; a
    /// semantic version (optionally `v`-prefixed) becomes the exact version.
    ///
    /// # Arguments
    /// * `raw` - The user- or hook-supplied value
    ///
    /// # Returns
    /// * `Ok(())` - Value applied to this context
    /// * `Err` - If the value is neither a bump keyword nor a version
    pub fn set_release_as(&mut self, raw: &str) -> Result<()> {
        if let Ok(release_type) = raw.parse::<ReleaseType>() {
            self.requested = Some(release_type);
            self.exact_version = None;
            return Ok(());
        }

        let cleaned = raw.trim().trim_start_matches(['v', 'V']);
        if Version::parse(cleaned).is_ok() {
            self.exact_version = Some(cleaned.to_string());
            self.requested = None;
            return Ok(());
        }

        Err(GitReleaseError::config(format!(
            "release-as must be major, minor, patch, or an exact version (got '{}')",
            raw
        )))
    }
}

/// Compute the next version for `ctx`.
///
/// `recommendation` is the bump type supplied by the commit-history
/// collaborator; it only applies when the context carries no explicit
/// request. Fails with `InvalidVersion` when the current version does not
/// parse.
///
/// Resolution order:
/// 1. `first_release` returns the current version unchanged.
/// 2. An exact version is returned verbatim.
/// 3. The requested (or recommended) bump type is applied, routed through
///    the prerelease continuation rules when a prerelease id is set.
pub fn resolve_version(ctx: &ReleaseContext, recommendation: ReleaseType) -> Result<String> {
    let current = Version::parse(ctx.current_version.trim()).map_err(|err| {
        GitReleaseError::invalid_version(format!("'{}': {}", ctx.current_version, err))
    })?;

    if ctx.first_release {
        return Ok(current.to_string());
    }

    if let Some(exact) = &ctx.exact_version {
        let cleaned = exact.trim().trim_start_matches(['v', 'V']);
        let version = Version::parse(cleaned).map_err(|err| {
            GitReleaseError::invalid_version(format!("'{}': {}", exact, err))
        })?;
        return Ok(version.to_string());
    }

    let bump = ctx.requested.unwrap_or(recommendation);
    let keyword = choose_increment(&current, bump, ctx.prerelease_id.is_some());
    let next = increment(&current, keyword, ctx.prerelease_id.as_deref())?;
    Ok(next.to_string())
}

/// Pick the increment keyword for a bump type.
///
/// Without a prerelease id the bump type maps directly. With one, a version
/// already in a prerelease continues the same line (plain `prerelease`
/// increment) when its active type has equal or higher priority than the
/// requested bump; otherwise a new `pre<type>` line starts.
fn choose_increment(current: &Version, bump: ReleaseType, prerelease: bool) -> Increment {
    if !prerelease {
        return bump.into();
    }

    if !current.pre.is_empty() {
        if let Some(active) = active_type(current) {
            if active >= bump {
                return Increment::Prerelease;
            }
        }
    }

    match bump {
        ReleaseType::Major => Increment::PreMajor,
        ReleaseType::Minor => Increment::PreMinor,
        ReleaseType::Patch => Increment::PrePatch,
    }
}

/// The component boundary a prerelease version sits on.
///
/// Probes patch, then minor, then major and reports the first non-zero
/// component; `0.0.0-x` has no active type.
fn active_type(version: &Version) -> Option<ReleaseType> {
    if version.patch != 0 {
        Some(ReleaseType::Patch)
    } else if version.minor != 0 {
        Some(ReleaseType::Minor)
    } else if version.major != 0 {
        Some(ReleaseType::Major)
    } else {
        None
    }
}
