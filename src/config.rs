use crate::error::Result;
use crate::updaters::UpdateTarget;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the complete configuration for a release run.
///
/// Every field has a default so an empty file (or no file) yields a working
/// configuration; the CLI overlays its flags on top of whatever was loaded.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReleaseConfig {
    /// Changelog file read and written by the changelog stage
    #[serde(default = "default_infile")]
    pub infile: PathBuf,

    /// Fixed header kept above all release entries
    #[serde(default = "default_header")]
    pub header: String,

    /// Commit and tag message template; `%s` is replaced with the version
    #[serde(default = "default_message")]
    pub message: String,

    /// Prefix of release tags (e.g. "v" for `v1.2.3`)
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Release exactly this version, or one of major/minor/patch
    #[serde(default)]
    pub release_as: Option<String>,

    /// Prerelease identifier; empty string means an unnamed prerelease
    #[serde(default)]
    pub prerelease: Option<String>,

    #[serde(default)]
    pub first_release: bool,

    /// Sign the release commit and tag
    #[serde(default)]
    pub sign: bool,

    /// Bypass git hooks during the commit phase
    #[serde(default)]
    pub no_verify: bool,

    /// Commit all staged changes, not just files touched by the run
    #[serde(default)]
    pub commit_all: bool,

    #[serde(default)]
    pub silent: bool,

    #[serde(default)]
    pub dry_run: bool,

    /// Fall back to the newest semver tag when no package file is readable
    #[serde(default = "default_true")]
    pub git_tag_fallback: bool,

    #[serde(default)]
    pub skip: SkipConfig,

    /// Files probed, in order, for the current version and package identity
    #[serde(default = "default_package_files")]
    pub package_files: Vec<UpdateTarget>,

    /// Files rewritten by the bump stage
    #[serde(default = "default_bump_files")]
    pub bump_files: Vec<UpdateTarget>,

    /// Lifecycle hook name → shell command
    #[serde(default)]
    pub hooks: HashMap<String, String>,
}

/// Per-stage skip gates.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipConfig {
    #[serde(default)]
    pub bump: bool,
    #[serde(default)]
    pub changelog: bool,
    #[serde(default)]
    pub commit: bool,
    #[serde(default)]
    pub tag: bool,
}

fn default_infile() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_header() -> String {
    "# Changelog\n\nAll notable changes to this project will be documented in this file.\n"
        .to_string()
}

fn default_message() -> String {
    "chore(release): %s".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_true() -> bool {
    true
}

/// Returns the default list of package files probed for the current version.
fn default_package_files() -> Vec<UpdateTarget> {
    vec![
        UpdateTarget::new("package.json"),
        UpdateTarget::new("bower.json"),
        UpdateTarget::new("manifest.json"),
        UpdateTarget::new("composer.json"),
        UpdateTarget::new("Cargo.toml"),
    ]
}

/// Returns the default list of files rewritten by the bump stage.
fn default_bump_files() -> Vec<UpdateTarget> {
    let mut files = default_package_files();
    files.push(UpdateTarget::new("package-lock.json"));
    files.push(UpdateTarget::new("npm-shrinkwrap.json"));
    files.push(UpdateTarget::new("composer.lock"));
    files
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            infile: default_infile(),
            header: default_header(),
            message: default_message(),
            tag_prefix: default_tag_prefix(),
            release_as: None,
            prerelease: None,
            first_release: false,
            sign: false,
            no_verify: false,
            commit_all: false,
            silent: false,
            dry_run: false,
            git_tag_fallback: true,
            skip: SkipConfig::default(),
            package_files: default_package_files(),
            bump_files: default_bump_files(),
            hooks: HashMap::new(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(ReleaseConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<ReleaseConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitrelease.toml").exists() {
        fs::read_to_string("./gitrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(ReleaseConfig::default());
        }
    } else {
        return Ok(ReleaseConfig::default());
    };

    let config: ReleaseConfig = toml::from_str(&config_str)?;
    Ok(config)
}
