use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum GitReleaseError {
    #[error("Invalid semantic version: {0}")]
    InvalidVersion(String),

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("Invalid updater: {0}")]
    InvalidUpdater(String),

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Hook failed: {0}")]
    Hook(String),

    #[error("Subprocess failed: {0}")]
    Subprocess(String),

    #[error("No package file found: {0}")]
    NoPackageFile(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, GitReleaseError>;

impl GitReleaseError {
    /// Create an invalid-version error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        GitReleaseError::InvalidVersion(msg.into())
    }

    /// Create an unsupported-file error with context
    pub fn unsupported_file(msg: impl Into<String>) -> Self {
        GitReleaseError::UnsupportedFile(msg.into())
    }

    /// Create an invalid-updater error with context
    pub fn invalid_updater(msg: impl Into<String>) -> Self {
        GitReleaseError::InvalidUpdater(msg.into())
    }

    /// Create a version-not-found error with context
    pub fn version_not_found(msg: impl Into<String>) -> Self {
        GitReleaseError::VersionNotFound(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        GitReleaseError::Hook(msg.into())
    }

    /// Create a subprocess error with context
    pub fn subprocess(msg: impl Into<String>) -> Self {
        GitReleaseError::Subprocess(msg.into())
    }

    /// Create a no-package-file error with context
    pub fn no_package_file(msg: impl Into<String>) -> Self {
        GitReleaseError::NoPackageFile(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitReleaseError::Config(msg.into())
    }
}
