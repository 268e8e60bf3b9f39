//! Version-control side effects behind a trait.
//!
//! The pipeline only depends on the [Vcs] trait. The concrete
//! implementations are:
//!
//! - [command::GitCommandVcs]: shells out to the `git` binary
//! - [mock::MockVcs]: records operations for testing
//!
//! No network operations exist here; pushing and publishing are only ever
//! suggested to the user.

pub mod command;
pub mod mock;

pub use command::GitCommandVcs;
pub use mock::{MockVcs, VcsOperation};

use crate::error::Result;
use std::path::PathBuf;

/// Options applied to the release commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Sign the commit (`-S`)
    pub sign: bool,
    /// Bypass pre-commit and commit-msg hooks (`--no-verify`)
    pub no_verify: bool,
    /// Commit everything staged instead of an explicit path list
    pub all: bool,
}

/// Version-control operations needed by the release pipeline
///
/// Implementors must be `Send + Sync` to allow safe sharing across threads.
pub trait Vcs: Send + Sync {
    /// Stage the given paths
    fn add(&self, paths: &[PathBuf]) -> Result<()>;

    /// Commit the given paths with a message.
    ///
    /// When `opts.all` is set the path list is ignored and the full staged
    /// set is committed.
    fn commit(&self, message: &str, paths: &[PathBuf], opts: CommitOptions) -> Result<()>;

    /// Create an annotated tag, signed when `sign` is set
    fn tag(&self, name: &str, message: &str, sign: bool) -> Result<()>;

    /// Name of the currently checked-out branch
    fn current_branch(&self) -> Result<String>;
}
