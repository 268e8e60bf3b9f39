//! Lifecycle hook system.
//!
//! Hooks run at fixed points in the release pipeline (`prerelease`,
//! `prebump`, `postbump`, `prechangelog`, `postchangelog`, `precommit`,
//! `postcommit`, `pretag`, `posttag`). A hook's trimmed stdout can override
//! a downstream value: `prebump` output replaces the release-as setting and
//! `precommit` output replaces the commit message template.

pub mod runner;

pub use runner::HookRunner;

use crate::error::Result;
use std::collections::HashMap;
use std::fmt;

/// A single lifecycle hook: a shell command or an in-process callable.
pub enum Hook {
    /// Shell command run via `sh -c`; receives the resolved version as an
    /// appended `--new-version` argument
    Shell(String),
    /// In-process callable; its `Ok` value is the override
    Callable(Box<dyn Fn(&HookContext) -> Result<Option<String>> + Send + Sync>),
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Shell(command) => f.debug_tuple("Shell").field(command).finish(),
            Hook::Callable(_) => write!(f, "Callable(..)"),
        }
    }
}

/// Context information passed to a hook
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Name of the hook being executed
    pub hook_name: String,
    /// Resolved version, when one exists at this point of the pipeline
    pub version: Option<String>,
    /// Whether the run is a dry run
    pub dry_run: bool,
}

impl HookContext {
    /// Convert context to environment variables for shell hooks
    ///
    /// Maps context fields to GITRELEASE_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert("GITRELEASE_HOOK".to_string(), self.hook_name.clone());
        env.insert("GITRELEASE_DRY_RUN".to_string(), self.dry_run.to_string());

        if let Some(ref version) = self.version {
            env.insert("GITRELEASE_NEW_VERSION".to_string(), version.clone());
        }

        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_context_to_env_vars_all_fields() {
        let ctx = HookContext {
            hook_name: "postbump".to_string(),
            version: Some("1.2.3".to_string()),
            dry_run: false,
        };

        let env = ctx.to_env_vars();
        assert_eq!(env.get("GITRELEASE_HOOK"), Some(&"postbump".to_string()));
        assert_eq!(
            env.get("GITRELEASE_NEW_VERSION"),
            Some(&"1.2.3".to_string())
        );
        assert_eq!(env.get("GITRELEASE_DRY_RUN"), Some(&"false".to_string()));
    }

    #[test]
    fn test_hook_context_to_env_vars_without_version() {
        let ctx = HookContext {
            hook_name: "prebump".to_string(),
            version: None,
            dry_run: true,
        };

        let env = ctx.to_env_vars();
        assert_eq!(env.len(), 2);
        assert!(env.get("GITRELEASE_NEW_VERSION").is_none());
        assert_eq!(env.get("GITRELEASE_DRY_RUN"), Some(&"true".to_string()));
    }

    #[test]
    fn test_hook_debug_formatting() {
        let shell = Hook::Shell("echo hi".to_string());
        assert!(format!("{:?}", shell).contains("echo hi"));

        let callable = Hook::Callable(Box::new(|_ctx| Ok(None)));
        assert_eq!(format!("{:?}", callable), "Callable(..)");
    }
}
