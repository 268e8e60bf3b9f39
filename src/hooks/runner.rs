use crate::error::{GitReleaseError, Result};
use crate::hooks::{Hook, HookContext};
use crate::ui;
use std::collections::HashMap;
use std::process::Command;

/// Executes lifecycle hooks registered for a run.
///
/// Hooks execute even under dry-run; they are informational and expected to
/// be idempotent-safe. Only the built-in stages suppress their side effects.
pub struct HookRunner {
    hooks: HashMap<String, Hook>,
    silent: bool,
    dry_run: bool,
}

impl HookRunner {
    /// Build a runner from configured shell commands.
    ///
    /// # Arguments
    /// * `shell_hooks` - hook name → shell command, as configured
    /// * `silent` - suppress progress output
    /// * `dry_run` - forwarded to hooks through their context
    pub fn new(shell_hooks: &HashMap<String, String>, silent: bool, dry_run: bool) -> Self {
        let hooks = shell_hooks
            .iter()
            .map(|(name, command)| (name.clone(), Hook::Shell(command.clone())))
            .collect();
        HookRunner {
            hooks,
            silent,
            dry_run,
        }
    }

    /// Register or replace a hook; in-process callables attach here.
    pub fn set_hook(&mut self, name: impl Into<String>, hook: Hook) {
        self.hooks.insert(name.into(), hook);
    }

    /// Run the hook registered under `name`, if any.
    ///
    /// No-op when nothing is registered. A non-zero exit code or callable
    /// error is fatal and surfaces the captured stderr (or error message).
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Trimmed, non-empty stdout: an override value
    /// * `Ok(None)` - No hook registered, or empty/whitespace-only output
    /// * `Err` - The hook failed; the pipeline must abort
    pub fn run(&self, name: &str, version: Option<&str>) -> Result<Option<String>> {
        let Some(hook) = self.hooks.get(name) else {
            return Ok(None);
        };

        let context = HookContext {
            hook_name: name.to_string(),
            version: version.map(str::to_string),
            dry_run: self.dry_run,
        };

        ui::checkpoint(
            self.silent,
            self.dry_run,
            &format!("Running lifecycle hook \"{}\"", name),
        );

        match hook {
            Hook::Callable(callable) => {
                let output = callable(&context)
                    .map_err(|err| GitReleaseError::hook(format!("hook '{}': {}", name, err)))?;
                Ok(normalize(output))
            }
            Hook::Shell(command) => self.run_shell(name, command, &context),
        }
    }

    fn run_shell(&self, name: &str, command: &str, context: &HookContext) -> Result<Option<String>> {
        let mut full_command = command.to_string();
        if let Some(version) = &context.version {
            full_command.push_str(&format!(" --new-version=\"{}\"", version));
        }

        ui::info_checkpoint(
            self.silent,
            &format!("- execute command: \"{}\"", full_command),
        );

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(&full_command);
        for (key, value) in context.to_env_vars() {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|err| {
            GitReleaseError::hook(format!("failed to spawn hook '{}': {}", name, err))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(GitReleaseError::hook(format!(
                "hook '{}' exited with code {}: {}",
                name,
                output.status.code().unwrap_or(-1),
                detail
            )));
        }

        if !stderr.trim().is_empty() {
            ui::display_warning(self.silent, stderr.trim());
        }

        Ok(normalize(Some(stdout.to_string())))
    }
}

/// Empty or whitespace-only output carries no override.
fn normalize(output: Option<String>) -> Option<String> {
    output
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner_with(name: &str, hook: Hook) -> HookRunner {
        let mut runner = HookRunner::new(&HashMap::new(), true, false);
        runner.set_hook(name, hook);
        runner
    }

    #[test]
    fn test_unregistered_hook_is_a_noop() {
        let runner = HookRunner::new(&HashMap::new(), true, false);
        assert_eq!(runner.run("prebump", None).unwrap(), None);
    }

    #[test]
    fn test_shell_hook_stdout_becomes_override() {
        let runner = runner_with("prebump", Hook::Shell("echo 2.0.0".to_string()));
        assert_eq!(runner.run("prebump", None).unwrap().as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_shell_hook_empty_stdout_is_no_override() {
        let runner = runner_with("postbump", Hook::Shell("true".to_string()));
        assert_eq!(runner.run("postbump", Some("1.0.0")).unwrap(), None);
    }

    #[test]
    fn test_shell_hook_receives_version_argument() {
        let runner = runner_with("postbump", Hook::Shell("echo".to_string()));
        let output = runner.run("postbump", Some("1.2.3")).unwrap();
        assert_eq!(output.as_deref(), Some("--new-version=1.2.3"));
    }

    #[test]
    fn test_shell_hook_sees_environment() {
        let runner = runner_with(
            "postbump",
            Hook::Shell("printf '%s' \"$GITRELEASE_NEW_VERSION\"".to_string()),
        );
        let output = runner.run("postbump", Some("1.2.3")).unwrap();
        assert_eq!(output.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_shell_hook_failure_is_fatal() {
        let runner = runner_with(
            "pretag",
            Hook::Shell("echo boom >&2; exit 3".to_string()),
        );
        let err = runner.run("pretag", Some("1.0.0")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("pretag"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_callable_hook_override() {
        let runner = runner_with(
            "precommit",
            Hook::Callable(Box::new(|ctx| {
                assert_eq!(ctx.version.as_deref(), Some("1.0.0"));
                Ok(Some("custom message".to_string()))
            })),
        );
        assert_eq!(
            runner.run("precommit", Some("1.0.0")).unwrap().as_deref(),
            Some("custom message")
        );
    }

    #[test]
    fn test_callable_hook_error_is_fatal() {
        let runner = runner_with(
            "prebump",
            Hook::Callable(Box::new(|_ctx| {
                Err(GitReleaseError::config("refusing"))
            })),
        );
        assert!(runner.run("prebump", None).is_err());
    }

    #[test]
    fn test_whitespace_only_output_normalizes_to_none() {
        assert_eq!(normalize(Some("  \n ".to_string())), None);
        assert_eq!(normalize(Some(" 1.0.0 \n".to_string())).as_deref(), Some("1.0.0"));
    }
}
