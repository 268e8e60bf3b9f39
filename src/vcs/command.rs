use crate::error::{GitReleaseError, Result};
use crate::ui;
use crate::vcs::{CommitOptions, Vcs};
use std::path::{Path, PathBuf};
use std::process::Command;

/// `git` command-line implementation of [Vcs].
///
/// Commits and tags go through the binary rather than a library so that
/// signing and hook bypassing behave exactly like a user-driven git.
pub struct GitCommandVcs {
    root: PathBuf,
    silent: bool,
}

impl GitCommandVcs {
    /// Create a VCS rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, silent: bool) -> Self {
        GitCommandVcs {
            root: root.into(),
            silent,
        }
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .current_dir(&self.root)
            .args(args)
            .output()
            .map_err(|err| {
                GitReleaseError::subprocess(format!("failed to spawn git: {}", err))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(GitReleaseError::subprocess(format!(
                "git {} exited with code {}: {}",
                args.first().unwrap_or(&""),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        if !stderr.trim().is_empty() {
            ui::display_warning(self.silent, stderr.trim());
        }

        Ok(stdout)
    }
}

fn path_args(paths: &[PathBuf]) -> Vec<&str> {
    paths
        .iter()
        .filter_map(|path| Path::new(path).to_str())
        .collect()
}

impl Vcs for GitCommandVcs {
    fn add(&self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add"];
        args.extend(path_args(paths));
        self.run_git(&args)?;
        Ok(())
    }

    fn commit(&self, message: &str, paths: &[PathBuf], opts: CommitOptions) -> Result<()> {
        let mut args = vec!["commit"];
        if opts.no_verify {
            args.push("--no-verify");
        }
        if opts.sign {
            args.push("-S");
        }
        let path_strings = path_args(paths);
        if !opts.all {
            args.extend(path_strings);
        }
        args.push("-m");
        args.push(message);
        self.run_git(&args)?;
        Ok(())
    }

    fn tag(&self, name: &str, message: &str, sign: bool) -> Result<()> {
        let tag_option = if sign { "-s" } else { "-a" };
        self.run_git(&["tag", tag_option, name, "-m", message])?;
        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        let output = self.run_git(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(output.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;

    fn init_repo(dir: &Path) {
        let run = |args: &[&str]| {
            let status = Command::new("git")
                .current_dir(dir)
                .args(args)
                .status()
                .expect("git available");
            assert!(status.success(), "git {:?} failed", args);
        };
        run(&["init", "-q"]);
        run(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        run(&["config", "user.email", "test@example.com"]);
        run(&["config", "user.name", "Test"]);
    }

    #[test]
    fn test_add_commit_tag_and_branch() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        fs::write(dir.path().join("file.txt"), "hello\n").unwrap();

        let vcs = GitCommandVcs::new(dir.path(), true);
        vcs.add(&[dir.path().join("file.txt")]).unwrap();
        vcs.commit(
            "chore(release): 1.0.0",
            &[dir.path().join("file.txt")],
            CommitOptions {
                no_verify: true,
                ..CommitOptions::default()
            },
        )
        .unwrap();
        vcs.tag("v1.0.0", "chore(release): 1.0.0", false).unwrap();

        assert_eq!(vcs.current_branch().unwrap(), "main");

        let tags = Command::new("git")
            .current_dir(dir.path())
            .args(["tag", "--list"])
            .output()
            .unwrap();
        assert!(String::from_utf8_lossy(&tags.stdout).contains("v1.0.0"));
    }

    #[test]
    fn test_commit_without_changes_fails() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());

        let vcs = GitCommandVcs::new(dir.path(), true);
        let result = vcs.commit(
            "empty",
            &[dir.path().join("absent.txt")],
            CommitOptions::default(),
        );
        assert!(matches!(result, Err(GitReleaseError::Subprocess(_))));
    }

    #[test]
    fn test_add_with_no_paths_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());

        let vcs = GitCommandVcs::new(dir.path(), true);
        assert!(vcs.add(&[]).is_ok());
    }
}
