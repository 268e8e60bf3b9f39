//! Repository ignore-rule checks for update targets.

use std::path::Path;

/// Ignore-rule gate backed by the enclosing git repository, if any.
///
/// Targets excluded by the repository's ignore rules are skipped before any
/// read or write is attempted. Outside a repository nothing is ignored.
pub struct IgnoreRules {
    repo: Option<git2::Repository>,
}

impl IgnoreRules {
    /// Discover the repository enclosing `root`.
    pub fn discover(root: &Path) -> Self {
        IgnoreRules {
            repo: git2::Repository::discover(root).ok(),
        }
    }

    /// True when `path` is excluded by the repository's ignore rules.
    pub fn is_ignored(&self, path: &Path) -> bool {
        match &self.repo {
            Some(repo) => repo.is_path_ignored(path).unwrap_or(false),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_outside_a_repository_nothing_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let rules = IgnoreRules::discover(dir.path());
        assert!(!rules.is_ignored(&dir.path().join("package.json")));
    }

    #[test]
    fn test_gitignored_path_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join(".gitignore"), "generated.json\n").unwrap();

        let rules = IgnoreRules::discover(dir.path());
        assert!(rules.is_ignored(&dir.path().join("generated.json")));
        assert!(!rules.is_ignored(&dir.path().join("package.json")));
    }
}
