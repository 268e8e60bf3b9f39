use crate::error::Result;
use crate::vcs::{CommitOptions, Vcs};
use std::path::PathBuf;
use std::sync::Mutex;

/// Operation recorded by [MockVcs]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsOperation {
    Add(Vec<PathBuf>),
    Commit {
        message: String,
        paths: Vec<PathBuf>,
        opts: CommitOptions,
    },
    Tag {
        name: String,
        message: String,
        sign: bool,
    },
}

/// Mock VCS for testing without actual git operations
pub struct MockVcs {
    operations: Mutex<Vec<VcsOperation>>,
    branch: String,
}

impl MockVcs {
    /// Create a mock on branch "main"
    pub fn new() -> Self {
        MockVcs::with_branch("main")
    }

    /// Create a mock reporting the given current branch
    pub fn with_branch(branch: impl Into<String>) -> Self {
        MockVcs {
            operations: Mutex::new(Vec::new()),
            branch: branch.into(),
        }
    }

    /// All operations recorded so far, in call order
    pub fn operations(&self) -> Vec<VcsOperation> {
        self.operations.lock().expect("mock lock poisoned").clone()
    }

    fn record(&self, operation: VcsOperation) {
        self.operations
            .lock()
            .expect("mock lock poisoned")
            .push(operation);
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vcs for MockVcs {
    fn add(&self, paths: &[PathBuf]) -> Result<()> {
        self.record(VcsOperation::Add(paths.to_vec()));
        Ok(())
    }

    fn commit(&self, message: &str, paths: &[PathBuf], opts: CommitOptions) -> Result<()> {
        self.record(VcsOperation::Commit {
            message: message.to_string(),
            paths: paths.to_vec(),
            opts,
        });
        Ok(())
    }

    fn tag(&self, name: &str, message: &str, sign: bool) -> Result<()> {
        self.record(VcsOperation::Tag {
            name: name.to_string(),
            message: message.to_string(),
            sign,
        });
        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_operations_in_order() {
        let vcs = MockVcs::new();
        vcs.add(&[PathBuf::from("package.json")]).unwrap();
        vcs.commit(
            "chore(release): 1.0.0",
            &[PathBuf::from("package.json")],
            CommitOptions::default(),
        )
        .unwrap();
        vcs.tag("v1.0.0", "chore(release): 1.0.0", false).unwrap();

        let ops = vcs.operations();
        assert_eq!(ops.len(), 3);
        assert!(matches!(ops[0], VcsOperation::Add(_)));
        assert!(matches!(ops[1], VcsOperation::Commit { .. }));
        assert!(matches!(ops[2], VcsOperation::Tag { .. }));
    }

    #[test]
    fn test_mock_current_branch() {
        assert_eq!(MockVcs::new().current_branch().unwrap(), "main");
        assert_eq!(
            MockVcs::with_branch("develop").current_branch().unwrap(),
            "develop"
        );
    }
}
