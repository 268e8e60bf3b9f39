//! Conventional-commit collaborator.
//!
//! The pipeline never parses commit history itself; it consults a
//! [ConventionalLog] for a release-type recommendation and for the
//! release-notes body spliced into the changelog. [GitCommitLog] is the
//! default implementation reading the enclosing repository; [StaticLog]
//! serves tests and programmatic callers with canned output.

use crate::error::Result;
use crate::package::latest_semver_tag;
use crate::version::ReleaseType;
use regex::Regex;
use std::path::PathBuf;

/// Commit-log collaborator consulted by the pipeline.
pub trait ConventionalLog {
    /// Recommend which component to bump.
    ///
    /// `pre_major` applies pre-1.0 semantics: breaking changes map to minor
    /// and features to patch.
    fn recommend_bump(&self, pre_major: bool) -> Result<ReleaseType>;

    /// Render the release-notes body for `version`.
    ///
    /// The first heading must carry the bare version number so a later run
    /// can locate the entry when splicing the changelog.
    fn release_notes(&self, version: &str) -> Result<String>;
}

/// A commit message split into its conventional-commit parts
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

/// Parse a conventional commit header like `feat(api)!: add endpoint`.
///
/// Returns `None` for messages that do not follow the convention.
pub fn parse_conventional_commit(message: &str) -> Option<ParsedCommit> {
    let re = Regex::new(r"^([a-z]+)(?:\(([^)]+)\))?(!?):\s*(.*)").ok()?;
    let captures = re.captures(message.lines().next().unwrap_or(""))?;

    let commit_type = captures.get(1)?.as_str().to_string();
    let scope = captures.get(2).map(|m| m.as_str().to_string());
    let exclamation = captures.get(3).map(|m| m.as_str()).unwrap_or("");
    let description = captures.get(4).map(|m| m.as_str()).unwrap_or("").to_string();

    let is_breaking_change = exclamation == "!"
        || message.contains("BREAKING CHANGE:")
        || message.contains("BREAKING-CHANGE:");

    Some(ParsedCommit {
        r#type: commit_type,
        scope,
        description,
        is_breaking_change,
    })
}

/// Classify commit messages into a recommended bump type.
///
/// Breaking changes dominate, then features, then everything else; commits
/// that do not follow the convention count as patch-level changes.
pub fn classify_messages(messages: &[String], pre_major: bool) -> ReleaseType {
    let mut has_breaking = false;
    let mut has_features = false;

    for message in messages {
        if let Some(parsed) = parse_conventional_commit(message) {
            if parsed.is_breaking_change {
                has_breaking = true;
            }
            if matches!(parsed.r#type.as_str(), "feat" | "feature") {
                has_features = true;
            }
        }
    }

    if has_breaking {
        if pre_major {
            ReleaseType::Minor
        } else {
            ReleaseType::Major
        }
    } else if has_features {
        if pre_major {
            ReleaseType::Patch
        } else {
            ReleaseType::Minor
        }
    } else {
        ReleaseType::Patch
    }
}

/// Default collaborator reading conventional commits from the enclosing
/// git repository.
pub struct GitCommitLog {
    root: PathBuf,
    tag_prefix: String,
}

impl GitCommitLog {
    /// Create a log rooted at `root`, stripping `tag_prefix` from tags.
    pub fn new(root: impl Into<PathBuf>, tag_prefix: impl Into<String>) -> Self {
        GitCommitLog {
            root: root.into(),
            tag_prefix: tag_prefix.into(),
        }
    }

    /// Commit messages from HEAD back to the newest version tag, newest
    /// first. All messages are returned when no version tag exists.
    fn commit_messages(&self) -> Result<Vec<String>> {
        let repo = git2::Repository::discover(&self.root)?;

        let stop_oid = match latest_semver_tag(&repo, &self.tag_prefix)? {
            Some((tag_name, _)) => repo
                .find_reference(&format!("refs/tags/{}", tag_name))
                .ok()
                .and_then(|reference| reference.peel(git2::ObjectType::Any).ok())
                .map(|object| object.id()),
            None => None,
        };

        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;

        let mut messages = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if Some(oid) == stop_oid {
                break;
            }
            if let Ok(commit) = repo.find_commit(oid) {
                if let Some(message) = commit.message() {
                    messages.push(message.to_string());
                }
            }
        }

        Ok(messages)
    }
}

impl ConventionalLog for GitCommitLog {
    fn recommend_bump(&self, pre_major: bool) -> Result<ReleaseType> {
        let messages = self.commit_messages()?;
        Ok(classify_messages(&messages, pre_major))
    }

    fn release_notes(&self, version: &str) -> Result<String> {
        let messages = self.commit_messages()?;

        let mut breaking = Vec::new();
        let mut features = Vec::new();
        let mut fixes = Vec::new();

        for message in &messages {
            let Some(parsed) = parse_conventional_commit(message) else {
                continue;
            };
            let entry = match &parsed.scope {
                Some(scope) => format!("* **{}:** {}", scope, parsed.description),
                None => format!("* {}", parsed.description),
            };
            if parsed.is_breaking_change {
                breaking.push(entry.clone());
            }
            match parsed.r#type.as_str() {
                "feat" | "feature" => features.push(entry),
                "fix" | "perf" => fixes.push(entry),
                _ => {}
            }
        }

        let mut notes = format!("## {}\n", version);
        for (heading, entries) in [
            ("### ⚠ BREAKING CHANGES", breaking),
            ("### Features", features),
            ("### Bug Fixes", fixes),
        ] {
            if entries.is_empty() {
                continue;
            }
            notes.push_str(&format!("\n{}\n\n", heading));
            for entry in entries {
                notes.push_str(&entry);
                notes.push('\n');
            }
        }

        Ok(notes)
    }
}

/// Canned collaborator for tests and programmatic callers.
///
/// `notes` may contain `%s`, replaced with the version being released.
pub struct StaticLog {
    pub recommendation: ReleaseType,
    pub notes: String,
}

impl StaticLog {
    pub fn new(recommendation: ReleaseType, notes: impl Into<String>) -> Self {
        StaticLog {
            recommendation,
            notes: notes.into(),
        }
    }
}

impl ConventionalLog for StaticLog {
    fn recommend_bump(&self, _pre_major: bool) -> Result<ReleaseType> {
        Ok(self.recommendation)
    }

    fn release_notes(&self, version: &str) -> Result<String> {
        Ok(self.notes.replace("%s", version))
    }
}
