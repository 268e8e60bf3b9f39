//! Release lifecycle pipeline: Bump → Changelog → Commit → Tag.
//!
//! Stages run strictly in order, each behind its own skip gate. All per-run
//! state (the touched-files ledger, the updater cache, the resolved package)
//! lives on [PipelineRun]; nothing is module-level, so repeated runs within
//! one process stay independent.

mod bump;
mod changelog;
mod commit;
mod tag;

use crate::config::ReleaseConfig;
use crate::conventional::ConventionalLog;
use crate::error::Result;
use crate::hooks::{Hook, HookRunner};
use crate::ignore::IgnoreRules;
use crate::package::{self, PackageInfo};
use crate::ui;
use crate::updaters::UpdaterRegistry;
use crate::vcs::Vcs;
use std::collections::HashMap;
use std::path::PathBuf;

/// Files rewritten during the bump stage, keyed by resolved path.
///
/// Reset at the start of each bump, written only there, and read by the
/// commit stage (staging set) and the tag stage (publish hint gate).
#[derive(Debug, Default)]
pub struct TouchedFilesLedger {
    entries: HashMap<PathBuf, bool>,
}

impl TouchedFilesLedger {
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn record(&mut self, path: PathBuf) {
        self.entries.insert(path, true);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Touched paths in a stable order
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.entries.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// True when any touched path has the given basename
    pub fn touched_basename(&self, basename: &str) -> bool {
        self.entries
            .keys()
            .any(|path| path.file_name().map(|name| name == basename).unwrap_or(false))
    }
}

/// One release run, owning all intermediate state.
pub struct PipelineRun<'a> {
    config: &'a ReleaseConfig,
    log: &'a dyn ConventionalLog,
    vcs: &'a dyn Vcs,
    hooks: HookRunner,
    root: PathBuf,
    package: PackageInfo,
    ledger: TouchedFilesLedger,
    registry: UpdaterRegistry,
    ignore: IgnoreRules,
}

impl<'a> PipelineRun<'a> {
    /// Prepare a run rooted at `root`.
    ///
    /// Package discovery happens here, so a missing package file (without
    /// tag fallback) fails before any stage executes.
    pub fn new(
        root: impl Into<PathBuf>,
        config: &'a ReleaseConfig,
        log: &'a dyn ConventionalLog,
        vcs: &'a dyn Vcs,
    ) -> Result<Self> {
        let root = root.into();
        let mut registry = UpdaterRegistry::new();
        let package = package::resolve_package(&root, config, &mut registry)?;
        let hooks = HookRunner::new(&config.hooks, config.silent, config.dry_run);
        let ignore = IgnoreRules::discover(&root);

        Ok(PipelineRun {
            config,
            log,
            vcs,
            hooks,
            root,
            package,
            ledger: TouchedFilesLedger::default(),
            registry,
            ignore,
        })
    }

    /// The package this run releases
    pub fn package(&self) -> &PackageInfo {
        &self.package
    }

    /// Register or replace a lifecycle hook; in-process callables attach here.
    pub fn set_hook(&mut self, name: impl Into<String>, hook: Hook) {
        self.hooks.set_hook(name, hook);
    }

    /// Execute the pipeline, resolving to the released version string.
    ///
    /// Stage failures propagate unmodified; the top level only logs before
    /// re-returning, so a run always ends in full completion or a single
    /// surfaced error. Files already written stay written.
    pub fn run(&mut self) -> Result<String> {
        match self.execute() {
            Ok(version) => Ok(version),
            Err(err) => {
                ui::display_error(self.config.silent, &err.to_string());
                Err(err)
            }
        }
    }

    fn execute(&mut self) -> Result<String> {
        let version = bump::run(self)?;
        changelog::run(self, &version)?;
        commit::run(self, &version)?;
        tag::run(self, &version)?;
        Ok(version)
    }

    fn infile_path(&self) -> PathBuf {
        self.root.join(&self.config.infile)
    }
}

/// Commit and tag message formatting: `%s` expands to the new version.
fn format_message(template: &str, version: &str) -> String {
    if template.contains("%s") {
        template.replace("%s", version)
    } else {
        template.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_records_and_resets() {
        let mut ledger = TouchedFilesLedger::default();
        assert!(ledger.is_empty());

        ledger.record(PathBuf::from("/repo/package.json"));
        ledger.record(PathBuf::from("/repo/Cargo.toml"));
        assert!(!ledger.is_empty());
        assert_eq!(ledger.paths().len(), 2);

        ledger.reset();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_ledger_paths_are_sorted() {
        let mut ledger = TouchedFilesLedger::default();
        ledger.record(PathBuf::from("b.json"));
        ledger.record(PathBuf::from("a.json"));
        assert_eq!(
            ledger.paths(),
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
    }

    #[test]
    fn test_ledger_touched_basename() {
        let mut ledger = TouchedFilesLedger::default();
        ledger.record(PathBuf::from("/repo/sub/package.json"));
        assert!(ledger.touched_basename("package.json"));
        assert!(!ledger.touched_basename("Cargo.toml"));
    }

    #[test]
    fn test_format_message_substitution() {
        assert_eq!(
            format_message("chore(release): %s", "1.2.3"),
            "chore(release): 1.2.3"
        );
        assert_eq!(format_message("fixed message", "1.2.3"), "fixed message");
    }
}
