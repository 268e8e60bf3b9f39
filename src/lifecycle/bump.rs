//! Bump stage: resolve the next version and rewrite every update target.

use crate::error::{GitReleaseError, Result};
use crate::lifecycle::PipelineRun;
use crate::ui;
use crate::version::{resolve_version, ReleaseContext, ReleaseType};
use semver::Version;
use std::fs;
use std::io::ErrorKind;

/// Run the bump stage, returning the resolved version.
///
/// When the stage is skipped the current version stands in as the resolved
/// version for the rest of the pipeline.
pub(super) fn run(run: &mut PipelineRun) -> Result<String> {
    let cfg = run.config;
    let current = run.package.version.clone();
    if cfg.skip.bump {
        return Ok(current);
    }

    run.ledger.reset();

    run.hooks.run("prerelease", None)?;
    let prebump_override = run.hooks.run("prebump", None)?;

    let mut ctx = ReleaseContext {
        current_version: current.clone(),
        requested: None,
        exact_version: None,
        prerelease_id: cfg.prerelease.clone(),
        first_release: cfg.first_release,
    };
    if let Some(raw) = cfg.release_as.as_deref() {
        ctx.set_release_as(raw)?;
    }
    if let Some(raw) = prebump_override.as_deref() {
        ctx.set_release_as(raw)?;
    }

    // The commit-history collaborator is only consulted when nothing else
    // decides the bump.
    let recommendation = if ctx.first_release || ctx.requested.is_some() || ctx.exact_version.is_some()
    {
        ReleaseType::Patch
    } else {
        let parsed = Version::parse(current.trim()).map_err(|err| {
            GitReleaseError::invalid_version(format!("'{}': {}", current, err))
        })?;
        run.log.recommend_bump(parsed.major == 0)?
    };

    let next = resolve_version(&ctx, recommendation)?;

    if cfg.first_release {
        ui::checkpoint(cfg.silent, cfg.dry_run, "skip version bump on first release");
    } else {
        update_targets(run, &next);
    }

    run.hooks.run("postbump", Some(&next))?;
    Ok(next)
}

/// Rewrite every configured target, recording the touched files.
///
/// Per-target problems are never fatal: ignored and absent files are
/// skipped silently, everything else is logged and the target excluded.
fn update_targets(run: &mut PipelineRun, new_version: &str) {
    let cfg = run.config;

    for target in &cfg.bump_files {
        let path = run.root.join(&target.filename);
        if run.ignore.is_ignored(&path) {
            continue;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => {
                ui::display_warning(
                    cfg.silent,
                    &format!("skipping {}: {}", target.filename.display(), err),
                );
                continue;
            }
        };

        let updater = match run.registry.resolve(target) {
            Ok(updater) => updater,
            Err(err) => {
                ui::display_warning(
                    cfg.silent,
                    &format!("skipping {}: {}", target.filename.display(), err),
                );
                continue;
            }
        };

        let old_version = match updater.read_version(&contents) {
            Ok(version) => version,
            Err(err) => {
                ui::display_warning(
                    cfg.silent,
                    &format!("skipping {}: {}", target.filename.display(), err),
                );
                continue;
            }
        };

        let updated = match updater.write_version(&contents, new_version) {
            Ok(updated) => updated,
            Err(err) => {
                ui::display_warning(
                    cfg.silent,
                    &format!("skipping {}: {}", target.filename.display(), err),
                );
                continue;
            }
        };

        ui::checkpoint(
            cfg.silent,
            cfg.dry_run,
            &format!(
                "bumping version in {} from {} to {}",
                target.filename.display(),
                old_version,
                new_version
            ),
        );

        if !cfg.dry_run {
            if let Err(err) = fs::write(&path, updated) {
                ui::display_warning(
                    cfg.silent,
                    &format!("skipping {}: {}", target.filename.display(), err),
                );
                continue;
            }
        }

        run.ledger.record(path);
    }
}
