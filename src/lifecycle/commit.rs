//! Commit stage: stage touched files and create the release commit.

use crate::error::Result;
use crate::lifecycle::{format_message, PipelineRun};
use crate::ui;
use crate::vcs::CommitOptions;

pub(super) fn run(run: &mut PipelineRun, version: &str) -> Result<()> {
    let cfg = run.config;
    if cfg.skip.commit {
        return Ok(());
    }

    let message_override = run.hooks.run("precommit", Some(version))?;
    let template = message_override.unwrap_or_else(|| cfg.message.clone());
    exec_commit(run, &template, version)?;

    run.hooks.run("postcommit", Some(version))?;
    Ok(())
}

fn exec_commit(run: &PipelineRun, template: &str, version: &str) -> Result<()> {
    let cfg = run.config;

    let mut paths = run.ledger.paths();
    if !cfg.skip.changelog {
        paths.push(run.infile_path());
    }

    if paths.is_empty() && !cfg.commit_all {
        // Nothing was touched this run (bump and changelog both skipped)
        ui::checkpoint(cfg.silent, cfg.dry_run, "nothing to commit");
        return Ok(());
    }

    let mut shown: Vec<String> = paths
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .collect();
    if cfg.commit_all {
        shown.push("all staged files".to_string());
    }
    ui::checkpoint(
        cfg.silent,
        cfg.dry_run,
        &format!("committing {}", shown.join(" and ")),
    );

    if cfg.dry_run {
        return Ok(());
    }

    run.vcs.add(&paths)?;
    run.vcs.commit(
        &format_message(template, version),
        &paths,
        CommitOptions {
            sign: cfg.sign,
            no_verify: cfg.no_verify,
            all: cfg.commit_all,
        },
    )?;

    Ok(())
}
