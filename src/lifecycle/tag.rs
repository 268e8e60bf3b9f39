//! Tag stage: create the release tag and print the publish hint.

use crate::error::Result;
use crate::lifecycle::{format_message, PipelineRun};
use crate::ui;

pub(super) fn run(run: &mut PipelineRun, version: &str) -> Result<()> {
    let cfg = run.config;
    if cfg.skip.tag {
        return Ok(());
    }

    run.hooks.run("pretag", Some(version))?;
    exec_tag(run, version)?;
    run.hooks.run("posttag", Some(version))?;
    Ok(())
}

fn exec_tag(run: &PipelineRun, version: &str) -> Result<()> {
    let cfg = run.config;
    let tag_name = format!("{}{}", cfg.tag_prefix, version);

    ui::checkpoint(
        cfg.silent,
        cfg.dry_run,
        &format!("tagging release {}", tag_name),
    );

    if !cfg.dry_run {
        run.vcs
            .tag(&tag_name, &format_message(&cfg.message, version), cfg.sign)?;
    }

    let branch = run.vcs.current_branch()?;
    let mut hint = format!("git push --follow-tags origin {}", branch.trim());

    // The publish suffix only appears when a package manifest was actually
    // rewritten this run and the package is not private.
    if !run.package.private && run.ledger.touched_basename("package.json") {
        hint.push_str(" && npm publish");
        if let Some(id) = &cfg.prerelease {
            if id.is_empty() {
                hint.push_str(" --tag prerelease");
            } else {
                hint.push_str(&format!(" --tag {}", id));
            }
        }
    }

    ui::info_checkpoint(cfg.silent, &format!("Run `{}` to publish", hint));
    Ok(())
}
