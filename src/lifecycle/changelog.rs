//! Changelog stage: splice the new release entry above the previous one.

use crate::error::Result;
use crate::lifecycle::PipelineRun;
use crate::ui;
use regex::Regex;
use std::fs;

/// First line of the previous release entry: a heading carrying a bare
/// version (optionally decorated with a link or date), or a legacy anchor.
const START_OF_LAST_RELEASE_PATTERN: &str =
    r"(?m)(^#+ (?:<.*>)?\[?[0-9]+\.[0-9]+\.[0-9]+|<a name=)";

pub(super) fn run(run: &mut PipelineRun, version: &str) -> Result<()> {
    let cfg = run.config;
    if cfg.skip.changelog {
        return Ok(());
    }

    run.hooks.run("prechangelog", Some(version))?;
    output_changelog(run, version)?;
    run.hooks.run("postchangelog", Some(version))?;
    Ok(())
}

fn output_changelog(run: &PipelineRun, version: &str) -> Result<()> {
    let cfg = run.config;
    let infile = run.infile_path();
    create_if_missing(run, &infile)?;

    let mut old_content = if cfg.dry_run {
        String::new()
    } else {
        fs::read_to_string(&infile)?
    };

    // Everything before the previous release entry is replaced; everything
    // from the match on is preserved verbatim.
    if let Some(m) = Regex::new(START_OF_LAST_RELEASE_PATTERN)
        .ok()
        .and_then(|pattern| pattern.find(&old_content))
    {
        old_content = old_content[m.start()..].to_string();
    }

    let content = run.log.release_notes(version)?;

    ui::checkpoint(
        cfg.silent,
        cfg.dry_run,
        &format!("outputting changes to {}", cfg.infile.display()),
    );

    if cfg.dry_run {
        ui::info_checkpoint(cfg.silent, &format!("\n---\n{}\n---\n", content.trim()));
    } else {
        let merged = format!("{}\n{}{}", cfg.header, content, old_content);
        let output = format!("{}\n", merged.trim_end_matches('\n'));
        fs::write(&infile, output)?;
    }

    Ok(())
}

fn create_if_missing(run: &PipelineRun, infile: &std::path::Path) -> Result<()> {
    if infile.exists() {
        return Ok(());
    }
    let cfg = run.config;
    ui::checkpoint(
        cfg.silent,
        cfg.dry_run,
        &format!("created {}", cfg.infile.display()),
    );
    if !cfg.dry_run {
        fs::write(infile, "\n")?;
    }
    Ok(())
}
