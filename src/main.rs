use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use git_release::config::{self, ReleaseConfig};
use git_release::conventional::GitCommitLog;
use git_release::lifecycle::PipelineRun;
use git_release::vcs::GitCommandVcs;

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    about = "Bump the version, update the changelog, and cut a tagged release commit"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Read and write the changelog at this path")]
    infile: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Commit message template; %s is replaced with the new version"
    )]
    message: Option<String>,

    #[arg(
        short,
        long,
        help = "Release exactly this version, or one of major|minor|patch"
    )]
    release_as: Option<String>,

    #[arg(
        short,
        long,
        help = "Make a prerelease, with an optional identifier (e.g. alpha)",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    prerelease: Option<String>,

    #[arg(short, long, help = "First release: keep the current version, no bump")]
    first_release: bool,

    #[arg(short, long, help = "Sign the release commit and tag")]
    sign: bool,

    #[arg(short, long, help = "Bypass git hooks during the commit phase")]
    no_verify: bool,

    #[arg(
        short = 'a',
        long,
        help = "Commit all staged changes, not just files touched by the run"
    )]
    commit_all: bool,

    #[arg(long, help = "Tag prefix for the release tag")]
    tag_prefix: Option<String>,

    #[arg(long, help = "Don't print logs and errors")]
    silent: bool,

    #[arg(long, help = "Preview the release without writing, committing, or tagging")]
    dry_run: bool,

    #[arg(long, help = "Skip the version bump stage")]
    skip_bump: bool,

    #[arg(long, help = "Skip the changelog stage")]
    skip_changelog: bool,

    #[arg(long, help = "Skip the commit stage")]
    skip_commit: bool,

    #[arg(long, help = "Skip the tag stage")]
    skip_tag: bool,
}

fn main() {
    let args = Args::parse();
    if run(args).is_err() {
        // The pipeline already surfaced the error message
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref()).context("loading config")?;
    apply_overrides(&mut config, &args);

    let root = std::env::current_dir().context("resolving working directory")?;
    let log = GitCommitLog::new(&root, config.tag_prefix.as_str());
    let vcs = GitCommandVcs::new(&root, config.silent);

    let mut pipeline = PipelineRun::new(&root, &config, &log, &vcs)?;
    let old_version = pipeline.package().version.clone();
    let new_version = pipeline.run()?;

    if !config.silent {
        println!("\nBumped version from {} to {}", old_version, new_version);
    }
    Ok(())
}

/// Overlay CLI flags onto the loaded configuration.
fn apply_overrides(config: &mut ReleaseConfig, args: &Args) {
    if let Some(infile) = &args.infile {
        config.infile = infile.clone();
    }
    if let Some(message) = &args.message {
        config.message = message.clone();
    }
    if let Some(release_as) = &args.release_as {
        config.release_as = Some(release_as.clone());
    }
    if let Some(prerelease) = &args.prerelease {
        config.prerelease = Some(prerelease.clone());
    }
    if let Some(tag_prefix) = &args.tag_prefix {
        config.tag_prefix = tag_prefix.clone();
    }
    if args.first_release {
        config.first_release = true;
    }
    if args.sign {
        config.sign = true;
    }
    if args.no_verify {
        config.no_verify = true;
    }
    if args.commit_all {
        config.commit_all = true;
    }
    if args.silent {
        config.silent = true;
    }
    if args.dry_run {
        config.dry_run = true;
    }
    if args.skip_bump {
        config.skip.bump = true;
    }
    if args.skip_changelog {
        config.skip.changelog = true;
    }
    if args.skip_commit {
        config.skip.commit = true;
    }
    if args.skip_tag {
        config.skip.tag = true;
    }
}
