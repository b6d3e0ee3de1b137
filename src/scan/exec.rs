use crate::cli::CommonArgs;
use crate::discover::find_repos;
use crate::git::GitRepo;
use crate::model::Row;
use crate::report;
use crate::scan::{aggregate, invoke, locate, parse, ScanConfig};
use anyhow::Context;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, out: PathBuf) -> anyhow::Result<()> {
    let config = ScanConfig::from_args(&common).context("Invalid scan configuration")?;
    let root = match common.root.clone() {
        Some(r) => r,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let repos = find_repos(&root);
    if repos.is_empty() {
        anyhow::bail!("no git repositories found under {}", root.display());
    }
    info!(root = %root.display(), repos = repos.len(), "starting historical scan");

    // Progress bars would corrupt machine-readable stdout.
    let quiet = json || ndjson;
    // One draw target shared by all repository bars, so parallel workers do
    // not interleave redraws on stderr.
    let progress = MultiProgress::new();

    // Repositories are independent (each owns its working tree), so they run
    // in parallel; each repository's commit loop stays strictly sequential.
    // Collecting per-repository buffers and flattening in discovery order
    // keeps the dataset order deterministic regardless of completion timing.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(common.jobs.unwrap_or(0))
        .build()
        .context("Failed to build worker pool")?;
    let per_repo: Vec<Vec<Row>> = pool.install(|| {
        repos
            .par_iter()
            .map(|path| scan_repository(path, &config, quiet, &progress))
            .collect()
    });
    let rows: Vec<Row> = per_repo.into_iter().flatten().collect();

    if json {
        report::output_json(&rows, &root)?;
    } else if ndjson {
        report::output_ndjson(&rows)?;
    } else {
        report::write_csv(&out, &rows).context("Failed to write dataset")?;
        report::print_summary(&rows, repos.len(), &out);
    }

    Ok(())
}

/// Scans one repository's full history. Never fails the run: an unreadable
/// repository is skipped with a warning, a failed checkout becomes a
/// scan-error row, and tool failures surface as row text.
fn scan_repository(
    path: &Path,
    config: &ScanConfig,
    quiet: bool,
    progress: &MultiProgress,
) -> Vec<Row> {
    let repo_id = path.display().to_string();

    let repo = match GitRepo::open(path) {
        Ok(repo) => repo,
        Err(e) => {
            warn!(repo = %repo_id, error = %e, "skipping repository: cannot open");
            return Vec::new();
        }
    };
    let commits = match repo.sequence_commits() {
        Ok(commits) => commits,
        Err(e) => {
            warn!(repo = %repo_id, error = %e, "skipping repository: cannot read history");
            return Vec::new();
        }
    };

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        progress.add(ProgressBar::new(commits.len() as u64))
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    // Remember where the repository's owner left it; every checkout below
    // detaches HEAD.
    let original_branch = repo.head_branch(config.timeout);

    let mut rows = Vec::new();
    for commit in &commits {
        pb.set_message(format!("{} {}", repo_id, &commit.hash[..8.min(commit.hash.len())]));

        match repo.checkout_force(&commit.hash, config.timeout) {
            Ok(()) => {
                let files = locate::locate(repo.path(), config);
                let mut parsed = Vec::new();
                for file in &files {
                    let output = invoke::invoke(file, repo.path(), config);
                    for line in output.text.lines() {
                        parsed.push(parse::parse(line));
                    }
                }
                rows.extend(aggregate::accumulate(&repo_id, commit, parsed));
            }
            // The tree may be left mid-transition here; the next iteration's
            // forced checkout repairs it, so we only record and move on.
            Err(e) => {
                warn!(repo = %repo_id, commit = %commit.hash, error = %e, "materialization failed; recording and continuing");
                rows.push(aggregate::scan_error_row(&repo_id, commit, &e.to_string()));
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    if let Some(branch) = original_branch {
        if let Err(e) = repo.checkout_force(&branch, config.timeout) {
            warn!(repo = %repo_id, branch = %branch, error = %e, "could not restore original branch");
        }
    }

    info!(repo = %repo_id, commits = commits.len(), rows = rows.len(), "repository scan complete");
    rows
}
