//! Release step: stage, commit, and push the published outputs.
//!
//! "Nothing changed" is an expected monthly outcome and is logged, not
//! failed. A rejected push surfaces as an error (exit code 6) so a stale
//! site never goes unnoticed.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::domain::Summary;
use crate::error::AppError;

/// What the release step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Committed,
    NothingToCommit,
}

/// Commit message populated with run statistics.
pub fn commit_message(summary: &Summary) -> String {
    format!(
        "Refresh rent heat map: {} active + {} rented listings ({}mo lookback)",
        summary.active_count, summary.rented_count, summary.lookback_months
    )
}

/// Stage the enumerated output paths, commit, and (optionally) push.
pub fn release(
    site_dir: &Path,
    paths: &[PathBuf],
    summary: &Summary,
    remote: &str,
    branch: &str,
    push: bool,
) -> Result<ReleaseOutcome, AppError> {
    // git runs with `-C site_dir`, so pathspecs must be repo-relative or the
    // site-dir prefix would resolve a second time inside the repo.
    let pathspecs: Vec<String> = paths
        .iter()
        .map(|p| p.strip_prefix(site_dir).unwrap_or(p).display().to_string())
        .collect();

    let mut add_args: Vec<String> = vec!["add".to_string(), "--".to_string()];
    add_args.extend(pathspecs.iter().cloned());
    run_git(site_dir, &add_args)?;

    let mut status_args: Vec<String> = vec![
        "status".to_string(),
        "--porcelain".to_string(),
        "--".to_string(),
    ];
    status_args.extend(pathspecs.iter().cloned());
    let status = run_git(site_dir, &status_args)?;
    if status.trim().is_empty() {
        info!("nothing to commit; site already up to date");
        return Ok(ReleaseOutcome::NothingToCommit);
    }

    run_git(
        site_dir,
        &[
            "commit".to_string(),
            "-m".to_string(),
            commit_message(summary),
        ],
    )?;
    info!("committed: {}", commit_message(summary));

    if push {
        run_git(
            site_dir,
            &["push".to_string(), remote.to_string(), branch.to_string()],
        )?;
        info!("pushed to {remote}/{branch}");
    } else {
        info!("push skipped (--no-push)");
    }

    Ok(ReleaseOutcome::Committed)
}

/// Run one git command in the site directory, failing with the captured
/// stderr on a non-zero exit.
fn run_git(dir: &Path, args: &[String]) -> Result<String, AppError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|e| AppError::new(6, format!("Failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::new(
            6,
            format!(
                "git {} failed ({}): {}",
                args.first().map(String::as_str).unwrap_or(""),
                output.status,
                stderr.trim()
            ),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
