//! Public entry for the PR summarization pipeline.
//!
//! Single high-level function to run the whole pipeline for a pull request.
//!
//! 1) **Stage 1 — File summaries**
//!    - List changed files, resolve pre-change blob ids from the base tree
//!    - Reuse summaries whose review comment still matches the current blobs
//!    - Delete stale comments, generate and post the missing summaries
//!
//! 2) **Stage 2 — Commit summaries**
//!    - Walk the PR's commits in order, reusing existing marker comments
//!    - Diff each new commit against its parent, summarize, post
//!
//! 3) **Stage 3 — PR summary**
//!    - When the head commit was newly summarized, synthesize a PR-level
//!      digest and post it together with the head commit's summary
//!
//! All cross-run state lives in the comments already posted on the PR. The
//! pipeline uses `tracing` for debug logging and avoids `async-trait` and
//! heap trait objects (no `Box<dyn ...>`); dispatch is plain `async fn`
//! over generic host/completion seams.

pub mod config;
pub mod errors;
pub mod host;
pub mod llm;
pub mod prompt;
pub mod rewrite;
pub mod summary;

#[cfg(test)]
pub(crate) mod testutil;

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::debug;

pub use errors::{Error, HostError, SummaryResult};
pub use host::{GitHubClient, HostApi, RepoRef};
pub use llm::{CompletionAdapter, CompletionBackend, openai_model_config};

/// Final output of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Per-file summaries keyed by path (current and reused alike).
    pub file_summaries: BTreeMap<String, String>,
    /// Per-commit summaries in hosting-API commit order.
    pub commit_summaries: Vec<(String, String)>,
}

/// Run all three stages for a single pull request.
///
/// # Logging
/// Emits `DEBUG` logs per stage:
/// - `stage1: file summaries (files=N)`
/// - `stage2: commit summaries (commits=M)`
pub async fn run_summary<H, C>(
    host: &H,
    llm: &CompletionAdapter<C>,
    repo: &RepoRef,
    pull_number: u64,
) -> SummaryResult<RunReport>
where
    H: HostApi,
    C: CompletionBackend,
{
    let t0 = Instant::now();
    debug!("stage1: summarize changed files of PR #{pull_number}");
    let file_summaries = summary::summarize_files(host, llm, repo, pull_number).await?;
    debug!(
        "stage1: file summaries ready (files={}, {} ms)",
        file_summaries.len(),
        t0.elapsed().as_millis()
    );

    let t1 = Instant::now();
    debug!("stage2: summarize commits of PR #{pull_number}");
    let commit_summaries =
        summary::summarize_commits(host, llm, repo, pull_number, &file_summaries).await?;
    debug!(
        "stage2: commit summaries ready (commits={}, {} ms)",
        commit_summaries.len(),
        t1.elapsed().as_millis()
    );

    debug!("pipeline done in {} ms", t0.elapsed().as_millis());
    Ok(RunReport {
        file_summaries,
        commit_summaries,
    })
}
