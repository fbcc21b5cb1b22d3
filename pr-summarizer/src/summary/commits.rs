//! Commit summarizer.
//!
//! Walks the PR's commits in order. A commit whose marker comment already
//! exists is reused as-is (no model call, no billing); everything else gets
//! a combined diff against its single parent, a model summary, and an issue
//! comment — except the head commit, whose summary is held back and posted
//! together with the PR-level summary once the whole walk finishes.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::MAX_COMMITS_PER_RUN;
use crate::errors::{Error, SummaryResult};
use crate::host::{Comparison, HostApi, RepoRef};
use crate::llm::{CompletionAdapter, CompletionBackend};
use crate::prompt::{commit_diff_prompt, commit_summary_system_prompt};
use crate::rewrite::link_file_tokens;
use crate::summary::pr::summarize_pr;
use crate::summary::{SUMMARY_MARKER, text_after_marker_line};

/// Fixed text used instead of a model summary for merge commits.
pub const MERGE_COMMIT_TEXT: &str = "Not generating summary for merge commits";

/// Section header separating a head commit's own summary from the PR-level
/// summary in the combined comment.
pub const PR_SECTION_HEADER: &str = "PR全体の要約:";

/// Per-commit context for link post-processing.
#[derive(Debug, Clone, Copy)]
pub struct DiffContext<'a> {
    pub commit_sha: &'a str,
    pub issue_number: u64,
    pub repo: &'a RepoRef,
}

fn commit_marker(sha: &str) -> String {
    format!("{sha}{SUMMARY_MARKER}")
}

/// Summarizes the commits of the PR, in hosting-API order, returning
/// `(commit sha, summary)` pairs.
///
/// At most [`MAX_COMMITS_PER_RUN`] commits are newly processed per run;
/// commits with an existing marker comment are reused and do not count.
/// When the head commit was newly summarized in this run, the PR-level
/// summary is generated and posted together with it.
pub async fn summarize_commits<H, C>(
    host: &H,
    llm: &CompletionAdapter<C>,
    repo: &RepoRef,
    pull_number: u64,
    file_summaries: &BTreeMap<String, String>,
) -> SummaryResult<Vec<(String, String)>>
where
    H: HostApi,
    C: CompletionBackend,
{
    let pull = host.get_pull(repo, pull_number).await?;
    let head_sha = pull.head_sha;
    let comments = host.list_issue_comments(repo, pull_number).await?;
    let commits = host.list_commits(repo, pull_number).await?;
    debug!("commits: {} commits in PR #{pull_number}, head={head_sha}", commits.len());

    let mut summaries: Vec<(String, String)> = Vec::new();
    let mut processed = 0usize;
    let mut head_newly_summarized = false;

    for commit in &commits {
        let marker = commit_marker(&commit.sha);
        if let Some(existing) = comments.iter().find(|c| c.body.starts_with(&marker)) {
            // Already summarized in a prior run; parse the text back out.
            let own_section = existing
                .body
                .split(PR_SECTION_HEADER)
                .next()
                .unwrap_or_default();
            summaries.push((
                commit.sha.clone(),
                text_after_marker_line(own_section).trim().to_string(),
            ));
            debug!("commits: reusing summary for {}", commit.sha);
            continue;
        }

        if commit.sha == head_sha {
            head_newly_summarized = true;
        }

        let detail = host.get_commit(repo, &commit.sha).await?;
        if detail.files.is_none() {
            return Err(Error::MissingFileList(commit.sha.clone()));
        }

        let text = if detail.parents.len() != 1 {
            MERGE_COMMIT_TEXT.to_string()
        } else {
            let comparison = host
                .compare_commits(repo, &detail.parents[0], &commit.sha)
                .await?;
            let ctx = DiffContext {
                commit_sha: &commit.sha,
                issue_number: pull_number,
                repo,
            };
            summarize_one_commit(llm, &comparison, ctx).await
        };
        summaries.push((commit.sha.clone(), text.clone()));

        // The head commit's comment is held back for the combined post below.
        if commit.sha != head_sha {
            host.create_issue_comment(repo, pull_number, &format!("{marker}\n\n{text}"))
                .await?;
        }

        processed += 1;
        if processed >= MAX_COMMITS_PER_RUN {
            debug!("commits: per-run cap reached ({MAX_COMMITS_PER_RUN}), stopping");
            break;
        }
    }

    // Post the combined head + PR-level comment only when the head commit's
    // summary came out of this run; a reused head summary means the comment
    // already exists.
    if head_newly_summarized {
        if let Some((_, head_text)) = summaries.iter().find(|(sha, _)| *sha == head_sha) {
            let pr_text = summarize_pr(llm, file_summaries, &summaries).await;
            let body = format!(
                "{}\n\n{}\n\n{PR_SECTION_HEADER}\n\n{}",
                commit_marker(&head_sha),
                head_text,
                pr_text,
            );
            host.create_issue_comment(repo, pull_number, &body).await?;
        }
    }

    Ok(summaries)
}

/// One commit's model summary, with `[path]` tokens expanded to blob links.
async fn summarize_one_commit<C: CompletionBackend>(
    llm: &CompletionAdapter<C>,
    comparison: &Comparison,
    ctx: DiffContext<'_>,
) -> String {
    let prompt = commit_diff_prompt(&comparison.files);
    let raw = llm
        .request_summary(&commit_summary_system_prompt(), &prompt)
        .await;
    let names: Vec<&str> = comparison
        .files
        .iter()
        .map(|f| f.filename.as_str())
        .collect();
    link_file_tokens(&raw, &names, ctx.repo, ctx.commit_sha)
}
