//! File summarizer.
//!
//! For every file touched by the PR, either reuse the summary already posted
//! as an inline review comment (keyed by the before/after blob id pair) or
//! request a new one and post it. Comments whose key no longer matches any
//! current file are stale (superseded by a push) and get deleted first.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::config::{MAX_FILES_PER_RUN, NONE_SHA};
use crate::errors::SummaryResult;
use crate::host::{DiffSide, HostApi, NewReviewComment, PullFile, RepoRef, TreeEntry};
use crate::llm::{CompletionAdapter, CompletionBackend};
use crate::prompt::{file_diff_prompt, file_summary_system_prompt};
use crate::rewrite::{blob_url, short_sha, strip_review_links};
use crate::summary::{SUMMARY_MARKER, text_after_marker_line};

/// One file of the PR with its before/after content identity.
#[derive(Debug, Clone)]
pub struct ModifiedFile {
    pub filename: String,
    /// Post-change blob id.
    pub current_sha: String,
    /// Pre-change blob id, or the `"None"` sentinel for added files.
    pub origin_sha: String,
    /// Unified diff; empty for binary files and pure renames.
    pub diff: String,
    /// First changed line in the post-change file. Defaults to 1 when the
    /// hunk header is absent; a parsed non-positive value (pure deletion)
    /// is kept so the comment anchors on the LEFT side.
    pub insertion_line: i64,
}

/// First post-change line touched, from the first `@@ -a,b +c,d @@` header.
pub(crate) fn first_changed_line(patch: &str) -> Option<i64> {
    let header = patch.lines().find(|l| l.starts_with("@@"))?;
    let after_plus = header.split('+').nth(1)?;
    after_plus
        .split(|c: char| c == ',' || c == ' ')
        .next()?
        .parse()
        .ok()
}

/// Identity key a review comment must contain (after link stripping) to
/// count as the summary of this file's current state.
fn summary_key(origin_sha: &str, current_sha: &str) -> String {
    format!("{origin_sha} - {current_sha}{SUMMARY_MARKER}")
}

fn collect_modified_files(files: &[PullFile], tree: &[TreeEntry]) -> Vec<ModifiedFile> {
    let base_blobs: HashMap<&str, &str> = tree
        .iter()
        .map(|e| (e.path.as_str(), e.sha.as_str()))
        .collect();

    files
        .iter()
        .map(|f| {
            let diff = f.patch.clone().unwrap_or_default();
            ModifiedFile {
                filename: f.filename.clone(),
                current_sha: f.sha.clone(),
                origin_sha: base_blobs
                    .get(f.filename.as_str())
                    .map(|s| (*s).to_string())
                    .unwrap_or_else(|| NONE_SHA.to_string()),
                insertion_line: first_changed_line(&diff).unwrap_or(1),
                diff,
            }
        })
        .collect()
}

/// Summarizes every modified file of the PR, returning filename → summary.
///
/// Reconciles first (deletes stale summary comments), then reuses or
/// generates per file. At most [`MAX_FILES_PER_RUN`] summaries are newly
/// generated per run; remaining files are simply left for the next run.
pub async fn summarize_files<H, C>(
    host: &H,
    llm: &CompletionAdapter<C>,
    repo: &RepoRef,
    pull_number: u64,
) -> SummaryResult<BTreeMap<String, String>>
where
    H: HostApi,
    C: CompletionBackend,
{
    let files = host.list_files(repo, pull_number).await?;
    let pull = host.get_pull(repo, pull_number).await?;
    let tree = host.get_tree(repo, &pull.base_sha).await?;

    let modified = collect_modified_files(&files, &tree);
    debug!("files: {} modified files in PR #{pull_number}", modified.len());

    // Existing summary comments, with short-sha links rewritten back to the
    // full blob ids so bodies can be matched against identity keys.
    let existing: Vec<(String, u64)> = host
        .list_review_comments(repo, pull_number)
        .await?
        .into_iter()
        .map(|c| (strip_review_links(&c.body), c.id))
        .filter(|(body, _)| body.contains(SUMMARY_MARKER))
        .collect();

    // Reconciliation: anything not matching a current (origin, current) pair
    // was superseded by a push.
    let live_keys: HashSet<String> = modified
        .iter()
        .map(|f| summary_key(&f.origin_sha, &f.current_sha))
        .collect();
    for (body, id) in &existing {
        if !live_keys.iter().any(|key| body.contains(key)) {
            debug!("files: deleting stale summary comment id={id}");
            host.delete_review_comment(repo, *id).await?;
        }
    }

    let system = file_summary_system_prompt();
    let mut result = BTreeMap::new();
    let mut generated = 0usize;

    for file in &modified {
        if file.diff.is_empty() {
            // Binary file or pure rename; nothing to summarize.
            continue;
        }

        let key = summary_key(&file.origin_sha, &file.current_sha);
        if let Some((body, _)) = existing.iter().find(|(body, _)| body.contains(&key)) {
            debug!("files: reusing summary for {}", file.filename);
            result.insert(
                file.filename.clone(),
                text_after_marker_line(body).to_string(),
            );
            continue;
        }

        let text = llm
            .request_summary(&system, &file_diff_prompt(&file.filename, &file.diff))
            .await;
        result.insert(file.filename.clone(), text.clone());

        let body = format!(
            "[{}]({}#{}) - [{}]({}#{}){SUMMARY_MARKER}\n{}",
            short_sha(&file.origin_sha),
            blob_url(repo, &pull.base_sha, &file.filename),
            file.origin_sha,
            short_sha(&file.current_sha),
            blob_url(repo, &pull.head_sha, &file.filename),
            file.current_sha,
            text,
        );
        let side = if file.insertion_line > 0 || file.origin_sha == NONE_SHA {
            DiffSide::Right
        } else {
            DiffSide::Left
        };
        debug!(
            "files: commenting {} at line {} ({})",
            file.filename,
            file.insertion_line.max(1),
            side.as_str()
        );
        host.create_review_comment(
            repo,
            pull_number,
            &NewReviewComment {
                commit_id: pull.head_sha.clone(),
                path: file.filename.clone(),
                line: file.insertion_line.max(1) as u64,
                side,
                body,
            },
        )
        .await?;

        generated += 1;
        if generated >= MAX_FILES_PER_RUN {
            debug!("files: per-run cap reached ({MAX_FILES_PER_RUN}), stopping");
            break;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeBackend, FakeHost, repo};

    const BASE: &str = "1111111111111111111111111111111111111111";
    const HEAD: &str = "2222222222222222222222222222222222222222";
    // 40-hex blob ids; the summary-key match strips full-sha links.
    const AAA: &str = "aaa1111111111111111111111111111111111111";
    const BBB: &str = "bbb2222222222222222222222222222222222222";
    const CCC: &str = "ccc3333333333333333333333333333333333333";

    fn host_with_one_file() -> FakeHost {
        let mut host = FakeHost::new(BASE, HEAD);
        host.files = vec![PullFile {
            filename: "src/x.py".to_string(),
            sha: BBB.to_string(),
            patch: Some("+new line".to_string()),
        }];
        host.tree = vec![TreeEntry {
            path: "src/x.py".to_string(),
            sha: AAA.to_string(),
        }];
        host
    }

    #[test]
    fn parses_first_changed_line() {
        assert_eq!(first_changed_line("@@ -1,3 +5,4 @@\n+x"), Some(5));
        assert_eq!(first_changed_line("@@ -1 +1 @@\n+x"), Some(1));
        // deletion-only hunk: post-change start is 0
        assert_eq!(first_changed_line("@@ -1,3 +0,0 @@\n-x"), Some(0));
        // no hunk header at all
        assert_eq!(first_changed_line("+new line"), None);
    }

    #[tokio::test]
    async fn generates_then_reuses_without_new_calls() {
        let host = host_with_one_file();
        let backend = FakeBackend::replying("* 新しい行を追加");
        let llm = CompletionAdapter::new(&backend);

        let out = summarize_files(&host, &llm, &repo(), 1).await.unwrap();
        assert_eq!(out["src/x.py"], "* 新しい行を追加");
        assert_eq!(backend.calls(), 1);
        assert_eq!(host.created_review_count(), 1);

        {
            let posted = &host.created_review.lock().unwrap()[0];
            assert_eq!(posted.path, "src/x.py");
            assert_eq!(posted.line, 1);
            assert_eq!(posted.side, DiffSide::Right);
            assert_eq!(posted.commit_id, HEAD);
            assert!(posted.body.contains("[aaa111]"));
            assert!(posted.body.contains(" のGPT要約:\n* 新しい行を追加"));
        }

        // Second run with no intervening push: everything reused.
        let out2 = summarize_files(&host, &llm, &repo(), 1).await.unwrap();
        assert_eq!(out2["src/x.py"], "* 新しい行を追加");
        assert_eq!(backend.calls(), 1);
        assert_eq!(host.created_review_count(), 1);
        assert_eq!(host.deleted_count(), 0);
    }

    #[tokio::test]
    async fn stale_comment_deleted_and_regenerated_on_new_push() {
        let host = host_with_one_file();
        let backend = FakeBackend::replying("* 要約");
        let llm = CompletionAdapter::new(&backend);

        // First run posts a comment for (aaa111, bbb222).
        summarize_files(&host, &llm, &repo(), 1).await.unwrap();
        assert_eq!(host.created_review_count(), 1);

        // New push: same file, new post-change blob id.
        let mut host2 = host_with_one_file();
        host2.files[0].sha = CCC.to_string();
        let old_body = host.review_comments.lock().unwrap()[0].body.clone();
        host2.seed_review_comment(&old_body);

        summarize_files(&host2, &llm, &repo(), 1).await.unwrap();
        assert_eq!(host2.deleted_count(), 1);
        assert_eq!(host2.created_review_count(), 1);
        assert!(
            host2.created_review.lock().unwrap()[0]
                .body
                .contains(&format!("#{CCC}"))
        );
    }

    #[tokio::test]
    async fn cap_limits_newly_generated_summaries() {
        let mut host = FakeHost::new(BASE, HEAD);
        for i in 0..25 {
            host.files.push(PullFile {
                filename: format!("src/f{i:02}.rs"),
                sha: format!("cur{i:02}"),
                patch: Some("@@ -1 +1 @@\n+x".to_string()),
            });
        }
        let backend = FakeBackend::replying("* 要約");
        let llm = CompletionAdapter::new(&backend);

        let out = summarize_files(&host, &llm, &repo(), 1).await.unwrap();
        assert_eq!(backend.calls(), MAX_FILES_PER_RUN);
        assert_eq!(host.created_review_count(), MAX_FILES_PER_RUN);
        assert_eq!(out.len(), MAX_FILES_PER_RUN);
        assert_eq!(host.deleted_count(), 0);
    }

    #[tokio::test]
    async fn empty_diff_files_are_skipped_entirely() {
        let mut host = FakeHost::new(BASE, HEAD);
        host.files = vec![PullFile {
            filename: "image.png".to_string(),
            sha: "img001".to_string(),
            patch: None,
        }];
        let backend = FakeBackend::replying("* 要約");
        let llm = CompletionAdapter::new(&backend);

        let out = summarize_files(&host, &llm, &repo(), 1).await.unwrap();
        assert!(out.is_empty());
        assert_eq!(backend.calls(), 0);
        assert_eq!(host.created_review_count(), 0);
    }

    #[tokio::test]
    async fn deletion_only_file_anchors_left_at_line_one() {
        let mut host = FakeHost::new(BASE, HEAD);
        host.files = vec![PullFile {
            filename: "gone.rs".to_string(),
            sha: "cur000".to_string(),
            patch: Some("@@ -1,3 +0,0 @@\n-a\n-b\n-c".to_string()),
        }];
        host.tree = vec![TreeEntry {
            path: "gone.rs".to_string(),
            sha: "old000".to_string(),
        }];
        let backend = FakeBackend::replying("* 削除");
        let llm = CompletionAdapter::new(&backend);

        summarize_files(&host, &llm, &repo(), 1).await.unwrap();
        let posted = &host.created_review.lock().unwrap()[0];
        assert_eq!(posted.line, 1);
        assert_eq!(posted.side, DiffSide::Left);
    }
}
