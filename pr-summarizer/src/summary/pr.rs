//! PR-level summarizer.
//!
//! Synthesizes the per-file and per-commit summaries into a short high-level
//! digest. Commit texts may carry blob links from earlier post-processing;
//! those are collapsed back to `[path]` tokens so the model sees plain file
//! names. Degrades to fixed English error strings, distinct from the
//! Japanese per-item fallback, so a reader can tell which stage failed.

use std::collections::BTreeMap;

use tracing::warn;

use crate::errors::Error;
use crate::llm::{CompletionAdapter, CompletionBackend};
use crate::prompt::{PR_SUMMARY_SYSTEM_PROMPT, pr_prompt};
use crate::rewrite::collapse_blob_links;

/// Fallback when the assembled PR prompt exceeds the character budget.
pub const PR_TOO_BIG_TEXT: &str = "Error: couldn't generate summary. PR too big";

/// Fallback for any other PR-summary failure.
pub const PR_ERROR_TEXT: &str = "Error: couldn't generate summary";

/// One PR-level summary out of the per-commit summaries (in commit order)
/// and the per-file summaries.
pub async fn summarize_pr<C: CompletionBackend>(
    llm: &CompletionAdapter<C>,
    file_summaries: &BTreeMap<String, String>,
    commit_summaries: &[(String, String)],
) -> String {
    let commits_string = commit_summaries
        .iter()
        .enumerate()
        .map(|(idx, (_, summary))| format!("Commit #{}:\n{}", idx + 1, collapse_blob_links(summary)))
        .collect::<Vec<_>>()
        .join("\n");
    let files_string = file_summaries
        .iter()
        .map(|(filename, summary)| format!("File {filename}:\n{summary}"))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = pr_prompt(&commits_string, &files_string);
    match llm.request(PR_SUMMARY_SYSTEM_PROMPT, &prompt).await {
        Ok(text) => text,
        Err(Error::PromptTooLarge { len, max }) => {
            warn!("PR summary prompt too large ({len} > {max} chars)");
            PR_TOO_BIG_TEXT.to_string()
        }
        Err(e) => {
            warn!("PR summary completion failed: {e}");
            PR_ERROR_TEXT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GITHUB_WEB_URL, MAX_PROMPT_CHARS};
    use crate::testutil::FakeBackend;

    const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

    #[tokio::test]
    async fn prompt_numbers_commits_and_collapses_links() {
        let backend = FakeBackend::replying("* 高レベル要約");
        let llm = CompletionAdapter::new(&backend);

        let mut files = BTreeMap::new();
        files.insert("src/x.py".to_string(), "* 追加".to_string());
        let commits = vec![
            ("sha1".to_string(), "* 最初の変更".to_string()),
            (
                "sha2".to_string(),
                format!("* 修正 [c.py]({GITHUB_WEB_URL}/octo/repo/blob/{SHA}/a/b/c.py)"),
            ),
        ];

        let out = summarize_pr(&llm, &files, &commits).await;
        assert_eq!(out, "* 高レベル要約");

        let prompt = backend.last_user_prompt();
        assert!(prompt.contains("Commit #1:\n* 最初の変更"));
        assert!(prompt.contains("Commit #2:\n* 修正 [a/b/c.py]"));
        assert!(prompt.contains("File src/x.py:\n* 追加"));
    }

    #[tokio::test]
    async fn oversized_prompt_reports_pr_too_big() {
        let backend = FakeBackend::replying("unused");
        let llm = CompletionAdapter::new(&backend);

        let mut files = BTreeMap::new();
        files.insert("big".to_string(), "x".repeat(MAX_PROMPT_CHARS + 1));

        let out = summarize_pr(&llm, &files, &[]).await;
        assert_eq!(out, PR_TOO_BIG_TEXT);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn completion_failure_reports_generic_error() {
        let backend = FakeBackend::failing();
        let llm = CompletionAdapter::new(&backend);

        let out = summarize_pr(&llm, &BTreeMap::new(), &[]).await;
        assert_eq!(out, PR_ERROR_TEXT);
    }
}
