//! Markup rewriting for comment bodies and model output.
//!
//! Posted comments carry markdown links (short shas, blob urls). Before a
//! body is matched against a summary key or fed back into a PR-level prompt,
//! those links are rewritten back into plain shas / `[path]` tokens; in the
//! other direction, `[path]` tokens produced by the model are expanded into
//! blob links.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::GITHUB_WEB_URL;
use crate::host::RepoRef;

lazy_static! {
    /// `[abc123](https://github.com/...#<full sha>)` as posted in review
    /// comments; the fragment carries the full blob id (or the "None"
    /// sentinel for added files).
    static ref REVIEW_LINK_RE: Regex =
        Regex::new(r"\[(?:[0-9a-f]{6}|None)\]\(https://github\.com/[^)]*#([0-9a-f]{40}|None)\)")
            .unwrap();

    /// `[label](https://github.com/.../<sha>/<path>)` as produced by commit
    /// summary post-processing.
    static ref BLOB_LINK_RE: Regex =
        Regex::new(r"\[[^\]]*\]\(https://github\.com/\S*?[0-9a-f]{40}/([^)]+)\)").unwrap();
}

/// Rewrites short-sha links back to the full blob id they point at, so a
/// comment body can be matched against a `{origin} - {current}` summary key.
pub fn strip_review_links(body: &str) -> String {
    REVIEW_LINK_RE.replace_all(body, "$1").into_owned()
}

/// Collapses blob links back into bare `[path]` tokens for reuse in
/// PR-level prompts.
pub fn collapse_blob_links(text: &str) -> String {
    BLOB_LINK_RE.replace_all(text, "[$1]").into_owned()
}

/// Replaces every `[path]` token naming a changed file with a markdown link
/// to that file's blob at `commit_sha`, label shortened to the base name.
pub fn link_file_tokens(summary: &str, files: &[&str], repo: &RepoRef, commit_sha: &str) -> String {
    let mut out = summary.to_string();
    for filename in files {
        let short = filename.rsplit('/').next().unwrap_or(filename);
        let link = blob_url(repo, commit_sha, filename);
        out = out.replace(&format!("[{filename}]"), &format!("[{short}]({link})"));
    }
    out
}

/// First six characters of a sha (the "None" sentinel passes through).
pub fn short_sha(sha: &str) -> &str {
    &sha[..sha.len().min(6)]
}

/// Web url of `path` at `sha`.
pub fn blob_url(repo: &RepoRef, sha: &str, path: &str) -> String {
    format!(
        "{GITHUB_WEB_URL}/{}/{}/blob/{sha}/{path}",
        repo.owner, repo.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoRef {
        RepoRef {
            owner: "octo".to_string(),
            name: "repo".to_string(),
        }
    }

    const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn review_links_become_full_shas() {
        let body = format!(
            "[012345]({GITHUB_WEB_URL}/octo/repo/blob/{SHA}/src/a.py#{SHA}) - \
             [None]({GITHUB_WEB_URL}/octo/repo/blob/{SHA}/src/a.py#None) のGPT要約:\nbody"
        );
        assert_eq!(
            strip_review_links(&body),
            format!("{SHA} - None のGPT要約:\nbody")
        );
    }

    #[test]
    fn blob_links_collapse_to_path_tokens() {
        let text = format!("* 修正 [c.py]({GITHUB_WEB_URL}/octo/repo/blob/{SHA}/a/b/c.py)");
        assert_eq!(collapse_blob_links(&text), "* 修正 [a/b/c.py]");
    }

    #[test]
    fn file_tokens_round_trip_through_links() {
        let summary = "* バグ修正 [a/b/c.py]";
        let linked = link_file_tokens(summary, &["a/b/c.py"], &repo(), SHA);
        assert_eq!(
            linked,
            format!("* バグ修正 [c.py]({GITHUB_WEB_URL}/octo/repo/blob/{SHA}/a/b/c.py)")
        );
        // and back, for PR-prompt reuse
        assert_eq!(collapse_blob_links(&linked), summary);
    }

    #[test]
    fn unknown_tokens_left_alone() {
        let summary = "* 変更なし [not/in/diff.rs]";
        assert_eq!(
            link_file_tokens(summary, &["a/b/c.py"], &repo(), SHA),
            summary
        );
    }

    #[test]
    fn short_sha_handles_sentinel() {
        assert_eq!(short_sha(SHA), "012345");
        assert_eq!(short_sha("None"), "None");
    }
}
