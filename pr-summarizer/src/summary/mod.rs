//! The three summarizers: per-file, per-commit, and PR-level.
//!
//! All cross-run state lives in the comments already posted on the PR;
//! each run reconstructs it from the marker formats and only generates
//! what is missing.

pub mod commits;
pub mod files;
pub mod pr;

pub use commits::summarize_commits;
pub use files::summarize_files;
pub use pr::summarize_pr;

/// Japanese marker fragment shared by all summary comments.
pub(crate) const SUMMARY_MARKER: &str = " のGPT要約:";

/// Everything after the marker line of a comment body.
pub(crate) fn text_after_marker_line(body: &str) -> &str {
    body.split_once('\n').map(|(_, rest)| rest).unwrap_or("")
}
