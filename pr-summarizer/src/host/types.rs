//! Normalized hosting-API types used by the summarizers.
//!
//! These are provider-neutral shapes; the GitHub client maps its REST
//! responses into them. Only the fields the summarizers consume are kept.

use crate::errors::{Error, SummaryResult};

/// Repository coordinates (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parses an `owner/name` slug.
    pub fn parse(slug: &str) -> SummaryResult<Self> {
        match slug.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::Validation(format!(
                "expected repository slug `owner/name`, got `{slug}`"
            ))),
        }
    }
}

/// Pull request metadata; head/base SHAs key everything downstream.
#[derive(Debug, Clone)]
pub struct PullRequestMeta {
    pub number: u64,
    pub head_sha: String,
    pub base_sha: String,
}

/// One file touched by the pull request, as listed by the hosting API.
#[derive(Debug, Clone)]
pub struct PullFile {
    pub filename: String,
    /// Post-change blob id.
    pub sha: String,
    /// Unified diff; `None` for binary or too-large files.
    pub patch: Option<String>,
}

/// One entry of a (recursive) git tree.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub path: String,
    pub sha: String,
}

/// Commit reference as listed for a pull request.
#[derive(Debug, Clone)]
pub struct CommitRef {
    pub sha: String,
}

/// Full commit object with parents and the per-commit file list.
#[derive(Debug, Clone)]
pub struct CommitDetail {
    pub sha: String,
    pub parents: Vec<String>,
    /// `None` when the hosting API omitted the file list entirely.
    pub files: Option<Vec<CommitFile>>,
}

/// One file of a commit or of a two-commit comparison.
#[derive(Debug, Clone)]
pub struct CommitFile {
    pub filename: String,
    pub patch: Option<String>,
}

/// Result of comparing two commits.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub files: Vec<CommitFile>,
}

/// Issue-level (conversation) comment on the pull request.
#[derive(Debug, Clone)]
pub struct IssueComment {
    pub id: u64,
    pub body: String,
}

/// Inline review comment on the pull request diff.
#[derive(Debug, Clone)]
pub struct ReviewComment {
    pub id: u64,
    pub body: String,
}

/// Which side of the diff an inline comment anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSide {
    Left,
    Right,
}

impl DiffSide {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffSide::Left => "LEFT",
            DiffSide::Right => "RIGHT",
        }
    }
}

/// Payload for creating an inline review comment.
#[derive(Debug, Clone)]
pub struct NewReviewComment {
    pub commit_id: String,
    pub path: String,
    pub line: u64,
    pub side: DiffSide,
    pub body: String,
}
