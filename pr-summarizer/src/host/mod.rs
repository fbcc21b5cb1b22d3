//! Hosting-API seam.
//!
//! The summarizers only ever talk to the host through [`HostApi`], so tests
//! can run against an in-memory fake and the GitHub REST client stays a thin
//! mapping layer. Plain `async fn` in the trait with generic dispatch — no
//! `async-trait`, no `Box<dyn ...>`.

pub mod types;
pub use types::*;

pub mod github;
pub use github::GitHubClient;

use crate::errors::SummaryResult;

/// Operations the summarizers need from the source-hosting API.
///
/// List endpoints return the full, already-paginated result in the order the
/// provider reports; that order is semantically meaningful for commits.
#[allow(async_fn_in_trait)]
pub trait HostApi {
    async fn get_pull(&self, repo: &RepoRef, number: u64) -> SummaryResult<PullRequestMeta>;

    async fn list_files(&self, repo: &RepoRef, number: u64) -> SummaryResult<Vec<PullFile>>;

    async fn list_commits(&self, repo: &RepoRef, number: u64) -> SummaryResult<Vec<CommitRef>>;

    async fn list_issue_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> SummaryResult<Vec<IssueComment>>;

    async fn list_review_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> SummaryResult<Vec<ReviewComment>>;

    async fn create_issue_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> SummaryResult<()>;

    async fn create_review_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        comment: &NewReviewComment,
    ) -> SummaryResult<()>;

    async fn delete_review_comment(&self, repo: &RepoRef, comment_id: u64) -> SummaryResult<()>;

    async fn get_commit(&self, repo: &RepoRef, sha: &str) -> SummaryResult<CommitDetail>;

    async fn compare_commits(
        &self,
        repo: &RepoRef,
        base: &str,
        head: &str,
    ) -> SummaryResult<Comparison>;

    /// Recursive tree at `sha`; used to resolve pre-change blob ids.
    async fn get_tree(&self, repo: &RepoRef, sha: &str) -> SummaryResult<Vec<TreeEntry>>;
}
