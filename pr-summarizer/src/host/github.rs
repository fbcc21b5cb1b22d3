//! GitHub REST client (API v3) for pull request data and comments.
//!
//! Endpoints used:
//! - GET    /repos/{owner}/{repo}/pulls/{number}
//! - GET    /repos/{owner}/{repo}/pulls/{number}/files
//! - GET    /repos/{owner}/{repo}/pulls/{number}/commits
//! - GET    /repos/{owner}/{repo}/pulls/{number}/comments
//! - GET    /repos/{owner}/{repo}/issues/{number}/comments
//! - POST   /repos/{owner}/{repo}/issues/{number}/comments
//! - POST   /repos/{owner}/{repo}/pulls/{number}/comments
//! - DELETE /repos/{owner}/{repo}/pulls/comments/{id}
//! - GET    /repos/{owner}/{repo}/commits/{sha}
//! - GET    /repos/{owner}/{repo}/compare/{base}...{head}
//! - GET    /repos/{owner}/{repo}/git/trees/{sha}?recursive=1

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::errors::SummaryResult;
use crate::host::HostApi;
use crate::host::types::*;

const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String, // e.g. "https://api.github.com"
    token: String,
}

impl GitHubClient {
    /// Constructs a GitHub client with a shared reqwest instance and auth token.
    pub fn new(http: Client, base_api: String, token: String) -> Self {
        Self {
            http,
            base_api: base_api.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Builds the reqwest client and wraps it; the usual entry point.
    pub fn from_config(base_api: String, token: String) -> SummaryResult<Self> {
        let http = Client::builder().user_agent("pr-summary-bot/0.1").build()?;
        Ok(Self::new(http, base_api, token))
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .post(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> SummaryResult<T> {
        let out = self
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(out)
    }

    /// Walks a list endpoint page by page until a short page signals the end.
    async fn get_paged<T: DeserializeOwned>(&self, url: &str) -> SummaryResult<Vec<T>> {
        let mut out = Vec::new();
        let mut page = 1u32;
        loop {
            let batch: Vec<T> = self
                .get(url)
                .query(&[
                    ("per_page", PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            let done = batch.len() < PAGE_SIZE;
            out.extend(batch);
            if done {
                break;
            }
            page += 1;
        }
        debug!("github: {} items from {}", out.len(), url);
        Ok(out)
    }
}

impl HostApi for GitHubClient {
    async fn get_pull(&self, repo: &RepoRef, number: u64) -> SummaryResult<PullRequestMeta> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.base_api, repo.owner, repo.name, number
        );
        let resp: GhPull = self.get_json(&url).await?;
        Ok(PullRequestMeta {
            number,
            head_sha: resp.head.sha,
            base_sha: resp.base.sha,
        })
    }

    async fn list_files(&self, repo: &RepoRef, number: u64) -> SummaryResult<Vec<PullFile>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/files",
            self.base_api, repo.owner, repo.name, number
        );
        let raw: Vec<GhPullFile> = self.get_paged(&url).await?;
        Ok(raw
            .into_iter()
            .map(|f| PullFile {
                filename: f.filename,
                sha: f.sha,
                patch: f.patch,
            })
            .collect())
    }

    async fn list_commits(&self, repo: &RepoRef, number: u64) -> SummaryResult<Vec<CommitRef>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/commits",
            self.base_api, repo.owner, repo.name, number
        );
        let raw: Vec<GhCommitRef> = self.get_paged(&url).await?;
        Ok(raw.into_iter().map(|c| CommitRef { sha: c.sha }).collect())
    }

    async fn list_issue_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> SummaryResult<Vec<IssueComment>> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_api, repo.owner, repo.name, number
        );
        let raw: Vec<GhComment> = self.get_paged(&url).await?;
        Ok(raw
            .into_iter()
            .map(|c| IssueComment {
                id: c.id,
                body: c.body.unwrap_or_default(),
            })
            .collect())
    }

    async fn list_review_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> SummaryResult<Vec<ReviewComment>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/comments",
            self.base_api, repo.owner, repo.name, number
        );
        let raw: Vec<GhComment> = self.get_paged(&url).await?;
        Ok(raw
            .into_iter()
            .map(|c| ReviewComment {
                id: c.id,
                body: c.body.unwrap_or_default(),
            })
            .collect())
    }

    async fn create_issue_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> SummaryResult<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_api, repo.owner, repo.name, number
        );
        self.post(&url)
            .json(&json!({ "body": body }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn create_review_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        comment: &NewReviewComment,
    ) -> SummaryResult<()> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/comments",
            self.base_api, repo.owner, repo.name, number
        );
        self.post(&url)
            .json(&json!({
                "body": comment.body,
                "commit_id": comment.commit_id,
                "path": comment.path,
                "line": comment.line,
                "side": comment.side.as_str(),
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_review_comment(&self, repo: &RepoRef, comment_id: u64) -> SummaryResult<()> {
        let url = format!(
            "{}/repos/{}/{}/pulls/comments/{}",
            self.base_api, repo.owner, repo.name, comment_id
        );
        self.http
            .delete(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn get_commit(&self, repo: &RepoRef, sha: &str) -> SummaryResult<CommitDetail> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}",
            self.base_api, repo.owner, repo.name, sha
        );
        let resp: GhCommit = self.get_json(&url).await?;
        Ok(CommitDetail {
            sha: resp.sha,
            parents: resp.parents.into_iter().map(|p| p.sha).collect(),
            files: resp.files.map(|files| {
                files
                    .into_iter()
                    .map(|f| CommitFile {
                        filename: f.filename,
                        patch: f.patch,
                    })
                    .collect()
            }),
        })
    }

    async fn compare_commits(
        &self,
        repo: &RepoRef,
        base: &str,
        head: &str,
    ) -> SummaryResult<Comparison> {
        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.base_api, repo.owner, repo.name, base, head
        );
        let resp: GhCompare = self.get_json(&url).await?;
        Ok(Comparison {
            files: resp
                .files
                .unwrap_or_default()
                .into_iter()
                .map(|f| CommitFile {
                    filename: f.filename,
                    patch: f.patch,
                })
                .collect(),
        })
    }

    async fn get_tree(&self, repo: &RepoRef, sha: &str) -> SummaryResult<Vec<TreeEntry>> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}",
            self.base_api, repo.owner, repo.name, sha
        );
        let resp: GhTree = self
            .get(&url)
            .query(&[("recursive", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp
            .tree
            .into_iter()
            .map(|e| TreeEntry {
                path: e.path,
                sha: e.sha,
            })
            .collect())
    }
}

/// --- GitHub response shapes (subset of fields we actually use) ---

#[derive(Debug, Deserialize)]
struct GhPull {
    head: GhRef,
    base: GhRef,
}

#[derive(Debug, Deserialize)]
struct GhRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GhPullFile {
    filename: String,
    sha: String,
    #[serde(default)]
    patch: Option<String>, // absent for binary/too-large files
}

#[derive(Debug, Deserialize)]
struct GhCommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GhComment {
    id: u64,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GhCommit {
    sha: String,
    parents: Vec<GhParent>,
    #[serde(default)]
    files: Option<Vec<GhCommitFile>>,
}

#[derive(Debug, Deserialize)]
struct GhParent {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GhCommitFile {
    filename: String,
    #[serde(default)]
    patch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GhCompare {
    #[serde(default)]
    files: Option<Vec<GhCommitFile>>,
}

#[derive(Debug, Deserialize)]
struct GhTree {
    tree: Vec<GhTreeEntry>,
}

#[derive(Debug, Deserialize)]
struct GhTreeEntry {
    path: String,
    sha: String,
}
