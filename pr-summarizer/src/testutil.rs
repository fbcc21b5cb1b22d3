//! In-memory fakes for the host and completion seams.
//!
//! `FakeHost` keeps the PR's comment set in mutexes so a test can run the
//! summarizers twice against the same state and observe idempotence,
//! staleness handling, and cap enforcement. `FakeBackend` counts completion
//! calls and either echoes a canned reply or fails.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use llm_service::{AiLlmError, Provider, ProviderError, ProviderErrorKind};

use crate::errors::SummaryResult;
use crate::host::{
    CommitDetail, CommitRef, Comparison, HostApi, IssueComment, NewReviewComment, PullFile,
    PullRequestMeta, RepoRef, ReviewComment, TreeEntry,
};

pub fn repo() -> RepoRef {
    RepoRef {
        owner: "octo".to_string(),
        name: "repo".to_string(),
    }
}

pub struct FakeHost {
    pub pull: PullRequestMeta,
    pub files: Vec<PullFile>,
    pub tree: Vec<TreeEntry>,
    pub commits: Vec<CommitRef>,
    pub commit_details: HashMap<String, CommitDetail>,
    pub comparisons: HashMap<(String, String), Comparison>,
    pub issue_comments: Mutex<Vec<IssueComment>>,
    pub review_comments: Mutex<Vec<ReviewComment>>,
    pub created_review: Mutex<Vec<NewReviewComment>>,
    pub created_issue: Mutex<Vec<String>>,
    pub deleted_review_ids: Mutex<Vec<u64>>,
    next_id: AtomicU64,
}

impl FakeHost {
    pub fn new(base_sha: &str, head_sha: &str) -> Self {
        Self {
            pull: PullRequestMeta {
                number: 1,
                head_sha: head_sha.to_string(),
                base_sha: base_sha.to_string(),
            },
            files: Vec::new(),
            tree: Vec::new(),
            commits: Vec::new(),
            commit_details: HashMap::new(),
            comparisons: HashMap::new(),
            issue_comments: Mutex::new(Vec::new()),
            review_comments: Mutex::new(Vec::new()),
            created_review: Mutex::new(Vec::new()),
            created_issue: Mutex::new(Vec::new()),
            deleted_review_ids: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seeds an existing review comment, as if posted by a prior run.
    pub fn seed_review_comment(&self, body: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.review_comments.lock().unwrap().push(ReviewComment {
            id,
            body: body.to_string(),
        });
    }

    /// Seeds an existing issue comment, as if posted by a prior run.
    pub fn seed_issue_comment(&self, body: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.issue_comments.lock().unwrap().push(IssueComment {
            id,
            body: body.to_string(),
        });
    }

    pub fn created_review_count(&self) -> usize {
        self.created_review.lock().unwrap().len()
    }

    pub fn created_issue_count(&self) -> usize {
        self.created_issue.lock().unwrap().len()
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_review_ids.lock().unwrap().len()
    }
}

impl HostApi for FakeHost {
    async fn get_pull(&self, _repo: &RepoRef, _number: u64) -> SummaryResult<PullRequestMeta> {
        Ok(self.pull.clone())
    }

    async fn list_files(&self, _repo: &RepoRef, _number: u64) -> SummaryResult<Vec<PullFile>> {
        Ok(self.files.clone())
    }

    async fn list_commits(&self, _repo: &RepoRef, _number: u64) -> SummaryResult<Vec<CommitRef>> {
        Ok(self.commits.clone())
    }

    async fn list_issue_comments(
        &self,
        _repo: &RepoRef,
        _number: u64,
    ) -> SummaryResult<Vec<IssueComment>> {
        Ok(self.issue_comments.lock().unwrap().clone())
    }

    async fn list_review_comments(
        &self,
        _repo: &RepoRef,
        _number: u64,
    ) -> SummaryResult<Vec<ReviewComment>> {
        Ok(self.review_comments.lock().unwrap().clone())
    }

    async fn create_issue_comment(
        &self,
        _repo: &RepoRef,
        _number: u64,
        body: &str,
    ) -> SummaryResult<()> {
        self.created_issue.lock().unwrap().push(body.to_string());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.issue_comments.lock().unwrap().push(IssueComment {
            id,
            body: body.to_string(),
        });
        Ok(())
    }

    async fn create_review_comment(
        &self,
        _repo: &RepoRef,
        _number: u64,
        comment: &NewReviewComment,
    ) -> SummaryResult<()> {
        self.created_review.lock().unwrap().push(comment.clone());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.review_comments.lock().unwrap().push(ReviewComment {
            id,
            body: comment.body.clone(),
        });
        Ok(())
    }

    async fn delete_review_comment(&self, _repo: &RepoRef, comment_id: u64) -> SummaryResult<()> {
        self.deleted_review_ids.lock().unwrap().push(comment_id);
        self.review_comments
            .lock()
            .unwrap()
            .retain(|c| c.id != comment_id);
        Ok(())
    }

    async fn get_commit(&self, _repo: &RepoRef, sha: &str) -> SummaryResult<CommitDetail> {
        Ok(self
            .commit_details
            .get(sha)
            .cloned()
            .unwrap_or_else(|| panic!("no commit detail seeded for {sha}")))
    }

    async fn compare_commits(
        &self,
        _repo: &RepoRef,
        base: &str,
        head: &str,
    ) -> SummaryResult<Comparison> {
        Ok(self
            .comparisons
            .get(&(base.to_string(), head.to_string()))
            .cloned()
            .unwrap_or_else(|| panic!("no comparison seeded for {base}...{head}")))
    }

    async fn get_tree(&self, _repo: &RepoRef, _sha: &str) -> SummaryResult<Vec<TreeEntry>> {
        Ok(self.tree.clone())
    }
}

pub struct FakeBackend {
    reply: String,
    fail: bool,
    calls: AtomicUsize,
    pub user_prompts: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
            user_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
            user_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_user_prompt(&self) -> String {
        self.user_prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl crate::llm::CompletionBackend for FakeBackend {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, AiLlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.user_prompts.lock().unwrap().push(user.to_string());
        if self.fail {
            return Err(
                ProviderError::new(Provider::OpenAI, ProviderErrorKind::EmptyChoices).into(),
            );
        }
        Ok(self.reply.clone())
    }
}
