use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Serialize;
use std::process::Command;

use crate::data::{CombinedStatusResponse, PullRequestItem};

const PER_PAGE: u8 = 100;

// Cap the number of PRs we'll accumulate to avoid runaway pagination.
const MAX_RESULTS: usize = 500;

/// Read-only view of the pull requests of a repository.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// All open pull requests, in the order GitHub returns them.
    async fn list_open_pulls(&self, owner: &str, repo: &str) -> Result<Vec<PullRequestItem>>;

    /// Combined CI state of a commit (`success`, `failure`, `pending`, ...).
    async fn combined_status(&self, owner: &str, repo: &str, sha: &str) -> Result<String>;
}

pub fn get_github_token() -> Result<String> {
    let output = Command::new("gh").args(["auth", "token"]).output()?;

    if !output.status.success() {
        anyhow::bail!("Failed to get GitHub token. Run 'gh auth login' first.");
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[derive(Serialize)]
struct ListPullsParams {
    state: &'static str,
    per_page: u8,
    page: u32,
}

pub struct GithubClient {
    octocrab: Octocrab,
}

impl GithubClient {
    pub fn new(token: String) -> Result<Self> {
        let octocrab = Octocrab::builder().personal_token(token).build()?;
        Ok(Self { octocrab })
    }
}

#[async_trait]
impl PullRequestSource for GithubClient {
    async fn list_open_pulls(&self, owner: &str, repo: &str) -> Result<Vec<PullRequestItem>> {
        let route = format!("/repos/{}/{}/pulls", owner, repo);
        let mut pulls = Vec::new();
        let mut page = 1;

        loop {
            let params = ListPullsParams {
                state: "open",
                per_page: PER_PAGE,
                page,
            };
            let batch: Vec<PullRequestItem> = self
                .octocrab
                .get(&route, Some(&params))
                .await
                .with_context(|| format!("failed to list pull requests for {}/{}", owner, repo))?;

            let fetched = batch.len();
            tracing::debug!(owner, repo, page, fetched, "fetched pull request page");
            pulls.extend(batch);

            if fetched < PER_PAGE as usize || pulls.len() >= MAX_RESULTS {
                break;
            }
            page += 1;
        }

        pulls.truncate(MAX_RESULTS);
        Ok(pulls)
    }

    async fn combined_status(&self, owner: &str, repo: &str, sha: &str) -> Result<String> {
        let route = format!("/repos/{}/{}/commits/{}/status", owner, repo, sha);
        let status: CombinedStatusResponse = self
            .octocrab
            .get(&route, None::<&()>)
            .await
            .with_context(|| format!("failed to fetch combined status for {}", sha))?;
        Ok(status.state)
    }
}
