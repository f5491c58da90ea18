//! In-memory GitHub used by the integration tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use dependawhat::data::{Account, HeadRef, PullRequestItem, DEPENDABOT_USER_ID};
use dependawhat::PullRequestSource;

#[derive(Default)]
pub struct FakeGithub {
    pulls: HashMap<String, Vec<PullRequestItem>>,
    statuses: HashMap<String, String>,
    unreachable: HashSet<String>,
    pub status_calls: Mutex<Vec<String>>,
}

impl FakeGithub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pull(mut self, repo: &str, pull: PullRequestItem) -> Self {
        self.pulls.entry(repo.to_string()).or_default().push(pull);
        self
    }

    pub fn with_status(mut self, sha: &str, state: &str) -> Self {
        self.statuses.insert(sha.to_string(), state.to_string());
        self
    }

    pub fn unreachable(mut self, repo: &str) -> Self {
        self.unreachable.insert(repo.to_string());
        self
    }
}

#[async_trait]
impl PullRequestSource for FakeGithub {
    async fn list_open_pulls(&self, owner: &str, repo: &str) -> Result<Vec<PullRequestItem>> {
        let key = format!("{}/{}", owner, repo);
        if self.unreachable.contains(&key) {
            anyhow::bail!("connection refused");
        }
        Ok(self.pulls.get(&key).cloned().unwrap_or_default())
    }

    async fn combined_status(&self, _owner: &str, _repo: &str, sha: &str) -> Result<String> {
        self.status_calls.lock().unwrap().push(sha.to_string());
        self.statuses
            .get(sha)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No commit found for SHA: {}", sha))
    }
}

pub fn bot_pull(number: u64, title: &str) -> PullRequestItem {
    pull_by(number, title, DEPENDABOT_USER_ID)
}

pub fn pull_by(number: u64, title: &str, user_id: u64) -> PullRequestItem {
    PullRequestItem {
        number,
        title: Some(title.to_string()),
        html_url: Some(format!("https://github.com/acme/app/pull/{}", number)),
        user: Some(Account {
            id: user_id,
            login: format!("user{}", user_id),
        }),
        head: HeadRef {
            sha: format!("sha{}", number),
        },
    }
}
