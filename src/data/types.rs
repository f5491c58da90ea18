use serde::Deserialize;
use std::str::FromStr;

/// GitHub user id of the Dependabot account.
pub const DEPENDABOT_USER_ID: u64 = 49699333;

// CI Status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CiStatus {
    /// Status lookup failed or returned nothing.
    #[default]
    Unavailable,
    Pending,
    Success,
    Failure,
    /// Any other combined state, kept as GitHub reported it.
    Other(String),
}

impl CiStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CiStatus::Unavailable => "",
            CiStatus::Pending => "pending",
            CiStatus::Success => "success",
            CiStatus::Failure => "failure",
            CiStatus::Other(state) => state,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, CiStatus::Unavailable)
    }

    /// Bracketed marker shown ahead of the state in the report.
    pub fn label(&self) -> &'static str {
        match self {
            CiStatus::Success => "[success]",
            CiStatus::Failure => "[failure]",
            _ => "[pending]",
        }
    }
}

impl FromStr for CiStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" => CiStatus::Unavailable,
            "pending" => CiStatus::Pending,
            "success" => CiStatus::Success,
            "failure" => CiStatus::Failure,
            other => CiStatus::Other(other.to_string()),
        })
    }
}

// GitHub REST response types

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: u64,
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadRef {
    pub sha: String,
}

/// Entry of `GET /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestItem {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub user: Option<Account>,
    pub head: HeadRef,
}

impl PullRequestItem {
    pub fn is_dependabot(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.id == DEPENDABOT_USER_ID)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn url(&self) -> &str {
        self.html_url.as_deref().unwrap_or_default()
    }
}

/// Body of `GET /repos/{owner}/{repo}/commits/{ref}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct CombinedStatusResponse {
    #[serde(default)]
    pub state: String,
}
