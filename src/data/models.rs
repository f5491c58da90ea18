use super::types::CiStatus;
use crate::utils::RepoSlugError;

/// Package identity parsed out of a pull request title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyReference {
    pub package_name: String,
    pub org_name: String,
}

impl DependencyReference {
    pub fn is_empty(&self) -> bool {
        self.package_name.is_empty()
    }
}

/// One open Dependabot pull request as reported for a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestRecord {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub dependency: DependencyReference,
    pub denied: bool,
    pub deny_reason: String,
    pub ci_status: CiStatus,
}

/// Why a repository produced no records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    InvalidSlug(#[from] RepoSlugError),
    /// Listing open pull requests failed.
    #[error("{0}")]
    Listing(String),
}

/// Result of checking a single repository.
#[derive(Debug, Clone)]
pub struct RepoReport {
    /// `owner/repo`, or the raw input when it could not be parsed.
    pub name: String,
    pub result: Result<Vec<PullRequestRecord>, RepoError>,
}

impl RepoReport {
    pub fn records(&self) -> &[PullRequestRecord] {
        match &self.result {
            Ok(records) => records,
            Err(_) => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }
}
