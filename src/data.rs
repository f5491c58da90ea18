pub mod models;
pub mod types;

pub use models::{DependencyReference, PullRequestRecord, RepoError, RepoReport};
pub use types::{
    Account, CiStatus, CombinedStatusResponse, HeadRef, PullRequestItem, DEPENDABOT_USER_ID,
};
