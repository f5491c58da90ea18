pub mod checker;
pub mod github;

pub use checker::{check_repositories, check_repository, classify};
pub use github::{get_github_token, GithubClient, PullRequestSource};
