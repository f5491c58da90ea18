pub mod config;
pub mod data;
pub mod deps;
pub mod services;
pub mod utils;
pub mod view;

pub use config::{Config, ConfigError};
pub use data::{CiStatus, DependencyReference, PullRequestRecord, RepoError, RepoReport};
pub use deps::{is_denied, parse_title, resolve, DenyPolicy, EffectivePolicy, Verdict};
pub use services::{check_repositories, check_repository, GithubClient, PullRequestSource};
pub use view::{render_report, render_summary};
