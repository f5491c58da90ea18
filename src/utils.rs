pub mod repo;

pub use repo::{parse_github_url, RepoSlug, RepoSlugError};
