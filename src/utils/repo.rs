use std::fmt;
use std::str::FromStr;

/// A repository addressed as `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoSlugError {
    #[error("Invalid repository format: {0} (expected owner/repo)")]
    Invalid(String),
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoSlug {
    type Err = RepoSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (owner, repo) = parse_github_url(input)
            .or_else(|| split_slug(input))
            .ok_or_else(|| RepoSlugError::Invalid(s.to_string()))?;
        Ok(RepoSlug { owner, repo })
    }
}

fn split_slug(input: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = input.split('/').collect();
    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Some((owner.to_string(), repo.to_string()))
        }
        _ => None,
    }
}

/// Owner and repository name from a GitHub remote URL.
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    // Handle SSH: git@github.com:owner/repo.git
    let path = if let Some(path) = url.strip_prefix("git@github.com:") {
        path
    } else {
        // Handle HTTPS: https://github.com/owner/repo.git
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))?;
        rest.strip_prefix("github.com/")?
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let parts: Vec<&str> = path.split('/').collect();
    match parts.as_slice() {
        [owner, repo, ..] if !owner.is_empty() && !repo.is_empty() => {
            Some((owner.to_string(), repo.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("promiseofcake/dependawhat", "promiseofcake", "dependawhat")]
    #[case(" DataDog/dd-trace-go ", "DataDog", "dd-trace-go")]
    #[case("https://github.com/owner/repo", "owner", "repo")]
    #[case("https://github.com/owner/repo.git", "owner", "repo")]
    #[case("https://github.com/owner/repo/pulls", "owner", "repo")]
    #[case("git@github.com:owner/repo.git", "owner", "repo")]
    fn parses_slugs(#[case] input: &str, #[case] owner: &str, #[case] repo: &str) {
        let slug: RepoSlug = input.parse().unwrap();
        assert_eq!(slug.owner, owner);
        assert_eq!(slug.repo, repo);
    }

    #[rstest]
    #[case("justone")]
    #[case("a/b/c")]
    #[case("/repo")]
    #[case("owner/")]
    #[case("")]
    fn rejects_bad_slugs(#[case] input: &str) {
        let err = input.parse::<RepoSlug>().unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Invalid repository format: {} (expected owner/repo)", input)
        );
    }

    #[test]
    fn displays_as_owner_repo() {
        let slug: RepoSlug = "git@github.com:o/r.git".parse().unwrap();
        assert_eq!(slug.to_string(), "o/r");
    }
}
