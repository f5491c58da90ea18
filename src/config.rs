//! Run configuration loaded from `~/.dependawhat/config.yaml`.
//!
//! ```yaml
//! github_token: ghp_xxx
//! concurrency: 4
//! global:
//!   denied_packages: ["*alpha*", "github.com/aws/aws-sdk-go"]
//!   denied_orgs: [datadog]
//! repositories:
//!   owner/repo:
//!     denied_packages: ["pkg@v1"]
//!   owner/other:
//! ```
//!
//! The loaded [`Config`] is passed explicitly to everything that needs it;
//! nothing reads configuration from global state during a check.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::deps::{resolve, DenyPolicy, EffectivePolicy};
use crate::utils::RepoSlug;

pub const DEFAULT_CONCURRENCY: usize = 4;

/// Environment variables consulted for the GitHub token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["USER_GITHUB_TOKEN", "DEPENDAWHAT_GITHUB_TOKEN"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Legacy `check:` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckSection {
    pub repositories: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "github-token")]
    pub github_token: Option<String>,
    pub concurrency: Option<usize>,
    pub global: DenyPolicy,
    /// Per repository overrides keyed by `owner/repo`. An entry without
    /// settings still selects the repository for checking.
    pub repositories: BTreeMap<String, Option<DenyPolicy>>,
    pub check: CheckSection,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".dependawhat").join("config.yaml"))
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as null
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load an explicitly requested file, or the default location when none
    /// is given. Only an explicit path is required to exist.
    ///
    /// Returns the config together with the path it was read from.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                path.to_path_buf()
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok((Config::default(), None)),
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Config::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        Ok((config, Some(path)))
    }

    /// Append deny entries given on the command line to the global scope.
    pub fn extend_global(&mut self, packages: &[String], orgs: &[String]) {
        self.global.denied_packages.extend(packages.iter().cloned());
        self.global.denied_orgs.extend(orgs.iter().cloned());
    }

    /// Repository override, matched case-insensitively on `owner/repo`.
    pub fn repo_override(&self, slug: &RepoSlug) -> Option<&DenyPolicy> {
        let key = slug.to_string();
        self.repositories
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&key))
            .and_then(|(_, policy)| policy.as_ref())
    }

    pub fn policy_for(&self, slug: &RepoSlug) -> EffectivePolicy {
        resolve(&self.global, self.repo_override(slug))
    }

    /// Repositories to check when none are given on the command line.
    pub fn configured_repositories(&self) -> Vec<String> {
        if !self.repositories.is_empty() {
            return self.repositories.keys().cloned().collect();
        }
        self.check.repositories.clone()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CONCURRENCY)
    }

    /// First non-empty token from the flag, the environment, then the
    /// config file.
    pub fn token_from<F>(&self, flag: Option<&str>, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        flag.map(str::to_string)
            .into_iter()
            .chain(TOKEN_ENV_VARS.iter().filter_map(|var| env(*var)))
            .chain(self.github_token.clone())
            .map(|token| token.trim().to_string())
            .find(|token| !token.is_empty())
    }
}
