use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

/// Deny rules for one scope: the global section or a single repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DenyPolicy {
    #[serde(deserialize_with = "string_list")]
    pub denied_packages: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub denied_orgs: Vec<String>,
}

impl DenyPolicy {
    pub fn new<P, O>(packages: P, orgs: O) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            denied_packages: packages.into_iter().map(Into::into).collect(),
            denied_orgs: orgs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.denied_packages.is_empty() && self.denied_orgs.is_empty()
    }
}

/// Deny lists in force for one repository after merging global and
/// repository scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectivePolicy {
    pub denied_packages: Vec<String>,
    pub denied_orgs: Vec<String>,
}

impl From<EffectivePolicy> for DenyPolicy {
    fn from(policy: EffectivePolicy) -> Self {
        DenyPolicy {
            denied_packages: policy.denied_packages,
            denied_orgs: policy.denied_orgs,
        }
    }
}

/// Merge the global policy with a repository override. Global entries come
/// first; a missing override behaves like an empty one.
pub fn resolve(global: &DenyPolicy, repo_override: Option<&DenyPolicy>) -> EffectivePolicy {
    let empty = DenyPolicy::default();
    let repo = repo_override.unwrap_or(&empty);

    EffectivePolicy {
        denied_packages: merge_unique(&global.denied_packages, &repo.denied_packages),
        denied_orgs: merge_unique(&global.denied_orgs, &repo.denied_orgs),
    }
}

/// Concatenate two lists and drop blanks and case-insensitive duplicates,
/// keeping the first occurrence as written.
fn merge_unique(first: &[String], second: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    first
        .iter()
        .chain(second)
        .filter(|item| {
            let normalized = item.trim().to_lowercase();
            !normalized.is_empty() && seen.insert(normalized)
        })
        .cloned()
        .collect()
}

/// Accepts a YAML sequence, a single comma or space separated string, or
/// null.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringList {
        Many(Vec<String>),
        One(String),
    }

    Ok(match Option::<StringList>::deserialize(deserializer)? {
        Some(StringList::Many(items)) => items,
        Some(StringList::One(s)) => s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    })
}
