use std::fmt;

use crate::data::DependencyReference;

use super::policy::EffectivePolicy;

/// The deny rule that fired for a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyRule {
    /// The dependency's organization is on the org deny list.
    Org { org: String },
    /// A `denied_packages` entry matched the package name.
    Package { entry: String },
}

impl fmt::Display for DenyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyRule::Org { org } => write!(f, "org '{}' is denied", org),
            DenyRule::Package { entry } => write!(f, "package '{}' is denied", entry),
        }
    }
}

/// Outcome of checking one dependency against an effective policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied(DenyRule),
}

impl Verdict {
    pub fn is_denied(&self) -> bool {
        matches!(self, Verdict::Denied(_))
    }

    /// Human readable reason, empty when allowed.
    pub fn reason(&self) -> String {
        match self {
            Verdict::Allowed => String::new(),
            Verdict::Denied(rule) => rule.to_string(),
        }
    }
}

/// The only wildcard forms the deny list understands. Anything else
/// containing `*` is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wildcard {
    Alpha,
    Beta,
    Rc,
    MajorZero,
}

impl Wildcard {
    fn parse(entry: &str) -> Option<Self> {
        match entry.to_lowercase().as_str() {
            "*alpha*" => Some(Wildcard::Alpha),
            "*beta*" => Some(Wildcard::Beta),
            "*rc*" => Some(Wildcard::Rc),
            "*/v0" => Some(Wildcard::MajorZero),
            _ => None,
        }
    }

    fn matches(self, package_lower: &str) -> bool {
        match self {
            Wildcard::Alpha => package_lower.contains("alpha"),
            Wildcard::Beta => package_lower.contains("beta"),
            Wildcard::Rc => package_lower.contains("rc"),
            Wildcard::MajorZero => package_lower.ends_with("/v0"),
        }
    }
}

/// Whether a single `denied_packages` entry matches the package name.
fn package_entry_matches(package_name: &str, entry: &str) -> bool {
    let package_lower = package_name.to_lowercase();
    let entry_lower = entry.to_lowercase();

    if entry.contains('*') {
        return Wildcard::parse(entry).is_some_and(|w| w.matches(&package_lower));
    }

    if package_lower == entry_lower {
        return true;
    }

    // Version-specific denial like github.com/gin-gonic/gin@v1
    if entry.contains('@') {
        return package_lower.contains(&entry_lower);
    }

    // Plain denials only match the same package, optionally carrying an
    // @version suffix. aws-sdk-go must not match aws-sdk-go-v2.
    match package_lower.find('@') {
        Some(idx) if idx > 0 => package_lower[..idx] == entry_lower,
        _ => false,
    }
}

/// Check a dependency against the effective deny lists.
///
/// Organization matches take precedence over package matches when both
/// apply, so the reported rule names the org.
pub fn is_denied(dependency: &DependencyReference, policy: &EffectivePolicy) -> Verdict {
    let org = &dependency.org_name;
    let org_lower = org.to_lowercase();
    if !org.is_empty()
        && policy
            .denied_orgs
            .iter()
            .any(|denied| denied.to_lowercase() == org_lower)
    {
        return Verdict::Denied(DenyRule::Org { org: org.clone() });
    }

    let package = &dependency.package_name;
    if package.is_empty() {
        return Verdict::Allowed;
    }

    policy
        .denied_packages
        .iter()
        .find(|entry| package_entry_matches(package, entry))
        .map(|entry| {
            Verdict::Denied(DenyRule::Package {
                entry: entry.clone(),
            })
        })
        .unwrap_or(Verdict::Allowed)
}
