use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::DependencyReference;

// Dependabot title shapes, tried in order. Whitespace is the ASCII set only,
// so a non-breaking space does not separate the keyword from the package.
static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // "Bump package from x to y" or "Bump package to y"
        Regex::new(r"(?i)^bump[\t\n\f\r ]+([^\t\n\f\r ]+)[\t\n\f\r ]+(?:from|to)").unwrap(),
        // "Update package from x to y" or "Update package to y"
        Regex::new(r"(?i)^update[\t\n\f\r ]+([^\t\n\f\r ]+)[\t\n\f\r ]+(?:from|to)").unwrap(),
        // "chore(deps): bump package from x to y"
        Regex::new(r"(?i)^chore.*bump[\t\n\f\r ]+([^\t\n\f\r ]+)[\t\n\f\r ]+(?:from|to)")
            .unwrap(),
    ]
});

/// Extract the package and owning organization from a Dependabot PR title.
///
/// Examples:
/// - `Bump github.com/datadog/datadog-go from 1.0.0 to 2.0.0` -> `github.com/datadog/datadog-go`, `datadog`
/// - `Bump @datadog/browser-rum from 4.0.0 to 5.0.0` -> `@datadog/browser-rum`, `datadog`
/// - `Update rails to 7.0.0` -> `rails`, empty org
///
/// Never fails: a title that matches nothing gives an empty reference.
pub fn parse_title(title: &str) -> DependencyReference {
    let package_name = match_patterns(title)
        .or_else(|| fallback_token(title))
        .unwrap_or_default();

    if package_name.is_empty() {
        return DependencyReference::default();
    }

    let org_name = extract_org(&package_name);
    DependencyReference {
        package_name,
        org_name,
    }
}

fn match_patterns(title: &str) -> Option<String> {
    TITLE_PATTERNS
        .iter()
        .find_map(|re| re.captures(title))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
}

/// First token after the leading word that looks like a package path or a
/// versioned name.
fn fallback_token(title: &str) -> Option<String> {
    title
        .split_whitespace()
        .skip(1)
        .find(|part| part.contains('/') || part.contains('@'))
        .map(str::to_string)
}

/// Infer the owning organization from a package identifier using the naming
/// conventions of npm scopes, Go module paths and gopkg.in redirects.
pub fn extract_org(package_name: &str) -> String {
    // Scoped npm packages: @datadog/browser-rum
    if let Some(scoped) = package_name.strip_prefix('@') {
        if let Some((scope, _)) = scoped.split_once('/') {
            return scope.to_string();
        }
    }

    if !package_name.contains('/') {
        return String::new();
    }

    // Canonical Go namespaces have no owner
    if package_name.starts_with("golang.org/x/") || package_name.starts_with("google.golang.org/")
    {
        return String::new();
    }

    let parts: Vec<&str> = package_name.split('/').collect();

    // gopkg.in/DataDog/dd-trace-go.v1 -> datadog
    if package_name.starts_with("gopkg.in/") {
        return if parts.len() > 2 {
            parts[1].to_lowercase()
        } else {
            String::new()
        };
    }

    // github.com/owner/repo or github.com/owner/repo/v2
    if parts.len() >= 3 && package_name.starts_with("github.com/") {
        return parts[1].to_string();
    }

    // Skip domain parts and version indicators
    parts
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, part)| !part.contains('.') && !part.starts_with('v'))
        .map(|(_, part)| part.to_string())
        .unwrap_or_default()
}
