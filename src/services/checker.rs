use anyhow::Result;
use futures::stream::{self, StreamExt};

use crate::config::Config;
use crate::data::{CiStatus, PullRequestItem, PullRequestRecord, RepoError, RepoReport};
use crate::deps::{is_denied, parse_title, EffectivePolicy};
use crate::utils::RepoSlug;

use super::github::PullRequestSource;

/// Build the record for one pull request without touching the network.
/// CI status is filled in by a later stage.
pub fn classify(pull: &PullRequestItem, policy: &EffectivePolicy) -> PullRequestRecord {
    let title = pull.title().to_string();
    let dependency = parse_title(&title);
    let verdict = is_denied(&dependency, policy);

    PullRequestRecord {
        number: pull.number,
        url: pull.url().to_string(),
        denied: verdict.is_denied(),
        deny_reason: verdict.reason(),
        title,
        dependency,
        ci_status: CiStatus::Unavailable,
    }
}

/// Open Dependabot pull requests of one repository, classified against
/// `policy` and annotated with their combined CI status.
///
/// Fails only when the pull requests cannot be listed. A status lookup
/// failure leaves that record's status unavailable.
pub async fn check_repository<S>(
    source: &S,
    slug: &RepoSlug,
    policy: &EffectivePolicy,
    concurrency: usize,
) -> Result<Vec<PullRequestRecord>>
where
    S: PullRequestSource + ?Sized,
{
    let pulls = source.list_open_pulls(&slug.owner, &slug.repo).await?;
    let total = pulls.len();

    let bot_pulls: Vec<PullRequestItem> = pulls.into_iter().filter(|p| p.is_dependabot()).collect();
    tracing::info!(
        repo = %slug,
        open = total,
        dependabot = bot_pulls.len(),
        "listed pull requests"
    );

    let records: Vec<PullRequestRecord> = stream::iter(bot_pulls)
        .map(|pull| async move {
            let mut record = classify(&pull, policy);
            if record.denied {
                tracing::debug!(repo = %slug, number = record.number, reason = %record.deny_reason, "denied");
            }
            record.ci_status = fetch_status(source, slug, &pull).await;
            record
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    Ok(records)
}

async fn fetch_status<S>(source: &S, slug: &RepoSlug, pull: &PullRequestItem) -> CiStatus
where
    S: PullRequestSource + ?Sized,
{
    match source
        .combined_status(&slug.owner, &slug.repo, &pull.head.sha)
        .await
    {
        Ok(state) => state.parse().unwrap_or_default(),
        Err(e) => {
            tracing::warn!(repo = %slug, number = pull.number, "status lookup failed: {:#}", e);
            CiStatus::Unavailable
        }
    }
}

/// Check each requested repository with its effective policy.
///
/// Reports come back in the order of `repos`. Malformed names and listing
/// failures are recorded on that repository's report only.
pub async fn check_repositories<S>(source: &S, config: &Config, repos: &[String]) -> Vec<RepoReport>
where
    S: PullRequestSource + ?Sized,
{
    let concurrency = config.concurrency();

    stream::iter(repos)
        .map(|input| async move {
            let slug: RepoSlug = match input.parse() {
                Ok(slug) => slug,
                Err(e) => {
                    tracing::warn!("{}", e);
                    return RepoReport {
                        name: input.clone(),
                        result: Err(RepoError::InvalidSlug(e)),
                    };
                }
            };

            let policy = config.policy_for(&slug);
            let result = check_repository(source, &slug, &policy, concurrency)
                .await
                .map_err(|e| {
                    tracing::warn!(repo = %slug, "failed to list pull requests: {:#}", e);
                    RepoError::Listing(format!("{:#}", e))
                });

            RepoReport {
                name: slug.to_string(),
                result,
            }
        })
        .buffered(concurrency)
        .collect()
        .await
}
