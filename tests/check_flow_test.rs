//! End-to-end checks of the enumerator against an in-memory GitHub.

mod common;

use common::{bot_pull, pull_by, FakeGithub};
use dependawhat::utils::RepoSlug;
use dependawhat::{
    check_repositories, check_repository, render_report, CiStatus, Config, DenyPolicy, RepoError,
};

fn config(yaml: &str) -> Config {
    Config::from_yaml(yaml).unwrap()
}

#[tokio::test]
async fn denied_org_is_skipped_with_reason() {
    let github = FakeGithub::new()
        .with_pull(
            "acme/app",
            bot_pull(5, "Bump github.com/datadog/datadog-go from 5.0.0 to 5.1.0"),
        )
        .with_status("sha5", "success");
    let config = config("global:\n  denied_orgs: [datadog]\n");

    let reports = check_repositories(&github, &config, &["acme/app".to_string()]).await;

    assert_eq!(reports.len(), 1);
    let records = reports[0].result.as_ref().unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].denied);
    assert_eq!(records[0].deny_reason, "org 'datadog' is denied");
    assert_eq!(records[0].dependency.package_name, "github.com/datadog/datadog-go");
    assert_eq!(records[0].ci_status, CiStatus::Success);
}

#[tokio::test]
async fn only_dependabot_pulls_are_reported_in_api_order() {
    let github = FakeGithub::new()
        .with_pull("acme/app", bot_pull(9, "Bump serde from 1.0.0 to 1.0.1"))
        .with_pull("acme/app", pull_by(8, "Add login page", 12345))
        .with_pull("acme/app", bot_pull(3, "Bump @types/node from 20.0.0 to 20.1.0"))
        .with_status("sha9", "pending")
        .with_status("sha3", "failure");
    let slug: RepoSlug = "acme/app".parse().unwrap();
    let policy = config("").policy_for(&slug);

    let records = check_repository(&github, &slug, &policy, 2).await.unwrap();

    let numbers: Vec<u64> = records.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![9, 3]);
    assert_eq!(records[0].ci_status, CiStatus::Pending);
    assert_eq!(records[1].ci_status, CiStatus::Failure);
    assert_eq!(records[1].dependency.org_name, "types");
    assert!(records.iter().all(|r| !r.denied));

    let calls = github.status_calls.lock().unwrap();
    assert!(!calls.contains(&"sha8".to_string()));
}

#[tokio::test]
async fn status_failure_leaves_status_unavailable() {
    let github = FakeGithub::new()
        .with_pull("acme/app", bot_pull(1, "Bump rc-slider from 10.0.0 to 10.1.0"))
        .with_pull("acme/app", bot_pull(2, "Bump lodash from 4.17.20 to 4.17.21"))
        .with_status("sha2", "error");
    let config = config("repositories:\n  acme/app:\n    denied_packages: [\"*rc*\"]\n");

    let reports = check_repositories(&github, &config, &["acme/app".to_string()]).await;
    let records = reports[0].result.as_ref().unwrap();

    assert_eq!(records[0].ci_status, CiStatus::Unavailable);
    assert!(records[0].denied);
    assert_eq!(records[0].deny_reason, "package '*rc*' is denied");
    assert_eq!(records[1].ci_status, CiStatus::Other("error".to_string()));
    assert!(!records[1].denied);
}

#[tokio::test]
async fn listing_failure_does_not_abort_other_repositories() {
    let github = FakeGithub::new()
        .unreachable("acme/down")
        .with_pull("acme/app", bot_pull(4, "Bump pkg@v1.7.0 from 1 to 2"))
        .with_status("sha4", "success");
    let mut config = config("");
    config.extend_global(&["pkg@v1".to_string()], &[]);

    let repos = vec![
        "acme/down".to_string(),
        "not-a-slug".to_string(),
        "acme/app".to_string(),
    ];
    let reports = check_repositories(&github, &config, &repos).await;

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].name, "acme/down");
    assert!(matches!(&reports[0].result, Err(RepoError::Listing(e)) if e.contains("connection refused")));
    assert!(matches!(reports[1].result, Err(RepoError::InvalidSlug(_))));
    let records = reports[2].result.as_ref().unwrap();
    assert!(records[0].denied);
    assert_eq!(records[0].deny_reason, "package 'pkg@v1' is denied");
}

#[tokio::test]
async fn repository_override_only_applies_to_its_repository() {
    let title = "Bump github.com/aws/aws-sdk-go from 1.44.0 to 1.45.0";
    let github = FakeGithub::new()
        .with_pull("acme/app", bot_pull(1, title))
        .with_pull("acme/other", bot_pull(1, title))
        .with_status("sha1", "success");
    let config = config(
        "repositories:\n  acme/app:\n    denied_packages: [github.com/aws/aws-sdk-go]\n  acme/other:\n",
    );

    let repos = config.configured_repositories();
    let reports = check_repositories(&github, &config, &repos).await;

    assert_eq!(reports[0].name, "acme/app");
    assert!(reports[0].records()[0].denied);
    assert_eq!(reports[1].name, "acme/other");
    assert!(!reports[1].records()[0].denied);
}

#[tokio::test]
async fn renders_end_to_end_report() {
    let github = FakeGithub::new()
        .with_pull("acme/app", bot_pull(12, "Bump github.com/aws/aws-sdk-go-v2 from 1.0.0 to 1.1.0"))
        .with_status("sha12", "success");
    let mut config = config("");
    config.global = DenyPolicy::new(["github.com/aws/aws-sdk-go"], Vec::<String>::new());

    let reports = check_repositories(&github, &config, &["acme/app".to_string(), "acme/none".to_string()]).await;

    let expected = "\
Open Dependabot PRs:
-------------------------
acme/app
   #12: Bump github.com/aws/aws-sdk-go-v2 from 1.0.0 to 1.1.0
   https://github.com/acme/app/pull/12
   Status: [success] success


acme/none
   (no open Dependabot PRs)

";
    assert_eq!(render_report(&reports), expected);
}
