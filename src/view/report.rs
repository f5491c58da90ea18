//! Plain text rendering of check results.

use std::fmt::Write;

use crate::data::{PullRequestRecord, RepoError, RepoReport};

pub const HEADER: &str = "Open Dependabot PRs:";
pub const SEPARATOR: &str = "-------------------------";

/// Render all repository reports, in order, under the report header.
pub fn render_report(reports: &[RepoReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", HEADER);
    let _ = writeln!(out, "{}", SEPARATOR);

    for report in reports {
        render_repo(&mut out, report);
    }

    out
}

fn render_repo(out: &mut String, report: &RepoReport) {
    let records = match &report.result {
        Err(RepoError::InvalidSlug(e)) => {
            let _ = writeln!(out, "  {}\n", e);
            return;
        }
        Err(RepoError::Listing(e)) => {
            let _ = writeln!(out, "{}", report.name);
            let _ = writeln!(out, "   Error: {}\n", e);
            return;
        }
        Ok(records) => records,
    };

    let _ = writeln!(out, "{}", report.name);
    if records.is_empty() {
        let _ = writeln!(out, "   (no open Dependabot PRs)");
    }
    for record in records {
        render_record(out, record);
        let _ = writeln!(out);
    }
    let _ = writeln!(out);
}

fn render_record(out: &mut String, record: &PullRequestRecord) {
    let _ = writeln!(out, "   #{}: {}", record.number, record.title);
    let _ = writeln!(out, "   {}", record.url);

    if record.denied {
        let _ = writeln!(out, "   Status: SKIPPED ({})", record.deny_reason);
    } else if record.ci_status.is_available() {
        let _ = writeln!(
            out,
            "   Status: {} {}",
            record.ci_status.label(),
            record.ci_status.as_str()
        );
    }
}

/// One line totals: repositories, PRs, skipped PRs and failures.
pub fn render_summary(reports: &[RepoReport]) -> String {
    let prs: usize = reports.iter().map(|r| r.records().len()).sum();
    let skipped = reports
        .iter()
        .flat_map(|r| r.records())
        .filter(|pr| pr.denied)
        .count();
    let failed = reports.iter().filter(|r| r.is_error()).count();

    format!(
        "{} repositories, {} open Dependabot PRs ({} skipped), {} failed",
        reports.len(),
        prs,
        skipped,
        failed
    )
}
