use crate::model::{CommitEntry, Row};
use crate::scan::parse::ParsedLine;

/// Issue kind recorded when a commit could not be materialized, so the
/// failure is visible in the dataset instead of the commit silently missing.
pub const SCAN_ERROR_KIND: &str = "scan-error";

/// Folds one commit's parsed diagnostics into dataset rows, binding each
/// issue to the commit metadata and the repository identifier.
///
/// A scanned commit whose diagnostics are empty or all noise contributes
/// exactly one sentinel row (empty kind and description); this marks
/// "scanned, clean" as distinct from "not scanned", uniformly across the
/// dataset.
pub fn accumulate(repo_id: &str, commit: &CommitEntry, issues: Vec<ParsedLine>) -> Vec<Row> {
    let mut rows = Vec::new();
    for parsed in issues {
        if let ParsedLine::Issue(record) = parsed {
            rows.push(Row {
                repo_id: repo_id.to_string(),
                date: commit.timestamp,
                commit_msg: commit.message.clone(),
                commit_counter: commit.counter,
                commit_hash: commit.hash.clone(),
                issue_kind: Some(record.kind),
                description: Some(record.description),
            });
        }
    }
    if rows.is_empty() {
        rows.push(Row {
            repo_id: repo_id.to_string(),
            date: commit.timestamp,
            commit_msg: commit.message.clone(),
            commit_counter: commit.counter,
            commit_hash: commit.hash.clone(),
            issue_kind: None,
            description: None,
        });
    }
    rows
}

/// Row recording a failed materialization for one commit.
pub fn scan_error_row(repo_id: &str, commit: &CommitEntry, error: &str) -> Row {
    Row {
        repo_id: repo_id.to_string(),
        date: commit.timestamp,
        commit_msg: commit.message.clone(),
        commit_counter: commit.counter,
        commit_hash: commit.hash.clone(),
        issue_kind: Some(SCAN_ERROR_KIND.to_string()),
        description: Some(error.to_string()),
    }
}
