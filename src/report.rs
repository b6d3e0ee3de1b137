use crate::error::Result;
use crate::model::{Row, ScanOutput, SCHEMA_VERSION};
use crate::scan::aggregate::SCAN_ERROR_KIND;
use chrono::Utc;
use console::style;
use std::path::Path;

/// Writes the dataset with the fixed column schema:
/// `repo_id, date, commit_msg, commit_counter, commit_hash, issue_kind,
/// description`. Sentinel fields serialize as empty cells.
pub fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn output_json(rows: &[Row], root: &Path) -> Result<()> {
    let output = ScanOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        root: root.to_string_lossy().to_string(),
        rows: rows.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(rows: &[Row]) -> Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}

pub fn print_summary(rows: &[Row], repo_count: usize, out: &Path) {
    let issue_rows = rows
        .iter()
        .filter(|r| {
            r.issue_kind
                .as_deref()
                .is_some_and(|k| k != SCAN_ERROR_KIND)
        })
        .count();
    let clean_commits = rows.iter().filter(|r| r.is_sentinel()).count();
    let scan_errors = rows
        .iter()
        .filter(|r| r.issue_kind.as_deref() == Some(SCAN_ERROR_KIND))
        .count();
    let commits: std::collections::HashSet<_> = rows
        .iter()
        .map(|r| (r.repo_id.as_str(), r.commit_hash.as_str()))
        .collect();

    println!("{}", style("Scan Summary").bold());
    println!("{}", "─".repeat(50));
    println!("Repositories: {}", style(repo_count).cyan());
    println!("Commits scanned: {}", style(commits.len()).cyan());
    println!("Issue rows: {}", style(issue_rows).yellow());
    println!("Clean commits: {}", style(clean_commits).green());
    println!("Scan errors: {}", style(scan_errors).red());
    println!("\nDataset written to {}", style(out.display()).bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn row(kind: Option<&str>) -> Row {
        Row {
            repo_id: "repos/alpha".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            commit_msg: "add main.c".to_string(),
            commit_counter: 0,
            commit_hash: "deadbeef".to_string(),
            issue_kind: kind.map(String::from),
            description: kind.map(|_| " p may be null".to_string()),
        }
    }

    #[test]
    fn csv_has_fixed_header_and_empty_sentinel_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_csv(&path, &[row(Some("nullPointer")), row(None)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "repo_id,date,commit_msg,commit_counter,commit_hash,issue_kind,description"
        );
        let first = lines.next().unwrap();
        assert!(first.contains("nullPointer"));
        assert!(first.contains(" p may be null"));
        let sentinel = lines.next().unwrap();
        assert!(sentinel.ends_with(",,"));
    }

    #[test]
    fn csv_dates_are_iso_8601() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_csv(&path, &[row(None)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("2024-01-01T12:00:00Z"));
    }
}
