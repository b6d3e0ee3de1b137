use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as ordered by the sequencer: oldest first, `counter` contiguous
/// from zero per repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitEntry {
    pub hash: String,
    pub counter: u32,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// A single normalized finding for one file at one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub kind: String,
    pub description: String,
}

/// One record of the output dataset.
///
/// `issue_kind`/`description` are `None` for sentinel rows marking a commit
/// that was scanned and found clean; they serialize as empty CSV fields and
/// JSON nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub repo_id: String,
    pub date: DateTime<Utc>,
    pub commit_msg: String,
    pub commit_counter: u32,
    pub commit_hash: String,
    pub issue_kind: Option<String>,
    pub description: Option<String>,
}

impl Row {
    pub fn is_sentinel(&self) -> bool {
        self.issue_kind.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub rows: Vec<Row>,
}
