use crate::error::{LintlogError, Result};
use crate::model::CommitEntry;
use crate::util::{run_with_timeout, ToolStatus};
use chrono::DateTime;
use gix::{discover, ObjectId, Repository};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tracing::warn;

/// One repository's history plus its single working tree.
///
/// History access is read-only through `gix`; the only mutation is
/// `checkout_force`, which shells out to the `git` CLI. Callers must drive
/// checkouts strictly sequentially: the working tree is a shared location
/// and two interleaved materializations would corrupt each other's scans.
pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = discover(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All commits reachable from HEAD, oldest first, each tagged with a
    /// contiguous 0-based counter. An empty repository yields an empty
    /// sequence; an unreadable one yields `HistoryRead`.
    pub fn sequence_commits(&self) -> Result<Vec<CommitEntry>> {
        self.walk_history()
            .map_err(|e| LintlogError::HistoryRead(e.to_string()))
    }

    fn walk_history(&self) -> Result<Vec<CommitEntry>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut entries = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            for pid in &parents {
                stack.push_back(*pid);
            }

            let secs = commit.time()?.seconds;
            let timestamp = match DateTime::from_timestamp(secs, 0) {
                Some(ts) => ts,
                None => {
                    let err =
                        LintlogError::TimestampParse(format!("commit {commit_id}: {secs} seconds"));
                    warn!(error = %err, "skipping commit with unparseable timestamp");
                    continue;
                }
            };

            // The title keeps its terminating newline for single-line
            // messages; the dataset wants the bare subject.
            let title = commit.message()?.title.to_string();
            entries.push(CommitEntry {
                hash: commit_id.to_string(),
                counter: 0,
                timestamp,
                message: title.trim_end().to_string(),
            });
        }

        // Chronological, with the hash as a stable tie-break for same-second
        // commits so counters are deterministic across runs.
        entries.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.hash.cmp(&b.hash))
        });
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.counter = i as u32;
        }

        Ok(entries)
    }

    /// Forced checkout of `rev` (a commit hash, or a branch name when
    /// restoring): the working tree ends up byte-identical to the commit's
    /// tree, discarding whatever a previous materialization (or a failed
    /// one) left behind. Never merges, never preserves local edits.
    pub fn checkout_force(&self, rev: &str, timeout: Duration) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.path)
            .args(["checkout", "--force", "--quiet", rev]);

        let out = run_with_timeout(&mut cmd, timeout)?;
        match out.status {
            ToolStatus::Completed => Ok(()),
            ToolStatus::TimedOut => Err(LintlogError::Materialization(format!(
                "checkout of {rev} timed out"
            ))),
            ToolStatus::Failed(code) => Err(LintlogError::Materialization(format!(
                "checkout of {rev} failed (exit {code:?}): {}",
                out.text.trim()
            ))),
        }
    }

    /// Branch HEAD points at, or `None` when detached. Captured before a
    /// scan so the repository can be put back where its owner left it.
    pub fn head_branch(&self, timeout: Duration) -> Option<String> {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.path)
            .args(["symbolic-ref", "--short", "--quiet", "HEAD"]);
        match run_with_timeout(&mut cmd, timeout) {
            Ok(out) if out.succeeded() => {
                let name = out.text.trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;
    use tempfile::tempdir;

    fn has_git() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn git(dir: &Path, args: &[&str]) {
        assert!(Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .status()
            .unwrap()
            .success());
    }

    fn init_repo(dir: &Path) {
        git(dir, &["init"]);
        git(dir, &["config", "user.email", "you@example.com"]);
        git(dir, &["config", "user.name", "Your Name"]);
    }

    fn commit_file(dir: &Path, name: &str, content: &str, date: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        git(dir, &["add", "."]);
        assert!(Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["commit", "-m", &format!("add {name}")])
            .env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date)
            .status()
            .unwrap()
            .success());
    }

    #[test]
    fn counters_are_contiguous_and_oldest_first() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        commit_file(dir.path(), "a.c", "int a;\n", "2024-01-01T12:00:00+00:00");
        commit_file(dir.path(), "b.c", "int b;\n", "2024-01-02T12:00:00+00:00");
        commit_file(dir.path(), "c.c", "int c;\n", "2024-01-03T12:00:00+00:00");

        let repo = GitRepo::open(dir.path()).unwrap();
        let commits = repo.sequence_commits().unwrap();
        assert_eq!(commits.len(), 3);
        let counters: Vec<u32> = commits.iter().map(|c| c.counter).collect();
        assert_eq!(counters, vec![0, 1, 2]);
        assert_eq!(commits[0].message, "add a.c");
        assert_eq!(commits[2].message, "add c.c");
        assert!(commits[0].timestamp < commits[2].timestamp);
    }

    #[test]
    fn message_is_the_bare_subject_line() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        fs::write(dir.path().join("a.c"), "int a;\n").unwrap();
        git(dir.path(), &["add", "."]);
        assert!(Command::new("git")
            .arg("-C")
            .arg(dir.path())
            .args(["commit", "-m", "fix overflow\n\nlonger explanation body"])
            .env("GIT_AUTHOR_DATE", "2024-01-01T12:00:00+00:00")
            .env("GIT_COMMITTER_DATE", "2024-01-01T12:00:00+00:00")
            .status()
            .unwrap()
            .success());

        let repo = GitRepo::open(dir.path()).unwrap();
        let commits = repo.sequence_commits().unwrap();
        assert_eq!(commits[0].message, "fix overflow");
        assert!(!commits[0].message.ends_with('\n'));
    }

    #[test]
    fn empty_repository_yields_empty_sequence() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());

        let repo = GitRepo::open(dir.path()).unwrap();
        assert!(repo.sequence_commits().unwrap().is_empty());
    }

    #[test]
    fn checkout_force_is_idempotent_and_removes_later_files() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        commit_file(dir.path(), "a.c", "v1\n", "2024-01-01T12:00:00+00:00");
        commit_file(dir.path(), "b.c", "v2\n", "2024-01-02T12:00:00+00:00");

        let repo = GitRepo::open(dir.path()).unwrap();
        let commits = repo.sequence_commits().unwrap();
        let timeout = Duration::from_secs(30);

        repo.checkout_force(&commits[0].hash, timeout).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a.c")).unwrap(), "v1\n");
        assert!(!dir.path().join("b.c").exists());

        // Dirty the tree, then re-materialize the same commit: forced
        // checkout must discard the edit and yield identical content.
        fs::write(dir.path().join("a.c"), "scribble\n").unwrap();
        repo.checkout_force(&commits[0].hash, timeout).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a.c")).unwrap(), "v1\n");
    }

    #[test]
    fn head_branch_survives_detached_checkouts() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        commit_file(dir.path(), "a.c", "v1\n", "2024-01-01T12:00:00+00:00");
        commit_file(dir.path(), "b.c", "v2\n", "2024-01-02T12:00:00+00:00");

        let repo = GitRepo::open(dir.path()).unwrap();
        let timeout = Duration::from_secs(30);
        let branch = repo.head_branch(timeout).expect("fresh repo is on a branch");

        let commits = repo.sequence_commits().unwrap();
        repo.checkout_force(&commits[0].hash, timeout).unwrap();
        assert_eq!(repo.head_branch(timeout), None, "hash checkout detaches HEAD");

        repo.checkout_force(&branch, timeout).unwrap();
        assert_eq!(repo.head_branch(timeout).as_deref(), Some(branch.as_str()));
        assert!(dir.path().join("b.c").exists());
    }

    #[test]
    fn checkout_of_unknown_commit_is_a_materialization_error() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        commit_file(dir.path(), "a.c", "v1\n", "2024-01-01T12:00:00+00:00");

        let repo = GitRepo::open(dir.path()).unwrap();
        let err = repo
            .checkout_force("0000000000000000000000000000000000000000", Duration::from_secs(30))
            .unwrap_err();
        assert!(matches!(err, LintlogError::Materialization(_)));
    }
}
