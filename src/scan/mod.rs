pub mod aggregate;
pub mod exec;
pub mod invoke;
pub mod locate;
pub mod parse;

pub use exec::exec;

use crate::cli::CommonArgs;
use crate::error::{LintlogError, Result};
use std::time::Duration;

/// Which files a materialized tree submits to the analyzer.
#[derive(Debug, Clone)]
pub enum FileMatcher {
    /// Every file with this extension (e.g. `c`).
    Extension(String),
    /// Every file with this exact name anywhere in the tree (e.g. `main.c`).
    EntryName(String),
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Analyzer command: program plus fixed leading arguments.
    pub analyzer: Vec<String>,
    /// Normalizer command run over each dump artifact.
    pub normalizer: Vec<String>,
    /// Subtree names excluded from locating, and passed to the analyzer as
    /// `-i` so it skips them too.
    pub excludes: Vec<String>,
    pub matcher: FileMatcher,
    /// Deadline for each external process (checkout, analyzer, normalizer).
    pub timeout: Duration,
}

impl ScanConfig {
    pub fn from_args(common: &CommonArgs) -> Result<Self> {
        let analyzer: Vec<String> = common
            .analyzer
            .split_whitespace()
            .map(String::from)
            .collect();
        if analyzer.is_empty() {
            return Err(LintlogError::Config("--analyzer must not be empty".into()));
        }
        let normalizer: Vec<String> = common
            .normalizer
            .split_whitespace()
            .map(String::from)
            .collect();
        if normalizer.is_empty() {
            return Err(LintlogError::Config("--normalizer must not be empty".into()));
        }

        let matcher = match &common.entry {
            Some(name) => FileMatcher::EntryName(name.clone()),
            None => FileMatcher::Extension(common.ext.clone()),
        };

        Ok(Self {
            analyzer,
            normalizer,
            excludes: common.exclude.clone(),
            matcher,
            timeout: Duration::from_secs(common.timeout),
        })
    }
}
