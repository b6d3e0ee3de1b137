use crate::cli::CommonArgs;
use anyhow::Context;
use std::path::{Path, PathBuf};

const MAX_DEPTH: usize = 6;

const SKIP_SCAN_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "target",
    "dist",
    "build",
    ".cache",
    ".git",
    "__pycache__",
];

/// Finds all git repository roots under `root`, sorted by path so the
/// dataset's repository order is deterministic. If `root` itself is a
/// repository it is the only result; nested repositories are not descended
/// into.
pub fn find_repos(root: &Path) -> Vec<PathBuf> {
    if root.join(".git").exists() {
        return vec![root.to_path_buf()];
    }
    let mut repos = Vec::new();
    scan_for_repos(root, 0, &mut repos);
    repos.sort();
    repos
}

fn scan_for_repos(dir: &Path, depth: usize, repos: &mut Vec<PathBuf>) {
    if depth > MAX_DEPTH {
        return;
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with('.') || SKIP_SCAN_DIRS.contains(&name) {
            continue;
        }
        if path.join(".git").exists() {
            repos.push(path);
        } else {
            scan_for_repos(&path, depth + 1, repos);
        }
    }
}

/// `lintlog repos`: preview which repositories a scan would process.
pub fn exec(common: CommonArgs) -> anyhow::Result<()> {
    let root = match common.root {
        Some(r) => r,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };
    let repos = find_repos(&root);
    if repos.is_empty() {
        println!("No git repositories found under {}", root.display());
        return Ok(());
    }
    for repo in repos {
        println!("{}", repo.display());
    }
    Ok(())
}
