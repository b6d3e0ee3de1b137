use crate::scan::{FileMatcher, ScanConfig};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Walks the materialized tree and returns the files to submit to the
/// analyzer, in lexicographic order so downstream row emission is
/// deterministic for a given tree content.
///
/// Gitignore handling is disabled on purpose: the scan must see exactly the
/// committed tree, not the subset a developer's ignore rules would leave.
pub fn locate(tree: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let excludes = config.excludes.clone();
    let mut builder = WalkBuilder::new(tree);
    builder
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            let name = entry.file_name().to_string_lossy();
            if name == ".git" {
                return false;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            !(is_dir && excludes.iter().any(|x| x.as_str() == name))
        });

    let mut files = Vec::new();
    for entry in builder.build().flatten() {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let keep = match &config.matcher {
            FileMatcher::Extension(ext) => entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == ext)
                .unwrap_or(false),
            FileMatcher::EntryName(name) => entry.file_name().to_string_lossy() == *name,
        };
        if keep {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}
