use crate::error::LintlogError;
use crate::scan::ScanConfig;
use crate::util::{run_with_timeout, ToolOutput, ToolStatus};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::warn;

/// Runs the analyzer over `file` (producing a transient dump artifact next to
/// it), then the normalizer over the dump. Returns the combined issue-line
/// text; this function is total per file — a tool that fails to spawn, exits
/// non-zero, or times out is folded into the returned status and text so the
/// failure surfaces in the dataset instead of aborting the commit.
pub fn invoke(file: &Path, tree: &Path, config: &ScanConfig) -> ToolOutput {
    let analyzed = run_tool(&config.analyzer, analyzer_args(file, tree, config), config);
    if !analyzed.succeeded() {
        let err = LintlogError::AnalyzerInvocation(format!(
            "{} on {}: {:?}",
            program_name(&config.analyzer),
            file.display(),
            analyzed.status
        ));
        warn!(error = %err, "analyzer did not complete; folding its output forward");
    }

    let dump = dump_path(file);
    let normalized = run_tool(
        &config.normalizer,
        vec![dump.display().to_string(), "--xml".to_string()],
        config,
    );
    if !normalized.succeeded() {
        let err = LintlogError::Normalization(format!(
            "{} on {}: {:?}",
            program_name(&config.normalizer),
            dump.display(),
            normalized.status
        ));
        warn!(error = %err, "normalizer did not complete; folding its output forward");
    }

    // The dump is only ever consumed by the normalization step above.
    std::fs::remove_file(&dump).ok();

    let status = if analyzed.succeeded() {
        normalized.status
    } else {
        analyzed.status
    };
    let mut text = String::new();
    if !matches!(status, ToolStatus::Completed) && !analyzed.text.is_empty() {
        text.push_str(&analyzed.text);
        if !text.ends_with('\n') {
            text.push('\n');
        }
    }
    text.push_str(&normalized.text);

    ToolOutput { status, text }
}

/// `<analyzer> -i<tree>/<excl>.. --enable=all <file> --dump`
fn analyzer_args(file: &Path, tree: &Path, config: &ScanConfig) -> Vec<String> {
    let mut args: Vec<String> = config
        .excludes
        .iter()
        .map(|excl| format!("-i{}", tree.join(excl).display()))
        .collect();
    args.push("--enable=all".to_string());
    args.push(file.display().to_string());
    args.push("--dump".to_string());
    args
}

fn program_name(argv: &[String]) -> &str {
    argv.first().map(String::as_str).unwrap_or("<unset>")
}

fn dump_path(file: &Path) -> PathBuf {
    let mut os = file.as_os_str().to_os_string();
    os.push(".dump");
    PathBuf::from(os)
}

fn run_tool(argv: &[String], extra: Vec<String>, config: &ScanConfig) -> ToolOutput {
    let Some((program, fixed)) = argv.split_first() else {
        return ToolOutput {
            status: ToolStatus::Failed(None),
            text: "empty tool command".to_string(),
        };
    };
    let mut cmd = Command::new(program);
    cmd.args(fixed).args(extra);
    match run_with_timeout(&mut cmd, config.timeout) {
        Ok(out) => out,
        Err(e) => ToolOutput {
            status: ToolStatus::Failed(None),
            text: format!("{program}: {e}"),
        },
    }
}
