use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// How an external tool finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    Completed,
    Failed(Option<i32>),
    TimedOut,
}

/// Typed result of an external-tool run: the exit status plus whatever the
/// tool printed on stdout and stderr, concatenated. Failures carry their
/// output too, so they stay visible downstream instead of vanishing.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ToolStatus,
    pub text: String,
}

impl ToolOutput {
    pub fn succeeded(&self) -> bool {
        matches!(self.status, ToolStatus::Completed)
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs `cmd` with a hard deadline. A process still alive at the deadline is
/// killed and reported as `TimedOut` with whatever output it produced so far.
pub fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> std::io::Result<ToolOutput> {
    cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = cmd.spawn()?;

    // Drain both pipes on background threads so a chatty tool cannot block
    // on a full pipe while we poll for exit.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let out_reader = std::thread::spawn(move || read_all(stdout));
    let err_reader = std::thread::spawn(move || read_all(stderr));

    let deadline = Instant::now() + timeout;
    let exit = loop {
        match child.try_wait()? {
            Some(status) => break Some(status),
            None if Instant::now() >= deadline => {
                child.kill().ok();
                child.wait().ok();
                break None;
            }
            None => std::thread::sleep(POLL_INTERVAL),
        }
    };

    let mut text = out_reader.join().unwrap_or_default();
    text.push_str(&err_reader.join().unwrap_or_default());

    let status = match exit {
        None => ToolStatus::TimedOut,
        Some(s) if s.success() => ToolStatus::Completed,
        Some(s) => ToolStatus::Failed(s.code()),
    };

    Ok(ToolOutput { status, text })
}

fn read_all(src: Option<impl Read>) -> String {
    let mut buf = Vec::new();
    if let Some(mut reader) = src {
        reader.read_to_end(&mut buf).ok();
    }
    String::from_utf8_lossy(&buf).into_owned()
}
