use anyhow::Result;
use lintlog::cli::Cli;
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Diagnostics go to stderr so JSON/NDJSON output on stdout stays clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    cli.execute()
}
