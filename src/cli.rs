use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lintlog")]
#[command(about = "Mine git history with a static analyzer into a longitudinal issue dataset")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Directory containing repositories to scan (or a single repository)")]
    pub root: Option<PathBuf>,

    #[arg(
        long,
        default_value = "cppcheck",
        help = "Analyzer command (program plus fixed leading arguments)"
    )]
    pub analyzer: String,

    #[arg(
        long,
        default_value = "python3 checker2/check.py",
        help = "Normalizer command run over each dump artifact"
    )]
    pub normalizer: String,

    #[arg(
        long = "exclude",
        value_name = "DIR",
        default_values_t = ["ASF".to_string(), "oled".to_string(), "config".to_string()],
        help = "Subtree name excluded from analysis (repeatable)"
    )]
    pub exclude: Vec<String>,

    #[arg(long, default_value = "c", help = "File extension submitted to the analyzer")]
    pub ext: String,

    #[arg(long, help = "Analyze only files with this exact name (overrides --ext)")]
    pub entry: Option<String>,

    #[arg(
        long,
        default_value_t = 300,
        value_name = "SECONDS",
        help = "Deadline for each external process (checkout, analyzer, normalizer)"
    )]
    pub timeout: u64,

    #[arg(long, help = "Number of repositories scanned in parallel")]
    pub jobs: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan every commit of every discovered repository
    Scan {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, default_value = "report.csv", help = "CSV output path")]
        out: PathBuf,
    },
    /// List the repositories a scan would process
    Repos,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Scan { json, ndjson, out } => {
                crate::scan::exec(self.common, json, ndjson, out)
            }
            Commands::Repos => crate::discover::exec(self.common),
        }
    }
}
