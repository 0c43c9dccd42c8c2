use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

use crate::ingest::Dataset;
use crate::timeline::CumulativeMode;

#[derive(Parser)]
#[command(name = "gitline")]
#[command(about = "Commit timeline statistics from repository analysis reports")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to an analysis report JSON file (reads stdin when omitted)")]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Start of the window (RFC3339, YYYY-MM-DD, or e.g. \"2 weeks ago\")")]
    pub since: Option<String>,

    #[arg(long, help = "End of the window (RFC3339, YYYY-MM-DD, or e.g. \"2 weeks ago\")")]
    pub until: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    Timeline {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, value_enum, default_value = "full",
              help = "Scope of the running net-line total")]
        cumulative: CumulativeMode,

        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,
    },
    Contributors {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, default_value_t = 10, help = "Number of contributors to show")]
        limit: usize,
    },
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, default_value_t = 5, help = "Number of commits per ranking")]
        limit: usize,
    },
    Summary {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Timeline { json, ndjson, cumulative, interactive } => {
                if interactive {
                    crate::tui::run(&self.common, cumulative).map_err(|e| anyhow::anyhow!(e))
                } else {
                    crate::timeline::exec(self.common, json, ndjson, cumulative)
                }
            }
            Commands::Contributors { json, ndjson, limit } => {
                crate::contributors::exec(self.common, json, ndjson, limit)
            }
            Commands::Commits { json, ndjson, limit } => {
                crate::commits::exec(self.common, json, ndjson, limit)
            }
            Commands::Summary { json } => crate::summary::exec(self.common, json),
        }
    }
}

/// Load the report named by `--input` (or stdin) behind a spinner, surfacing
/// the skipped-entry count once.
pub fn load_dataset(common: &CommonArgs) -> crate::error::Result<Dataset> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Decoding analysis report...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = crate::ingest::load(common.input.as_deref());
    spinner.finish_and_clear();

    if let Ok(dataset) = &result {
        if dataset.skipped > 0 {
            warn!("{} commit entries skipped for invalid timestamps", dataset.skipped);
        }
    }
    result
}
