//! SIRS scoring command line
//!
//! Main entry point: loads the upstream sources, scores every stay with a
//! suspected-infection time and prints the results.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sirs::config::{self, SourceBackend};
use sirs::report::{self, OutputFormat};
use sirs::sources::{JsonDirSource, SourceReader};
use sirs::{score_stays, CohortSummary, InputSource};

#[derive(Parser)]
#[command(name = "sirs", about = "SIRS score per ICU stay at suspected infection time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct SourceArgs {
    /// Source backend, overrides `source.kind`
    #[arg(long, global = true, value_enum)]
    source: Option<SourceBackend>,
    #[arg(long, global = true)]
    database_url: Option<String>,
    #[arg(long, global = true)]
    json_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every stay and print one row per stay
    Score {
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the score distribution and per-criterion counts
    Summary,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn open_source(settings: &config::SourceConfig, args: &SourceArgs) -> Result<Box<dyn SourceReader>> {
    match args.source.unwrap_or(settings.kind) {
        #[cfg(feature = "sqlite")]
        SourceBackend::Sqlite => {
            let url = args
                .database_url
                .clone()
                .or_else(|| settings.database_url.clone())
                .context("sqlite source needs source.database_url or --database-url")?;
            let database = sirs::db::Database::connect(&url)
                .await
                .with_context(|| format!("Failed to connect to {}", url))?;
            Ok(Box::new(database))
        }
        #[cfg(not(feature = "sqlite"))]
        SourceBackend::Sqlite => Err(anyhow::anyhow!("built without the sqlite feature")),
        SourceBackend::Json => {
            let dir = args
                .json_dir
                .clone()
                .or_else(|| settings.json_dir.clone())
                .context("json source needs source.json_dir or --json-dir")?;
            Ok(Box::new(JsonDirSource::new(dir)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = config::load_config().context("Failed to load configuration")?;
    init_tracing(&settings.log.filter);

    let reader = open_source(&settings.source, &cli.source).await?;
    let tables = reader
        .read_tables()
        .await
        .context("Failed to read input sources")?;
    for input in InputSource::ALL {
        info!(source = %input, rows = tables.row_count(input), "loaded input source");
    }
    let run = score_stays(&tables);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Score { format } => {
            let format = format.unwrap_or(settings.output.format);
            report::write_results(&mut out, &run.results, format)?;
        }
        Commands::Summary => {
            let summary = CohortSummary::from_results(&run.results);
            info!(stays = summary.stays, "cohort summary");
            write!(out, "{}", summary)?;
        }
    }

    Ok(())
}
