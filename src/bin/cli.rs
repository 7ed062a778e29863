//! Docket scraper CLI
//!
//! Fetches the commission docket table and appends its records to a CSV file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docket_scraper::{
    error::{AppError, Result},
    models::Config,
    pipeline::{self, ExtractOutcome},
    storage::{CsvFileSink, JsonLinesSink, RecordSink},
    utils::http,
};

/// Docket scraper - commission docket table to CSV
#[derive(Parser, Debug)]
#[command(
    name = "docket-scraper",
    version,
    about = "Extracts docket records from the commission docket table"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "docket.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the docket page and append records to the output file
    Crawl {
        /// Page to fetch (default: source.start_url)
        #[arg(long)]
        url: Option<String>,

        /// Output file (default: output.path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract records from a saved copy of the docket page
    Parse {
        /// Saved HTML file
        file: PathBuf,

        /// Output file (default: output.path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print records as JSON lines instead of appending to the output file
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Output sink for the configured file, optionally redirected.
fn csv_sink(config: &Config, output: Option<PathBuf>) -> Result<CsvFileSink> {
    match output {
        Some(path) => Ok(CsvFileSink::new(path, config.output.delimiter_byte()?)),
        None => CsvFileSink::from_config(&config.output),
    }
}

/// Log the run summary and turn rejected rows into a failing exit.
fn report(outcome: &ExtractOutcome) -> Result<()> {
    log::info!(
        "Rows: {} | Written: {} | Rejected: {}",
        outcome.rows_total,
        outcome.records_written,
        outcome.rows_rejected
    );

    if outcome.rows_rejected > 0 {
        log::error!("Some rows could not be merged; see log above");
        return Err(AppError::RowsRejected(outcome.rows_rejected));
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Crawl { url, output } => {
            if let Some(url) = url {
                config.source.start_url = url;
            }
            config.validate()?;

            let mut sink = csv_sink(&config, output)?;
            let client = http::create_client(&config.crawler)?;
            let outcome = pipeline::run_extract(&config, &client, &mut sink).await?;

            log::info!("Appended records to {}", sink.path().display());
            report(&outcome)?;
        }

        Command::Parse { file, output, json } => {
            config.validate()?;
            let html = tokio::fs::read_to_string(&file).await?;
            log::info!("Parsing {}", file.display());

            let mut sink: Box<dyn RecordSink> = if json {
                Box::new(JsonLinesSink::new(std::io::stdout().lock()))
            } else {
                Box::new(csv_sink(&config, output)?)
            };
            let outcome = pipeline::process_html(&html, &config.source, sink.as_mut())?;
            report(&outcome)?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
