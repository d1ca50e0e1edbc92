//! htmlfeat CLI
//!
//! Streams features from zipped HTML shards into one sparse namespace file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use htmlfeat::{
    error::{AppError, Result},
    models::{Config, ErrorPolicy, LabelMarker, OutputFormat},
    pipeline,
    services::{DocumentParser, LabelTable},
    storage::format_line,
    utils::base_name,
};

/// htmlfeat - HTML corpus feature extractor
#[derive(Parser, Debug)]
#[command(
    name = "htmlfeat",
    version,
    about = "Extract sparse features from zipped HTML corpora"
)]

struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "htmlfeat.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract features from every shard into the output file
    Extract {
        /// Shard archive, in processing order (repeatable; replaces configured shards)
        #[arg(long = "shard")]
        shards: Vec<PathBuf>,

        /// Label table
        #[arg(long)]
        labels: Option<PathBuf>,

        /// Output file (truncated)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of entries to visit per shard
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Sort entries by name within each shard
        #[arg(long)]
        sort_entries: bool,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Stop on the first entry that cannot be processed
        #[arg(long)]
        fail_fast: bool,
    },

    /// Print the features of a single HTML file
    Inspect {
        /// HTML file to parse
        file: PathBuf,

        /// Label table to resolve the file's class against
        #[arg(long)]
        labels: Option<PathBuf>,
    },

    /// Validate configuration and declared inputs
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = if cli.config.exists() {
        let config = Config::load_or_default(&cli.config);
        log::info!("Loaded configuration from {}", cli.config.display());
        config
    } else {
        log::debug!("{} not found, using defaults", cli.config.display());
        Config::default()
    };

    match cli.command {
        Command::Extract {
            shards,
            labels,
            output,
            limit,
            sort_entries,
            format,
            fail_fast,
        } => {
            if !shards.is_empty() {
                config.input.shards = shards;
            }
            if let Some(path) = labels {
                config.input.labels = path;
            }
            if let Some(path) = output {
                config.output.path = path;
            }
            if limit.is_some() {
                config.input.limit = limit;
            }
            if sort_entries {
                config.input.sort_entries = true;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if fail_fast {
                config.pipeline.on_document_error = ErrorPolicy::Abort;
            }

            let summary = pipeline::run(&config)?;
            if summary.failed_entries > 0 {
                log::warn!("{} entries could not be processed", summary.failed_entries);
            }
        }

        Command::Inspect { file, labels } => {
            let bytes = std::fs::read(&file)?;
            let name = file.to_string_lossy();
            let record = DocumentParser::new()?
                .strict_utf8(config.pipeline.strict_utf8)
                .parse_bytes(&name, &bytes)?
                .with_document_id(base_name(&name));

            let label = match labels {
                Some(path) => LabelTable::load(path, &config.labels)?.resolve(&record.document_id),
                None => LabelMarker::Unlabeled,
            };

            println!("{}", serde_json::to_string_pretty(&record)?);
            println!("{}", format_line(&record, label));
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            if let Err(e) = config.check_inputs() {
                log::error!("Input check failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ {} shards and label table {} found",
                config.input.shards.len(),
                config.input.labels.display()
            );

            let table = LabelTable::load(&config.input.labels, &config.labels)?;
            if table.is_empty() {
                return Err(AppError::validation("label table has no rows"));
            }

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
