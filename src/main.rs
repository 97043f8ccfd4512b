//! # Shamba CLI (`shamba`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `shamba init` | Create the SQLite database and schema |
//! | `shamba classify` | Classify a title and text, print JSON |
//! | `shamba sync filesystem` | Ingest and classify documents from a directory |
//! | `shamba get <id>` | Show a stored source and its metadata |
//! | `shamba stats` | Classification statistics |
//! | `shamba serve` | Start the HTTP callback server |
//!
//! ## Examples
//!
//! ```bash
//! shamba init --config ./config/shamba.toml
//! shamba classify --title "Mwongozo wa kilimo cha mahindi" --file mwongozo.txt --month 3
//! shamba sync filesystem --config ./config/shamba.toml
//! shamba serve --config ./config/shamba.toml
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use shamba::classifier::{classify_document, Clock, FixedClock};
use shamba::{config, get, ingest, migrate, server, stats, telemetry};

/// Shamba: rule-based classification for agricultural knowledge documents.
///
/// Commands that touch the database read a TOML configuration file given by
/// `--config`.
#[derive(Parser)]
#[command(name = "shamba", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/shamba.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Idempotent.
    Init,

    /// Classify a document and print the result as JSON.
    ///
    /// Needs no database. Without `--month` the current month is taken from
    /// the configured clock (UTC when no config file is present).
    Classify {
        /// Document title.
        #[arg(long, default_value = "")]
        title: String,

        /// Document text.
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,

        /// Read the document text from a file.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Pin the calendar month (1-12) used for season detection.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Ingest documents from a connector and classify each one.
    Sync {
        /// Connector name. Available: `filesystem`.
        connector: String,

        /// Show the item count without writing to the database.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of items to process.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a stored source by id.
    Get {
        /// Source id.
        id: String,
    },

    /// Print classification statistics.
    Stats,

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init()?;
    let cli = Cli::parse();

    if let Commands::Classify {
        title,
        content,
        file,
        month,
    } = &cli.command
    {
        let content = match (content, file) {
            (Some(c), _) => c.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => String::new(),
        };
        let clock: Box<dyn Clock> = match month {
            Some(m) => Box::new(FixedClock(*m)),
            None => {
                let cfg = config::load_config(&cli.config).ok();
                Box::new(cfg.map(|c| c.classifier.clock()).unwrap_or_default())
            }
        };
        if title.is_empty() && content.is_empty() {
            bail!("nothing to classify: pass --title, --content or --file");
        }

        let result = classify_document(title, &content, clock.as_ref());
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Sync {
            connector,
            dry_run,
            limit,
        } => {
            ingest::run_sync(&cfg, &connector, dry_run, limit).await?;
        }
        Commands::Get { id } => {
            get::run_get(&cfg, &id).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Classify { .. } => unreachable!("handled before config loading"),
    }

    Ok(())
}
