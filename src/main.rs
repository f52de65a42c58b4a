//! # Source Connectors CLI (`connectors`)
//!
//! The `connectors` binary lists the available connector kinds, checks the
//! health of configured connector instances, and runs syncs that extract
//! documents from a source and bulk-index them into Elasticsearch.
//!
//! ## Usage
//!
//! ```bash
//! connectors --config ./config/connectors.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `connectors kinds` | List registered connector service types |
//! | `connectors fields <service_type>` | Print a kind's configurable fields as JSON |
//! | `connectors sources` | List configured connectors and their health |
//! | `connectors health <connector>` | Health-check one configured connector |
//! | `connectors sync <connector>` | Extract documents and index them |
//!
//! ## Examples
//!
//! ```bash
//! # What can be configured for the filesystem connector?
//! connectors fields filesystem
//!
//! # Count documents without touching the index
//! connectors sync docs --dry-run
//!
//! # Index into a different index with smaller batches
//! connectors sync docs --index scratch-docs --batch-size 20
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use source_connectors::config;
use source_connectors::es_client::IndexingClient;
use source_connectors::ingest::{self, SyncOptions};
use source_connectors::logging;
use source_connectors::progress::ProgressMode;
use source_connectors::sources;
use source_connectors::traits::ConnectorRegistry;

/// Source Connectors CLI: extract documents from third-party sources and
/// index them into Elasticsearch.
#[derive(Parser)]
#[command(
    name = "connectors",
    about = "Extract documents from third-party sources and bulk-index them into Elasticsearch",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/connectors.toml`. Not read by `kinds` or `fields`.
    #[arg(long, global = true, default_value = "./config/connectors.toml")]
    config: PathBuf,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List registered connector kinds.
    Kinds,

    /// Print the configurable fields of a connector kind as JSON.
    Fields {
        /// Service type, e.g. `example` or `filesystem`.
        service_type: String,
    },

    /// List configured connectors and whether they pass their health checks.
    Sources,

    /// Health-check one configured connector.
    ///
    /// Exits non-zero when the connector is unhealthy.
    Health {
        /// Connector name as configured under `[connectors.<name>]`.
        connector: String,

        /// Health check parameters as a JSON object.
        #[arg(long)]
        params: Option<String>,
    },

    /// Extract every document from a connector and index it.
    ///
    /// Documents are written in batches, in the order the connector yields
    /// them. The run stops at the first batch Elasticsearch rejects.
    Sync {
        /// Connector name as configured under `[connectors.<name>]`.
        connector: String,

        /// Count documents without indexing anything.
        #[arg(long)]
        dry_run: bool,

        /// Override `[sync].batch_size`.
        #[arg(long)]
        batch_size: Option<usize>,

        /// Override the target index.
        #[arg(long)]
        index: Option<String>,

        /// Progress reporting on stderr. Defaults to `human` on a TTY, `off` otherwise.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let registry = ConnectorRegistry::with_builtins();

    // Commands that don't require config
    match &cli.command {
        Commands::Kinds => {
            sources::list_kinds(&registry);
            return Ok(());
        }
        Commands::Fields { service_type } => {
            sources::print_fields(&registry, service_type)?;
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Sources => {
            sources::list_sources(&cfg, &registry).await?;
        }
        Commands::Health { connector, params } => {
            let params: Value = match params {
                Some(raw) => serde_json::from_str(&raw)
                    .with_context(|| "--params must be valid JSON")?,
                None => Value::Null,
            };
            let instance = sources::build_connector(&cfg, &registry, &connector)?;
            let healthy = instance.health_check(&params).await?;
            println!("{}: {}", connector, if healthy { "healthy" } else { "unhealthy" });
            if !healthy {
                bail!("connector '{}' is unhealthy", connector);
            }
        }
        Commands::Sync {
            connector,
            dry_run,
            batch_size,
            index,
            progress,
        } => {
            let connector_cfg = cfg.connector(&connector)?;
            let instance = sources::build_connector(&cfg, &registry, &connector)?;

            if dry_run {
                let count =
                    ingest::count_documents(instance, cfg.sync.channel_capacity).await?;
                println!("sync {} (dry-run)", connector);
                println!("  documents found: {}", count);
                return Ok(());
            }

            let batch_size = batch_size.unwrap_or(cfg.sync.batch_size);
            if batch_size == 0 {
                bail!("--batch-size must be > 0");
            }
            let options = SyncOptions {
                index: index.unwrap_or_else(|| connector_cfg.index_name(&connector)),
                batch_size,
                channel_capacity: cfg.sync.channel_capacity,
            };

            let client = IndexingClient::new(&cfg.elasticsearch)?;
            let reporter = progress.unwrap_or_else(ProgressMode::detect).reporter();
            let stats =
                ingest::run_sync(&connector, instance, &client, &options, reporter.as_ref())
                    .await?;

            println!("sync {}", connector);
            println!("  index: {}", options.index);
            println!("  documents indexed: {}", stats.documents);
            println!("  batches: {}", stats.batches);
            println!("ok");
        }
        Commands::Kinds | Commands::Fields { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
