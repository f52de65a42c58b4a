//! Structured logging setup for the `connectors` binary.
//!
//! Logs go to stderr so that command output on stdout stays parseable.
//! `RUST_LOG` directives are honored; without them the crate logs at `info`
//! and everything else at `warn`. `--verbose` raises the crate to `debug`.
//!
//! The indexing client's `log` and `trace` flags emit at `info`, so both
//! show up under the default filter.

use tracing_subscriber::EnvFilter;

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(verbose: bool) -> String {
    let crate_level = if verbose { "debug" } else { "info" };
    format!("warn,source_connectors={}", crate_level)
}

pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(default_directives(verbose))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(verbose)
        .try_init()
}
