use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use bookstore_infra::{CatalogConfig, CatalogService};
use bookstore_notify::ConsoleNotifier;
use bookstore_observability::LogFormat;
use bookstore_shell::Shell;

/// Interactive bookstore catalog.
#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about)]
struct Cli {
    /// Catalog file (overrides BOOKSTORE_DATA_FILE; default books/index.json).
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,

    /// Log line format on stderr: text or json.
    #[arg(long, default_value = "text", env = "BOOKSTORE_LOG_FORMAT")]
    log_format: LogFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bookstore_observability::init(cli.log_format);

    let mut config = CatalogConfig::from_env().context("invalid bookstore configuration")?;
    if let Some(path) = cli.data_file {
        config = config.with_data_file(path);
    }
    tracing::info!(data_file = %config.data_file.display(), "starting bookstore shell");

    let service = CatalogService::open_file(&config, ConsoleNotifier::stdout())
        .with_context(|| format!("failed to open catalog at {}", config.data_file.display()))?;

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), service);
    shell.run().context("interactive session failed")?;
    Ok(())
}
