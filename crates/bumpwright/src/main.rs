//! bumpwright - Commit-driven semantic versioning and release automation

mod cli;
mod exit_codes;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli};

/// Directives for the JSON log file: our crates at debug, dependencies at warn
const FILE_FILTER: &str = "warn,bumpwright=debug,bumpwright_core=debug,bumpwright_git=debug,\
bumpwright_changelog=debug,bumpwright_strategies=debug,bumpwright_adapters=debug";

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose);

    if let Err(err) = cli.execute() {
        output::error(&format!("{:#}", err));
        std::process::exit(exit_codes::for_error(&err));
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (warn, or debug with `--verbose`).
/// When a home directory is available a daily JSON file is written as well.
fn init_tracing(verbose: bool) -> Option<WorkerGuard> {
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let (file_layer, guard) = match log_directory() {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "bumpwright.log"));
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new(FILE_FILTER));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    guard
}

/// `~/.bumpwright/logs`, created on first use
fn log_directory() -> Option<PathBuf> {
    let dir = dirs::home_dir()?.join(".bumpwright").join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
