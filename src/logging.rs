//! Tracing subscriber setup.
//!
//! The TUI owns stdout and stderr, so interactive sessions log to
//! `~/.quill/quill.log`. Subcommands log to stderr, and only when `QUILL_LOG`
//! is set.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;

fn env_filter(config: &ClientConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_filter).unwrap_or_else(|e| {
        eprintln!(
            "Ignoring invalid log filter '{}': {}",
            config.log_filter, e
        );
        EnvFilter::new(crate::config::DEFAULT_LOG_FILTER)
    })
}

/// Send logs to the log file for an interactive session.
///
/// Returns the path written to, or `None` when no home directory is known.
pub fn init_file_logging(config: &ClientConfig) -> std::io::Result<Option<PathBuf>> {
    let Some(path) = config.resolved_log_path() else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("quill {} starting", env!("CARGO_PKG_VERSION"));
    }
    Ok(Some(path))
}

/// Send logs to stderr for a subcommand, if `QUILL_LOG` asked for them.
pub fn init_cli_logging(config: &ClientConfig) {
    if !config.log_requested {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
