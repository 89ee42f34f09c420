use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Level used when RUST_LOG is unset, from the number of `-v` flags
fn default_level(verbose: u8, base: &'static str) -> &'static str {
    match verbose {
        0 => base,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr, for CLI subcommands
pub fn init_cli(verbose: u8) {
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level(verbose, "warn")))
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
}

/// Log to a file while the TUI owns the terminal. Falls back to no logging
/// if the file can't be opened; the warning goes to stderr before the
/// alternate screen is entered.
pub fn init_tui(log_path: &Path, verbose: u8) {
    if let Some(parent) = log_path.parent()
        && let Err(err) = fs::create_dir_all(parent)
    {
        eprintln!(
            "warning: could not create log directory {}: {}",
            parent.display(),
            err
        );
    }
    let file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(f) => f,
        Err(err) => {
            eprintln!(
                "warning: could not open log file {}: {}; logging disabled",
                log_path.display(),
                err
            );
            return;
        }
    };

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level(verbose, "info")))
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    if let Err(err) = init_result {
        eprintln!("warning: could not start file logging: {}", err);
    }
}
