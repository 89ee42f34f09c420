use clap::Parser;
use weektodo::cli::commands::Cli;
use weektodo::cli::handlers;
use weektodo::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();

    if cli.command.is_none() {
        // No subcommand → TUI, which owns the terminal; log to a file
        logging::init_tui(&config_io::tui_log_path(), cli.verbose);
    } else {
        logging::init_cli(cli.verbose);
    }

    if let Err(e) = handlers::dispatch(cli) {
        tracing::debug!(error = %e, "command failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
