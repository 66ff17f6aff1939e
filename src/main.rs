use clap::Parser;
use kanban::cli::commands::Cli;
use kanban::cli::handlers;
use kanban::io::logging::{LogTarget, init_logging};

fn main() {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it only logs when given a file
    let target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path),
        (None, None) => LogTarget::Off,
        (None, Some(_)) => LogTarget::Stderr,
    };
    if let Err(e) = init_logging(target) {
        eprintln!("error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
