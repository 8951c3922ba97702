use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, ValidatedArgs};
use crate::error::AppError;

mod args;
mod error;
mod fetch;
mod progress;

/// Logs go to stderr so stdout only ever carries the fetched file.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), AppError> {
    let args = ValidatedArgs::try_from(args)?;
    let content = fetch::fetch(&args)?;
    let mut stdout = std::io::stdout().lock();
    // A closed stdout (e.g. piped into `head`) is not worth reporting.
    let _ = stdout.write_all(fetch::render(&args, &content).as_bytes());
    let _ = stdout.flush();
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("❌ {}", error.report());
            error.into()
        }
    }
}
