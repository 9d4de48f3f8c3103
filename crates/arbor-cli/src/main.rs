//! arbor CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use arbor_cli::{Args, error_adapter::render_report};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    let output_path = args.output_path().display().to_string();
    info!(
        input_path = args.input,
        output_path,
        input_format:? = args.input_format();
        "Starting arbor"
    );
    debug!(args:?; "Parsed arguments");

    if let Err(err) = arbor_cli::run(&args) {
        error!("{}", render_report(&err, &args.input));
        process::exit(1);
    }

    info!(output_path; "Completed successfully");
}
