//! genba-board headless exporter entry point

use std::{process, str::FromStr};

use clap::Parser;
use log::LevelFilter;

use genba_board::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .filter_level(log_level)
        .init();

    log::debug!("Parsed arguments: {args:?}");

    match genba_board::cli::run(&args).await {
        Ok(path) => println!("{}", path.display()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}
