use std::env;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use bqcost::config::{Cli, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match Config::resolve(cli, |key| env::var(key).ok()) {
        Ok(config) => bqcost::run(&config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red(), e);
        if let Some(hint) = e.hint() {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}
