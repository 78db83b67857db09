#![warn(missing_docs)]

//! Entry point for the `kptile-sim` binary.

mod cli;
mod error;
mod scenario;
mod sim;

use std::process;

use clap::Parser;
use tracing::error;

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {}", err.pretty());
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    logging::init(&log);
    match command {
        Commands::Run(args) => sim::run(&args),
        Commands::Bindings(args) => sim::bindings(&args),
    }
}
