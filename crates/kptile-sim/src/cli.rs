//! Command-line interface definitions for kptile-sim.

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `kptile-sim` binary.
#[derive(Parser, Debug)]
#[command(
    name = "kptile-sim",
    about = "Drive the keypad tiling engine against a simulated desktop",
    version
)]
pub struct Cli {
    /// Logging controls shared across kptile binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a scenario, dispatch bindings and print the resulting geometry.
    Run(RunArgs),
    /// Print the effective accelerator table.
    Bindings(BindingsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Scenario file (RON) describing the usable area and the windows.
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Binding names to dispatch in order, e.g. `kp7` or `popup-kp4`.
    #[arg(value_name = "BINDING", num_args = 1..)]
    pub bindings: Vec<String>,

    /// Simulate a backend that needs settle delays between window operations.
    #[arg(long)]
    pub wayland: bool,

    /// Highlight this chooser item while a popup is open.
    #[arg(long, value_name = "INDEX")]
    pub select: Option<usize>,

    /// Confirm the popup with Return instead of waiting for the timeout.
    #[arg(long, conflicts_with = "cancel")]
    pub confirm: bool,

    /// Cancel the popup by releasing the modifiers.
    #[arg(long)]
    pub cancel: bool,

    /// Simulated time to let each gesture settle.
    #[arg(
        long,
        value_parser = humantime::parse_duration,
        default_value = "500ms",
        value_name = "DURATION"
    )]
    pub settle: Duration,

    /// Optional settings file (RON); defaults apply when absent.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `bindings` subcommand.
#[derive(Args, Debug, Clone)]
pub struct BindingsArgs {
    /// Optional settings file (RON); defaults apply when absent.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
