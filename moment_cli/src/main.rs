//! # Flexure CLI
//!
//! Terminal front end for bending-moment diagrams.
//!
//! - `plot` draws one diagram from loads given on the command line
//! - `session` opens an interactive prompt for building up the load tables
//! - `config` prints or writes the effective configuration

mod commands;
mod load_args;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use moment_core::CalcError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Bending-moment diagrams for beams under point loads and couples
#[derive(Parser)]
#[command(name = "moment_cli")]
#[command(author = "Flexure Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bending-moment diagrams for beams and shafts", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and draw one diagram
    Plot(commands::plot::PlotArgs),
    /// Interactive load entry
    Session(commands::session::SessionArgs),
    /// Show or write the configuration
    Config(commands::config::ConfigArgs),
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Plot(args) => commands::plot::execute(args),
        Commands::Session(args) => commands::session::execute(args),
        Commands::Config(args) => commands::config::execute(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc_err) = e.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc_err) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}
