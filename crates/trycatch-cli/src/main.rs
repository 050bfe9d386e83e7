//! trycatch-cli - runs the try / catch / finally demo scenarios.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use trycatch_core::{Config, UncaughtPolicy};

mod demos;

/// trycatch-cli - structured failure handling demos
#[derive(Parser, Debug)]
#[command(name = "trycatch-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// What to do with a failure nothing captures (abort, panic)
    #[arg(long, env = "TRYCATCH_UNCAUGHT")]
    uncaught: Option<UncaughtPolicy>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Catch one typed failure, then clean up
    Basic,
    /// Route several failure types through one chain
    Multiple,
    /// Strings, std errors and the catch-all
    Builtin,
    /// A handler that produces a value
    WithReturn,
    /// Raise from an inner handler to an outer attempt
    Nested,
    /// Order processing with a declarative handler chain
    Orders,
    /// Run every demo (default)
    All,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    Config::default()
        .with_uncaught(cli.uncaught.unwrap_or_default())
        .install();

    if let Err(e) = run(cli.command.unwrap_or(Commands::All)) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Basic => demos::basic(),
        Commands::Multiple => demos::multiple(),
        Commands::Builtin => demos::builtin(),
        Commands::WithReturn => demos::with_return()?,
        Commands::Nested => demos::nested(),
        Commands::Orders => demos::orders()?,
        Commands::All => {
            println!("trycatch demos");
            println!("==============");
            demos::basic();
            demos::multiple();
            demos::builtin();
            demos::with_return()?;
            demos::nested();
            demos::orders()?;
            println!("\nAll demos finished.");
        }
    }
    Ok(())
}
