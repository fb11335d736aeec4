use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "duewatch-cli", version, about = "Maintenance routine due-ness CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/duewatch/config.toml
    #[arg(long = "config", global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single routine's trigger
    Evaluate(commands::evaluate::EvaluateArgs),
    /// Map a progress percentage to a severity tier
    Classify {
        /// Progress percentage (0-100)
        percent: u8,
    },
    /// Assess every routine in a maintenance plan
    Assess(commands::assess::AssessArgs),
    /// Runtime measurement log
    Measure {
        #[command(subcommand)]
        action: commands::measure::MeasureAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duewatch_core=warn,duewatch_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Commands::Evaluate(args) => commands::evaluate::run(args, config_path),
        Commands::Classify { percent } => commands::classify::run(percent, config_path),
        Commands::Assess(args) => commands::assess::run(args, config_path),
        Commands::Measure { action } => commands::measure::run(action),
        Commands::Config { action } => commands::config::run(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
