//! Access code command line tool

mod commands;

use clap::{Args, Parser, Subcommand};
use common::constants::{DEFAULT_SETTINGS_FILE, EXIT_ERROR};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "access-token")]
#[command(about = "Generate and validate short access codes bound to data and time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args)]
pub struct EngineArgs {
    /// JSON settings file
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    /// Secret key (overrides the settings file and ACCESS_TOKEN_SECRET)
    #[arg(short, long)]
    secret: Option<String>,
    /// Instant to use as "now", in RFC 3339 format (default: current time)
    #[arg(long)]
    at: Option<chrono::DateTime<chrono::Utc>>,
    /// Treat INPUT as hex-encoded bytes instead of text
    #[arg(long)]
    hex: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the access code for an input
    Generate {
        #[command(flatten)]
        engine: EngineArgs,
        /// Input the code is bound to
        input: String,
    },
    /// Check an access code against an input
    Validate {
        #[command(flatten)]
        engine: EngineArgs,
        /// Input the code is bound to
        input: String,
        /// Code to check
        code: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { engine, input } => commands::generate(&engine, &input),
        Commands::Validate {
            engine,
            input,
            code,
        } => commands::validate(&engine, &input, &code),
    };

    result.unwrap_or_else(|e| {
        error!("{:#}", e);
        ExitCode::from(EXIT_ERROR)
    })
}
