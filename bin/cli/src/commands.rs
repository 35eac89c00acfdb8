use crate::EngineArgs;
use access_token::{FixedClock, TokenEngine};
use anyhow::{Context, Result};
use chrono::Utc;
use common::constants::EXIT_INVALID;
use common::SettingsFile;
use log::{debug, info};
use std::process::ExitCode;

/// Input as given on the command line
enum Input {
    Text(String),
    Bytes(Vec<u8>),
}

impl Input {
    fn parse(raw: &str, hex_encoded: bool) -> Result<Self> {
        if hex_encoded {
            let bytes = hex::decode(raw.trim()).context("Failed to decode hex input")?;
            Ok(Input::Bytes(bytes))
        } else {
            Ok(Input::Text(raw.to_string()))
        }
    }
}

/// Print the access code for the input
pub fn generate(args: &EngineArgs, raw_input: &str) -> Result<ExitCode> {
    let engine = build_engine(args)?;
    let code = match Input::parse(raw_input, args.hex)? {
        Input::Text(text) => engine.generate_str(&text),
        Input::Bytes(bytes) => engine.generate(&bytes),
    }
    .context("Failed to generate access code")?;

    println!("{}", code);
    Ok(ExitCode::SUCCESS)
}

/// Check the code against the input, reporting through the exit status
pub fn validate(args: &EngineArgs, raw_input: &str, code: &str) -> Result<ExitCode> {
    let engine = build_engine(args)?;
    let valid = match Input::parse(raw_input, args.hex)? {
        Input::Text(text) => engine.validate_str(&text, code),
        Input::Bytes(bytes) => engine.validate(&bytes, code),
    }
    .context("Failed to validate access code")?;

    if valid {
        info!("Access code accepted");
        println!("valid");
        Ok(ExitCode::SUCCESS)
    } else {
        info!("Access code rejected");
        println!("invalid");
        Ok(ExitCode::from(EXIT_INVALID))
    }
}

/// Load settings (command line > environment > file) and build the engine.
/// "Now" is read once, so every code in one invocation uses the same instant.
fn build_engine(args: &EngineArgs) -> Result<TokenEngine<FixedClock>> {
    let now = args.at.unwrap_or_else(Utc::now);
    debug!("Using {} as the current time", now.to_rfc3339());

    let engine = SettingsFile::load(&args.config)
        .with_context(|| format!("Failed to load settings from {:?}", args.config))?
        .apply_env()
        .with_secret_override(args.secret.clone())
        .build_engine(FixedClock(now))
        .context("Failed to configure token engine")?;

    Ok(engine)
}
