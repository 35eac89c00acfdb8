use crate::test_utils::{generate_code, run_cli, validate_code, write_settings, Invocation};
use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use common::constants::EXIT_ERROR;
use common::SettingsFile;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::Path;

const SECRET: &str = "test-secret";
const ISSUED_AT: &str = "2024-01-01T00:00:00Z";
const RANDOM_TRIALS: usize = 20;

pub fn run_all(cli_binary: &Path, dir: &Path) -> Result<()> {
    println!("\n🔑 Known answer...");
    known_answer(cli_binary, dir)?;
    println!("✅ Known answer passed");

    println!("\n🔁 Round trip and mutation...");
    round_trip_and_mutation(cli_binary, dir)?;
    println!("✅ Round trip and mutation passed");

    println!("\n⏱️  Expiry and grace window...");
    expiry_and_grace(cli_binary, dir)?;
    println!("✅ Expiry and grace window passed");

    println!("\n🔐 Secret precedence...");
    secret_precedence(cli_binary, dir)?;
    println!("✅ Secret precedence passed");

    println!("\n🧾 Hex input...");
    hex_input(cli_binary, dir)?;
    println!("✅ Hex input passed");

    println!("\n🚫 Configuration errors...");
    configuration_errors(cli_binary, dir)?;
    println!("✅ Configuration errors passed");

    Ok(())
}

fn data_only() -> SettingsFile {
    SettingsFile {
        secret: Some(SECRET.to_string()),
        validate_data: true,
        ..Default::default()
    }
}

fn timed(valid_for_ms: u64, grace: bool) -> SettingsFile {
    SettingsFile {
        secret: Some(SECRET.to_string()),
        validate_data: true,
        validate_time: true,
        valid_for_ms: Some(valid_for_ms),
        time_zero: Some(DateTime::<Utc>::UNIX_EPOCH),
        ensure_at_least_valid_for: grace,
        ..Default::default()
    }
}

fn at(instant: &str) -> Invocation<'_> {
    Invocation {
        at: Some(instant),
        ..Default::default()
    }
}

fn random_input(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(1..64);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn known_answer(cli_binary: &Path, dir: &Path) -> Result<()> {
    let settings = write_settings(dir, "data-only", &data_only())?;
    let plain = Invocation::default();

    let code = generate_code(cli_binary, &settings, "hello", &plain)?;
    ensure!(code == "31768456", "Unexpected code for 'hello': {}", code);
    ensure!(validate_code(cli_binary, &settings, "hello", &code, &plain)?);
    ensure!(!validate_code(cli_binary, &settings, "hallo", &code, &plain)?);

    let timed_settings = write_settings(dir, "known-timed", &timed(30_000, false))?;
    let code = generate_code(cli_binary, &timed_settings, "hello", &at(ISSUED_AT))?;
    ensure!(code == "36373379", "Unexpected timed code for 'hello': {}", code);
    Ok(())
}

fn round_trip_and_mutation(cli_binary: &Path, dir: &Path) -> Result<()> {
    let settings = write_settings(dir, "round-trip", &timed(3_600_000, true))?;
    let invocation = at(ISSUED_AT);
    let mut rng = rand::thread_rng();

    for _ in 0..RANDOM_TRIALS {
        let input = random_input(&mut rng);
        let code = generate_code(cli_binary, &settings, &input, &invocation)?;
        ensure!(code.len() == 8, "Code has wrong length: {}", code);
        ensure!(
            validate_code(cli_binary, &settings, &input, &code, &invocation)?,
            "Code for {:?} did not validate",
            input
        );

        let mutated = format!("{}!", input);
        ensure!(
            !validate_code(cli_binary, &settings, &mutated, &code, &invocation)?,
            "Code for {:?} validated against {:?}",
            input,
            mutated
        );
    }
    Ok(())
}

fn expiry_and_grace(cli_binary: &Path, dir: &Path) -> Result<()> {
    let strict = write_settings(dir, "strict", &timed(500, false))?;
    let lenient = write_settings(dir, "lenient", &timed(500, true))?;

    let code = generate_code(cli_binary, &strict, "payload", &at(ISSUED_AT))?;
    ensure!(validate_code(cli_binary, &strict, "payload", &code, &at(ISSUED_AT))?);
    ensure!(
        !validate_code(cli_binary, &strict, "payload", &code, &at("2024-01-01T00:00:00.500Z"))?,
        "Code still valid one window later without grace"
    );

    let code = generate_code(cli_binary, &lenient, "payload", &at(ISSUED_AT))?;
    ensure!(
        validate_code(cli_binary, &lenient, "payload", &code, &at("2024-01-01T00:00:00.501Z"))?,
        "Code rejected one window late with grace"
    );
    ensure!(
        !validate_code(cli_binary, &lenient, "payload", &code, &at("2024-01-01T00:00:01.001Z"))?,
        "Code still valid two windows late with grace"
    );
    Ok(())
}

fn secret_precedence(cli_binary: &Path, dir: &Path) -> Result<()> {
    let settings = write_settings(dir, "precedence", &data_only())?;

    let from_env = Invocation {
        env_secret: Some("another-secret"),
        ..Default::default()
    };
    let code = generate_code(cli_binary, &settings, "hello", &from_env)?;
    ensure!(code != "31768456", "Environment secret was ignored");

    let from_flag = Invocation {
        env_secret: Some("another-secret"),
        secret: Some(SECRET),
        ..Default::default()
    };
    let code = generate_code(cli_binary, &settings, "hello", &from_flag)?;
    ensure!(code == "31768456", "Command line secret did not win: {}", code);
    Ok(())
}

fn hex_input(cli_binary: &Path, dir: &Path) -> Result<()> {
    let settings = write_settings(dir, "hex", &data_only())?;
    let hex = Invocation {
        hex: true,
        ..Default::default()
    };

    let code = generate_code(cli_binary, &settings, "68656c6c6f", &hex)?;
    ensure!(code == "31768456", "Hex input differs from text input: {}", code);

    // Empty bytes are accepted where empty text is not
    let code = generate_code(cli_binary, &settings, "", &hex)?;
    ensure!(validate_code(cli_binary, &settings, "", &code, &hex)?);
    let output = run_cli(cli_binary, "generate", &settings, &[""], &Invocation::default())?;
    ensure!(
        output.status.code() == Some(i32::from(EXIT_ERROR)),
        "Empty text input was accepted"
    );
    Ok(())
}

fn configuration_errors(cli_binary: &Path, dir: &Path) -> Result<()> {
    let nothing = SettingsFile {
        secret: Some(SECRET.to_string()),
        ..Default::default()
    };
    let no_window = SettingsFile {
        secret: Some(SECRET.to_string()),
        validate_time: true,
        ..Default::default()
    };
    let no_secret = SettingsFile {
        validate_data: true,
        ..Default::default()
    };

    for (name, settings) in [
        ("nothing", nothing),
        ("no-window", no_window),
        ("no-secret", no_secret),
    ] {
        let path = write_settings(dir, name, &settings)?;
        let output = run_cli(cli_binary, "generate", &path, &["hello"], &Invocation::default())?;
        ensure!(
            output.status.code() == Some(i32::from(EXIT_ERROR)),
            "Settings {:?} were accepted",
            name
        );
    }
    Ok(())
}
