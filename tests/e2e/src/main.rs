mod scenarios;

use anyhow::{Context, Result};
use std::path::PathBuf;
use test_utils::cleanup_test_data;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("e2e_tests=debug,info")
        .init();

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|tests| tests.parent())
        .context("e2e crate is not inside the workspace")?
        .to_path_buf();
    let cli_binary = std::env::var("CLI_BINARY")
        .map(PathBuf::from)
        .unwrap_or_else(|_| workspace_root.join("target").join("release").join("access-token"));

    let test_data_dir = manifest_dir.join("test_data");
    std::fs::create_dir_all(&test_data_dir)?;

    println!("CLI binary: {:?}", cli_binary);
    println!("Test data dir: {:?}", test_data_dir);

    let result = scenarios::run_all(&cli_binary, &test_data_dir);

    // Always cleanup, even on error
    if let Err(e) = cleanup_test_data(&test_data_dir) {
        eprintln!("Warning: Failed to cleanup test data: {}", e);
    }

    result?;
    println!("\n✅ All E2E tests passed!");
    Ok(())
}
