use std::io::Read;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pathway::config::Config;
use pathway::models::AssessmentProfile;
use pathway::state::AppState;

/// Reads an assessment profile (JSON) from the file given as the first argument,
/// or from stdin, and prints the recommendation report.
fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting pathway v{}", env!("CARGO_PKG_VERSION"));

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile from {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read profile from stdin")?;
            buf
        }
    };
    let profile: AssessmentProfile =
        serde_json::from_str(&raw).context("Profile is not valid JSON")?;

    let state = AppState::build(config)?;
    let (report, record) = state.assess(&profile).map_err(|e| {
        error!(code = e.code(), "Assessment failed: {e}");
        e
    })?;
    info!(
        "Assessment {} produced {} recommendations",
        record.id,
        report.results.len()
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
