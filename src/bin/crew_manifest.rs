//! Print the analysis crew as a JSON manifest for the orchestration engine.
//!
//! Uses `[crew]` from `config.toml` when present, otherwise the built-in
//! stock analysis crew. Invalid definitions fail before anything is printed.

use anyhow::{Context, Result};
use tracing::{info, warn};

use tickerdesk::config::{self, AppConfig};
use tickerdesk::logging;

fn main() -> Result<()> {
    let _ = dotenv::dotenv();
    logging::init("tickerdesk=info");

    let cfg = AppConfig::load_or_default(config::DEFAULT_CONFIG_FILE)?;
    let crew = cfg.crew_or_default();
    let manifest = crew.manifest()?;

    for var in &manifest.required_env {
        if std::env::var(var).is_err() {
            warn!(env = %var, "Credential required by the crew is not set");
        }
    }
    info!(
        crew = %crew.name,
        agents = crew.agents.len(),
        tasks = crew.tasks.len(),
        process = ?crew.process,
        "Crew validated"
    );

    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialise crew manifest")?;
    println!("{json}");
    Ok(())
}
