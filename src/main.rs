//! tickerdesk — interactive tournament watchlist editor
//!
//! Entry point. Loads configuration, restores the watchlist from disk (or
//! the default universe), and runs the menu loop until the user saves,
//! discards, or interrupts with Ctrl+C.

use anyhow::{Context, Result};
use tracing::info;

use tickerdesk::config::{self, AppConfig};
use tickerdesk::editor::{Editor, SessionOutcome};
use tickerdesk::{logging, storage};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Quiet by default: log lines would garble the menu
    logging::init("tickerdesk=warn");

    let cfg = AppConfig::load_or_default(config::DEFAULT_CONFIG_FILE)?;
    let path = cfg.watchlist.file.clone();
    let list = storage::load_or_default(&path)?;
    info!(path = %path.display(), count = list.len(), "Editor starting");

    // The menu blocks on stdin, so it runs off the async workers while the
    // runtime waits on Ctrl+C.
    let command = cfg.watchlist.tournament_command.clone();
    let mut session = tokio::task::spawn_blocking(move || {
        let mut editor = Editor::new(list, path, std::io::stdin().lock(), std::io::stdout())
            .with_tournament_command(command);
        editor.run()
    });

    tokio::select! {
        joined = &mut session => {
            let outcome = joined.context("Editor task panicked")??;
            match &outcome {
                SessionOutcome::Saved { path, count } => {
                    info!(path = %path.display(), count, "Session ended with save");
                }
                SessionOutcome::Discarded | SessionOutcome::Interrupted => {
                    info!(?outcome, "Session ended without save");
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n\n[WARNING] Exiting...");
            info!("Interrupted, exiting without saving");
            // The editor thread is parked in a stdin read that can't be
            // cancelled; leave without waiting for it.
            std::process::exit(0);
        }
    }

    Ok(())
}
