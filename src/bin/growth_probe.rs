//! One-shot financial-growth probe.
//!
//! Fetches the latest growth statement for a symbol (first argument, or
//! the configured default) and prints the raw JSON. The API key comes from
//! the environment variable named by `growth_api.api_key_env`.

use anyhow::Result;
use tracing::warn;

use tickerdesk::config::{self, AppConfig};
use tickerdesk::data::growth::FmpGrowthClient;
use tickerdesk::data::run_probe;
use tickerdesk::logging;
use tickerdesk::types::Ticker;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();
    logging::init("tickerdesk=info");

    let cfg = AppConfig::load_or_default(config::DEFAULT_CONFIG_FILE)?;
    let raw_symbol = std::env::args()
        .nth(1)
        .unwrap_or_else(|| cfg.growth_api.symbol.clone());
    let symbol = Ticker::parse(&raw_symbol)?;

    let api_key = match AppConfig::resolve_secret(&cfg.growth_api.api_key_env) {
        Ok(key) => key,
        Err(e) => {
            warn!(env = %cfg.growth_api.api_key_env, "No API key, skipping request");
            println!("Error: {e}");
            return Ok(());
        }
    };

    let client = FmpGrowthClient::new(&cfg.growth_api, api_key)?;
    let mut stdout = std::io::stdout();
    run_probe(&client, symbol.as_str(), cfg.growth_api.limit, &mut stdout).await?;
    Ok(())
}
