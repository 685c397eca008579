//! The `config.toml` shipped at the crate root must load and validate.

use std::path::Path;

use tickerdesk::config::AppConfig;

fn shipped() -> AppConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml");
    AppConfig::load(&path).unwrap()
}

#[test]
fn shipped_config_loads() {
    let cfg = shipped();
    assert_eq!(cfg.watchlist.file, Path::new("tournament_watchlist.txt"));
    assert_eq!(cfg.growth_api.api_key_env, "FMP_API_KEY");
    assert_eq!(cfg.growth_api.limit, 1);
}

#[test]
fn shipped_config_crew_validates() {
    let crew = shipped().crew_or_default();
    let manifest = crew.manifest().unwrap();
    assert!(manifest.required_env.contains("OPENAI_API_KEY"));

    let json = serde_json::to_value(&manifest).unwrap();
    assert_eq!(json["crew"]["tasks"].as_array().unwrap().len(), 4);
}
