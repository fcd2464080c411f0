//! Virtual museum walkthrough.
//!
//! Usage: `vitrine_museum [config.toml]` (defaults to `museum.toml`; a missing
//! file means built-in defaults).

use std::path::PathBuf;

use vitrine_app::{logging, App, AppConfig};
use vitrine_museum::Museum;

const DEFAULT_CONFIG: &str = "museum.toml";

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = AppConfig::load_or_default(&path)?;

    logging::init(&config.log);
    log::info!("config: {}", path.display());

    App::new(Museum::new(&config)).with_config(config).run()
}
