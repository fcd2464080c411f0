//! Logger setup.

use log::LevelFilter;

use crate::config::LogConfig;

/// Picks the log level: a valid `RUST_LOG` wins over the config, and an
/// unparsable config value falls back to `info`.
pub fn resolve_level(config: &LogConfig, env: Option<&str>) -> LevelFilter {
    env.and_then(|v| v.trim().parse().ok())
        .or_else(|| config.level.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global `fern` logger writing to stdout.
///
/// Only the first call installs anything; later calls are ignored.
pub fn init(config: &LogConfig) {
    let env = std::env::var("RUST_LOG").ok();
    let level = resolve_level(config, env.as_deref());

    let installed = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // winit is chatty at debug
        .level_for("winit", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply();

    match installed {
        Ok(()) => log::debug!("logger installed at {level}"),
        Err(_) => log::debug!("logger already installed, keeping it"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(level: &str) -> LogConfig {
        LogConfig { level: level.to_string() }
    }

    #[test]
    fn env_overrides_config() {
        assert_eq!(resolve_level(&cfg("warn"), Some("trace")), LevelFilter::Trace);
    }

    #[test]
    fn bad_env_falls_back_to_config() {
        assert_eq!(resolve_level(&cfg("debug"), Some("loud")), LevelFilter::Debug);
        assert_eq!(resolve_level(&cfg("debug"), None), LevelFilter::Debug);
    }

    #[test]
    fn bad_config_falls_back_to_info() {
        assert_eq!(resolve_level(&cfg("verbose"), None), LevelFilter::Info);
    }

    #[test]
    fn second_init_is_harmless() {
        init(&cfg("off"));
        init(&cfg("off"));
    }
}
