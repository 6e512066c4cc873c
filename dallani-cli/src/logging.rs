//! Tracing subscriber setup. Logs go to stderr so `--json` output stays clean.

use shared::config::{ClientConfig, LogFormat};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &ClientConfig) {
    let fmt_builder = fmt::fmt()
        .with_env_filter(build_env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    // A subscriber may already be installed; keep it.
    let _ = if matches!(config.log_format, LogFormat::Json) {
        fmt_builder.json().with_ansi(false).try_init()
    } else {
        fmt_builder.with_ansi(true).try_init()
    };
}

fn build_env_filter(config: &ClientConfig) -> EnvFilter {
    let default_level = config.log_level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    })
}
