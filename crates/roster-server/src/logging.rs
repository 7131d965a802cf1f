//! Logging configuration and initialization.
//!
//! Presets pick a baseline per `roster::*` target, `--log` flags override
//! single targets, and `RUST_LOG` replaces everything when set.

use std::collections::BTreeMap;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Baseline verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Lifecycle events, uploads, connections
    #[default]
    Production,
    /// Adds every sync publish
    Verbose,
    Debug,
    Trace,
    /// Warnings and errors only
    Quiet,
}

impl LogPreset {
    /// Pick a preset from CLI switches. The quietest switch wins, then the
    /// most detailed one.
    pub fn from_flags(verbose: bool, debug: bool, trace: bool, quiet: bool) -> Self {
        match (quiet, trace, debug, verbose) {
            (true, ..) => LogPreset::Quiet,
            (_, true, ..) => LogPreset::Trace,
            (_, _, true, _) => LogPreset::Debug,
            (_, _, _, true) => LogPreset::Verbose,
            _ => LogPreset::Production,
        }
    }

    fn directives(self) -> &'static [&'static str] {
        match self {
            LogPreset::Production => &[
                "roster::startup=info",
                "roster::api=info",
                "roster::ws=info",
                "roster::session=info",
                "roster::classifier=info",
                "roster::display=info",
                "roster::sync=warn",
                "tower_http=warn",
            ],
            LogPreset::Verbose => &["roster=info", "roster::sync=debug", "tower_http=info"],
            LogPreset::Debug => &["roster=debug", "tower_http=debug"],
            LogPreset::Trace => &["roster=trace", "tower_http=trace"],
            LogPreset::Quiet => &["roster=warn", "tower_http=error"],
        }
    }
}

/// Logging configuration built from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub preset: LogPreset,
    /// Per-target levels, e.g. `roster::sync` -> DEBUG.
    pub overrides: BTreeMap<String, Level>,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn new(preset: LogPreset, format: LogFormat) -> Self {
        Self {
            preset,
            overrides: BTreeMap::new(),
            format,
        }
    }

    /// Add `target=level` overrides. Each entry may hold several
    /// comma-separated pairs; malformed pairs are ignored.
    pub fn with_overrides<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for spec in specs {
            for pair in spec.as_ref().split(',') {
                let Some((target, level)) = pair.split_once('=') else {
                    continue;
                };
                if let Ok(level) = level.trim().parse::<Level>() {
                    self.overrides.insert(qualify_target(target.trim()), level);
                }
            }
        }
        self
    }

    /// Build an EnvFilter from this configuration.
    pub fn build_filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }

        let mut directives: Vec<String> =
            self.preset.directives().iter().map(|d| d.to_string()).collect();
        directives.extend(
            self.overrides
                .iter()
                .map(|(target, level)| format!("{}={}", target, level.as_str().to_lowercase())),
        );

        EnvFilter::try_new(directives.join(",")).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Prefix bare target names with the crate-wide `roster::` namespace.
fn qualify_target(target: &str) -> String {
    if target.starts_with("roster") || target.starts_with("tower_http") {
        target.to_string()
    } else {
        format!("roster::{}", target)
    }
}

/// Install the global tracing subscriber.
pub fn init(config: &LogConfig) {
    let filter = config.build_filter();
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_span_events(FmtSpan::CLOSE))
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_priority() {
        assert_eq!(LogPreset::from_flags(true, true, true, true), LogPreset::Quiet);
        assert_eq!(LogPreset::from_flags(true, true, true, false), LogPreset::Trace);
        assert_eq!(LogPreset::from_flags(true, true, false, false), LogPreset::Debug);
        assert_eq!(LogPreset::from_flags(true, false, false, false), LogPreset::Verbose);
        assert_eq!(LogPreset::from_flags(false, false, false, false), LogPreset::Production);
    }

    #[test]
    fn test_overrides_are_qualified() {
        let config = LogConfig::default()
            .with_overrides(["sync=debug", "display=trace,session=INFO"]);

        assert_eq!(config.overrides.get("roster::sync"), Some(&Level::DEBUG));
        assert_eq!(config.overrides.get("roster::display"), Some(&Level::TRACE));
        assert_eq!(config.overrides.get("roster::session"), Some(&Level::INFO));
    }

    #[test]
    fn test_full_targets_pass_through_and_bad_levels_drop() {
        let config = LogConfig::default().with_overrides([
            "roster::classifier=debug",
            "tower_http=trace",
            "ws=loud",
            "no-equals-sign",
        ]);

        assert_eq!(config.overrides.get("roster::classifier"), Some(&Level::DEBUG));
        assert_eq!(config.overrides.get("tower_http"), Some(&Level::TRACE));
        assert_eq!(config.overrides.len(), 2);
    }
}
