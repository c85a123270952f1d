//! Logging setup for geodash
//!
//! Console output (pretty, compact or JSONL) and optional daily JSONL files.
//! The filter comes from the active [`LogConfig`] preset unless `RUST_LOG`
//! is set.
//!
//! ```ignore
//! use geodash_logging::{GeodashSubscriberBuilder, LogConfig};
//!
//! let _guard = GeodashSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .init();
//! ```

pub mod config;

pub use config::{ConsoleFormat, LOADER_TARGET, LogConfig};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const LOG_FILE_NAME: &str = "geodash.jsonl";

/// Builder for configuring and initializing the global subscriber
#[derive(Debug, Default)]
pub struct GeodashSubscriberBuilder {
    config: LogConfig,
}

impl GeodashSubscriberBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the base level, keeping per-target directives
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    /// Append a per-target directive such as `geodash_core::chart=trace`
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.config.directives.push(directive.into());
        self
    }

    pub fn with_console(mut self, format: Option<ConsoleFormat>) -> Self {
        self.config.console = format;
        self
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Filter the subscriber will use: `RUST_LOG` if set, else the config's
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.config.filter_spec()))
            .unwrap_or_else(|e| {
                eprintln!("Warning: invalid log filter {:?}: {}", self.config.filter_spec(), e);
                EnvFilter::new("info")
            })
    }

    /// Install the subscriber globally
    ///
    /// The returned guard flushes file output when dropped and must live as
    /// long as the program. If a global subscriber is already installed a
    /// warning is printed and the existing one stays in place.
    pub fn init(self) -> Option<WorkerGuard> {
        let env_filter = self.env_filter();
        let mut layers: Vec<BoxedLayer> = Vec::new();
        let mut guard = None;

        if let Some(format) = self.config.console {
            layers.push(console_layer(format));
        }

        if let Some(dir) = &self.config.log_dir {
            let (writer, file_guard) =
                tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE_NAME));
            guard = Some(file_guard);
            layers.push(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_writer(writer)
                    .boxed(),
            );
        }

        if let Err(e) = Registry::default().with(layers).with(env_filter).try_init() {
            eprintln!("Warning: logging already initialized: {}", e);
        }
        guard
    }
}

fn console_layer(format: ConsoleFormat) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    match format {
        ConsoleFormat::Pretty => layer.pretty().with_ansi(true).boxed(),
        ConsoleFormat::Compact => layer.compact().with_ansi(false).with_target(true).boxed(),
        ConsoleFormat::Json => layer.json().with_current_span(true).flatten_event(true).boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let builder = GeodashSubscriberBuilder::new()
            .with_config(LogConfig::testing())
            .with_level("info")
            .with_directive("geodash_core::chart=trace")
            .with_console(None);

        let config = builder.config();
        assert_eq!(config.filter_spec(), "info,geodash_core::chart=trace");
        assert!(config.console.is_none());
    }

    #[test]
    fn test_preset_filters_parse() {
        for config in [
            LogConfig::default(),
            LogConfig::development(),
            LogConfig::testing(),
        ] {
            assert!(EnvFilter::try_new(config.filter_spec()).is_ok(), "{}", config.filter_spec());
        }
    }

    #[test]
    fn test_init_console_only_has_no_guard() {
        let guard = GeodashSubscriberBuilder::new()
            .with_config(LogConfig::testing())
            .init();
        assert!(guard.is_none());
        tracing::warn!(target: LOADER_TARGET, "logging initialized for test");
    }
}
