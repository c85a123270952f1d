//! Logging presets for the dashboard

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Target of the map loader's load spans and cache events
pub const LOADER_TARGET: &str = "geodash_core::loader";

/// Dependencies that log every request or window event at debug level
const CHATTY_DEPENDENCIES: [&str; 6] = ["hyper", "hyper_util", "reqwest", "rustls", "tao", "wry"];

/// How events are written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleFormat {
    /// Multi-line, colored
    Pretty,
    /// One line per event, no colors
    Compact,
    /// JSONL with the current span flattened in
    Json,
}

/// Filter and sinks for the global subscriber
///
/// The filter is `level` followed by the per-target `directives`, in
/// `EnvFilter` syntax. `RUST_LOG` replaces the whole filter when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub directives: Vec<String>,
    /// `None` turns console output off
    pub console: Option<ConsoleFormat>,
    /// Directory for daily-rotated `geodash.jsonl` files
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directives: quiet_dependencies(),
            console: Some(ConsoleFormat::Compact),
            log_dir: None,
        }
    }
}

impl LogConfig {
    /// Loader and controller traces on a pretty console
    pub fn development() -> Self {
        let mut directives = vec![
            format!("{LOADER_TARGET}=debug"),
            "geodash_core::controller=debug".to_string(),
            "geodash_dashboard=debug".to_string(),
        ];
        directives.extend(quiet_dependencies());
        Self {
            level: "info".to_string(),
            directives,
            console: Some(ConsoleFormat::Pretty),
            log_dir: None,
        }
    }

    /// JSONL files only
    pub fn production(log_dir: PathBuf) -> Self {
        Self {
            console: None,
            log_dir: Some(log_dir),
            ..Self::default()
        }
    }

    /// Warnings and load failures only
    pub fn testing() -> Self {
        Self {
            level: "warn".to_string(),
            directives: Vec::new(),
            console: Some(ConsoleFormat::Compact),
            log_dir: None,
        }
    }

    /// Filter string handed to `EnvFilter`, e.g. `info,geodash_core::loader=debug`
    pub fn filter_spec(&self) -> String {
        std::iter::once(self.level.as_str())
            .chain(self.directives.iter().map(String::as_str))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn quiet_dependencies() -> Vec<String> {
    CHATTY_DEPENDENCIES
        .into_iter()
        .map(|target| format!("{target}=warn"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_traces_the_loader() {
        let config = LogConfig::development();
        assert!(config.directives.contains(&"geodash_core::loader=debug".to_string()));
        assert!(config.directives.contains(&"reqwest=warn".to_string()));
        assert_eq!(config.console, Some(ConsoleFormat::Pretty));
    }

    #[test]
    fn test_filter_spec_starts_with_level() {
        let config = LogConfig {
            level: "info".to_string(),
            directives: vec!["geodash_core::loader=debug".to_string(), "wry=warn".to_string()],
            console: None,
            log_dir: None,
        };
        assert_eq!(config.filter_spec(), "info,geodash_core::loader=debug,wry=warn");
    }

    #[test]
    fn test_filter_spec_skips_empty_level() {
        let config = LogConfig {
            level: String::new(),
            directives: vec!["tao=warn".to_string()],
            ..LogConfig::testing()
        };
        assert_eq!(config.filter_spec(), "tao=warn");
    }

    #[test]
    fn test_production_writes_files_only() {
        let config = LogConfig::production(PathBuf::from("/var/log/geodash"));
        assert!(config.console.is_none());
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/geodash")));
        assert!(config.filter_spec().starts_with("info,hyper=warn"));
    }

    #[test]
    fn test_testing_filter_is_bare_level() {
        assert_eq!(LogConfig::testing().filter_spec(), "warn");
    }
}
