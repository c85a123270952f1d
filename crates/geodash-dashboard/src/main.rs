use std::sync::Arc;

use dioxus::prelude::*;
use geodash_core::{DashboardConfig, HttpBoundarySource, MapLoader};
use geodash_logging::{GeodashSubscriberBuilder, LogConfig};

mod app;
mod components;
mod layout;
mod state;
pub mod theme;

use state::{Session, SESSION};

/// Component CSS (loaded from assets/style.css at compile time)
const STYLE_CSS: &str = include_str!("../assets/style.css");

fn main() {
    let _log_guard = GeodashSubscriberBuilder::new()
        .with_config(LogConfig::development())
        .init();

    let config = DashboardConfig::default();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid dashboard configuration");
        std::process::exit(1);
    }

    let source = match HttpBoundarySource::from_config(&config) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };
    tracing::info!(base_url = %config.base_url, "Starting geodash dashboard");

    let loader = Arc::new(MapLoader::new(source));
    if SESSION.set(Session { config, loader }).is_err() {
        tracing::error!("Dashboard session initialized twice");
        std::process::exit(1);
    }

    LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title("Geodash")
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1280.0, 820.0))
                        .with_resizable(true),
                )
                .with_custom_head(format!(r#"<style>{}</style>"#, STYLE_CSS)),
        )
        .launch(app::App);
}
