use chrono::NaiveDate;
use dioxus::prelude::*;
use geodash_core::chart::VisualMap;
use geodash_core::timeline::date_label;
use geodash_core::MetricSummary;

use crate::theme::ThemeSwitcher;

pub mod choropleth;

pub use choropleth::ChoroplethMap;

/// Header with the current map title and the way back to the national map
#[component]
pub fn Header(title: String, subtitle: String, is_national: bool, on_return: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "header",
            div { class: "breadcrumb",
                if is_national {
                    h1 { "{title}" }
                } else {
                    button {
                        class: "link-btn",
                        onclick: move |_| on_return.call(()),
                        "中国"
                    }
                    span { class: "breadcrumb-sep", "/" }
                    h1 { "{title}" }
                }
                if !subtitle.is_empty() {
                    span { class: "subtitle", "{subtitle}" }
                }
            }
            div { class: "header-actions",
                button {
                    class: "return-btn",
                    disabled: is_national,
                    onclick: move |_| on_return.call(()),
                    "Return to national"
                }
                ThemeSwitcher {}
            }
        }
    }
}

/// Seven-day date selector
#[component]
pub fn DateSelector(dates: Vec<NaiveDate>, selected: Option<NaiveDate>, on_select: EventHandler<NaiveDate>) -> Element {
    rsx! {
        div { class: "timeline",
            for date in dates {
                button {
                    key: "{date}",
                    class: if Some(date) == selected { "timeline-btn active" } else { "timeline-btn" },
                    onclick: move |_| on_select.call(date),
                    "{date_label(date)}"
                }
            }
        }
    }
}

/// Color scale legend
#[component]
pub fn Legend(scale: VisualMap) -> Element {
    rsx! {
        div { class: "legend",
            for piece in scale.pieces.iter().rev() {
                div { class: "legend-row",
                    span { class: "legend-swatch", style: "background: {piece.color};" }
                    span { class: "legend-label", "{piece.label}" }
                }
            }
        }
    }
}

/// Aggregates for the visible regions
#[component]
pub fn SummaryPanel(summary: Option<MetricSummary>) -> Element {
    let Some(summary) = summary else {
        return rsx! {
            div { class: "summary-panel empty", "No data" }
        };
    };

    rsx! {
        div { class: "summary-panel",
            h3 { "Overview" }
            div { class: "metric-row",
                span { class: "metric-label", "Regions" }
                span { class: "metric-value", "{summary.regions}" }
            }
            div { class: "metric-row",
                span { class: "metric-label", "Total" }
                span { class: "metric-value", "{summary.total:.0}" }
            }
            div { class: "metric-row",
                span { class: "metric-label", "Mean" }
                span { class: "metric-value", "{summary.mean:.0}" }
            }
            div { class: "metric-row",
                span { class: "metric-label", "Highest" }
                span { class: "metric-value", "{summary.max_region} ({summary.max_value:.0})" }
            }
            div { class: "metric-row",
                span { class: "metric-label", "Growing" }
                span { class: "metric-value", "{summary.growing} / {summary.regions}" }
            }
        }
    }
}

#[component]
pub fn LoadingOverlay() -> Element {
    rsx! {
        div { class: "overlay loading-overlay",
            div { class: "spinner" }
            span { "Loading map…" }
        }
    }
}

/// Full-screen banner shown after a failed load
#[component]
pub fn ErrorBanner(message: String, on_return: EventHandler<()>) -> Element {
    rsx! {
        div { class: "overlay error-overlay",
            div { class: "error-card",
                h2 { "Map unavailable" }
                p { "{message}" }
                button {
                    class: "return-btn",
                    onclick: move |_| on_return.call(()),
                    "Return to national"
                }
            }
        }
    }
}
