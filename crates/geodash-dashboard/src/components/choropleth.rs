//! SVG choropleth for the current map
//!
//! Renders straight from the [`SignalSurface`]: the registered geometry for
//! the configured map id is projected into the current viewport and every
//! region is filled from the configuration's color scale. A new
//! configuration always produces a fresh fit, so nothing from the previous
//! map's viewport carries over.

use dioxus::prelude::*;
use geodash_core::chart::NO_DATA_COLOR;

use crate::layout::region_paths;
use crate::state::SignalSurface;

#[component]
pub fn ChoroplethMap(
    surface: SignalSurface,
    on_region_click: EventHandler<String>,
    on_resize: EventHandler<(f64, f64)>,
) -> Element {
    let mut hovered = use_signal(|| None::<String>);

    let paths = use_memo(move || {
        let (w, h) = *surface.viewport.read();
        surface
            .current_geometry()
            .map(|g| region_paths(&g, w, h))
            .unwrap_or_default()
    });

    if *surface.disposed.read() {
        return rsx! {};
    }

    let (width, height) = *surface.viewport.read();
    let config = surface.config.read().clone();
    let geometry = surface.current_geometry();

    let tooltip = hovered()
        .as_deref()
        .and_then(|name| config.as_ref()?.datum(name))
        .map(|d| d.tooltip.clone());

    rsx! {
        div {
            class: "chart-container choropleth",
            onresize: move |evt| {
                if let Ok(size) = evt.data().get_content_box_size() {
                    on_resize.call((size.width, size.height));
                }
            },

            if geometry.is_none() {
                div { class: "chart-empty", "No map loaded" }
            }

            svg {
                width: "100%",
                height: "100%",
                view_box: "0 0 {width} {height}",
                preserve_aspect_ratio: "xMidYMid meet",

                for region in paths() {
                    {
                        let fill = match (&config, &region.name) {
                            (Some(c), Some(name)) => c.color_of(name),
                            _ => NO_DATA_COLOR,
                        };
                        let drillable = region
                            .name
                            .as_deref()
                            .and_then(|name| config.as_ref()?.datum(name))
                            .map(|d| d.drillable)
                            .unwrap_or(false);
                        let class = if drillable { "region drillable" } else { "region" };
                        let click_name = region.name.clone();
                        let hover_name = region.name.clone();
                        rsx! {
                            path {
                                key: "{region.key}",
                                class: "{class}",
                                d: "{region.d}",
                                fill: "{fill}",
                                fill_rule: "evenodd",
                                stroke: "var(--region-stroke)",
                                stroke_width: "0.8",
                                onclick: move |_| {
                                    if let Some(name) = &click_name {
                                        on_region_click.call(name.clone());
                                    }
                                },
                                onmouseenter: move |_| hovered.set(hover_name.clone()),
                                onmouseleave: move |_| hovered.set(None),
                            }
                        }
                    }
                }
            }

            if let Some(text) = tooltip {
                div { class: "chart-tooltip",
                    for line in text.lines() {
                        div { "{line}" }
                    }
                }
            }
        }
    }
}
