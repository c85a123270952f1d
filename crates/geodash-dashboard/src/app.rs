use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::prelude::*;
use geodash_core::{DashboardController, LoadTicket, Phase, RandomMetrics};

use crate::components::*;
use crate::state::{SignalSurface, SESSION};
use crate::theme::ThemedRoot;

/// Root App component for the geodash dashboard
///
/// Owns the controller and the chart surface for the whole session:
/// - national map requested once on mount
/// - region clicks and "return to national" start loads
/// - date selection regenerates metrics without reloading
/// - the surface is disposed when the window closes
#[component]
pub fn App() -> Element {
    let Some(session) = SESSION.get() else {
        return rsx! {
            div { class: "overlay error-overlay", "Dashboard session was not initialized" }
        };
    };

    let surface = use_hook(SignalSurface::new);
    let mut controller = use_signal(|| {
        DashboardController::new(session.config.clone(), surface, Box::new(RandomMetrics::new()))
    });

    // Run a load in the background and hand the outcome back to the controller
    let run_load = use_callback(move |ticket: LoadTicket| {
        let loader = Arc::clone(&session.loader);
        spawn(async move {
            let result = loader.load(&ticket.request).await;
            controller.write().complete_load(&ticket, result);
        });
    });

    use_hook(move || {
        spawn(async move {
            let ticket = controller.write().start();
            run_load.call(ticket);
        });
    });

    use_drop(move || {
        if let Ok(mut controller) = controller.try_write() {
            controller.teardown();
        }
    });

    let on_region_click = move |name: String| {
        let ticket = controller.write().click_region(&name);
        if let Some(ticket) = ticket {
            run_load.call(ticket);
        }
    };

    let on_return = move |_: ()| {
        let ticket = controller.write().return_to_national();
        run_load.call(ticket);
    };

    let on_select_date = move |date: NaiveDate| {
        controller.write().select_date(date);
    };

    let on_resize = move |(width, height): (f64, f64)| {
        controller.write().resize(width, height);
    };

    let ctl = controller.read();
    let state = ctl.state();
    let phase = ctl.phase();
    let title = ctl
        .chart()
        .map(|c| c.title.clone())
        .unwrap_or_else(|| state.current_map_id.clone());
    let subtitle = ctl.chart().map(|c| c.subtitle.clone()).unwrap_or_default();
    let is_national = state.is_national;
    let dates = ctl.date_window().dates().to_vec();
    let selected = state.selected_date;
    let summary = ctl.summary();
    let scale = ctl
        .chart()
        .map(|c| c.visual_map.clone())
        .unwrap_or_default();
    drop(ctl);

    rsx! {
        ThemedRoot {
            div {
                class: "app",
                Header {
                    title,
                    subtitle,
                    is_national,
                    on_return,
                }

                div {
                    class: "main-content",
                    div {
                        class: "map-panel",
                        ChoroplethMap {
                            surface,
                            on_region_click,
                            on_resize,
                        }
                        Legend { scale }

                        match phase {
                            Phase::Loading => rsx! { LoadingOverlay {} },
                            Phase::Error(message) => rsx! {
                                ErrorBanner { message, on_return }
                            },
                            Phase::Ready => rsx! {},
                        }
                    }

                    div {
                        class: "side-panel",
                        SummaryPanel { summary }
                    }
                }

                DateSelector {
                    dates,
                    selected,
                    on_select: on_select_date,
                }
            }
        }
    }
}
