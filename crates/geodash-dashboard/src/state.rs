//! Dashboard session state backed by Dioxus signals

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use dioxus::prelude::*;
use geodash_core::{
    BoundaryGeometry, ChartConfig, ChartSurface, DashboardConfig, HttpBoundarySource, MapLoader,
};

/// Default chart viewport before the first resize event
pub const DEFAULT_VIEWPORT: (f64, f64) = (960.0, 640.0);

/// Process-wide session pieces built in `main` before launch
pub struct Session {
    pub config: DashboardConfig,
    pub loader: Arc<MapLoader<HttpBoundarySource>>,
}

pub static SESSION: OnceLock<Session> = OnceLock::new();

/// Rendering surface whose state lives in signals read by the SVG chart
///
/// `render` swaps the whole configuration; the chart component redraws from
/// scratch whenever it changes.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalSurface {
    pub maps: Signal<HashMap<String, Arc<BoundaryGeometry>>>,
    pub config: Signal<Option<ChartConfig>>,
    pub viewport: Signal<(f64, f64)>,
    pub disposed: Signal<bool>,
}

impl SignalSurface {
    /// Create the surface; must be called from a component
    pub fn new() -> Self {
        Self {
            maps: Signal::new(HashMap::new()),
            config: Signal::new(None),
            viewport: Signal::new(DEFAULT_VIEWPORT),
            disposed: Signal::new(false),
        }
    }

    /// Geometry registered for the map the current configuration shows
    ///
    /// Always `None` once the surface has been disposed.
    pub fn current_geometry(&self) -> Option<Arc<BoundaryGeometry>> {
        if *self.disposed.read() {
            return None;
        }
        let config = self.config.read();
        let map_id = &(*config).as_ref()?.map_id;
        self.maps.read().get(map_id).cloned()
    }
}

impl ChartSurface for SignalSurface {
    fn register_map(&mut self, map_id: &str, geometry: Arc<BoundaryGeometry>) {
        self.maps.write().insert(map_id.to_string(), geometry);
    }

    fn render(&mut self, config: &ChartConfig) {
        self.config.set(Some(config.clone()));
    }

    fn resize(&mut self, width: f64, height: f64) {
        if *self.viewport.peek() != (width, height) {
            self.viewport.set((width, height));
        }
    }

    fn dispose(&mut self) {
        tracing::debug!("Disposing chart surface");
        if let Ok(mut disposed) = self.disposed.try_write() {
            *disposed = true;
        }
        if let Ok(mut maps) = self.maps.try_write() {
            maps.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodash_core::geometry::{Feature, Shape};
    use geodash_core::{RegionRegistry, ViewState};

    fn chart_for(map_id: &str) -> ChartConfig {
        let state = ViewState {
            current_map_id: map_id.to_string(),
            current_code: 100000,
            is_national: true,
            visible_region_names: vec![],
            selected_date: None,
            is_loading: false,
            error_message: None,
        };
        ChartConfig::build(&state, &[], &RegionRegistry::default())
    }

    fn dispose_cycle() -> Element {
        let mut surface = use_hook(SignalSurface::new);
        let geometry = BoundaryGeometry::new(vec![Feature::new("广东省", Shape::Other)]);

        surface.register_map("china", Arc::new(geometry));
        surface.render(&chart_for("china"));
        assert!(surface.current_geometry().is_some());

        surface.dispose();
        assert!(surface.current_geometry().is_none());
        assert!(*surface.disposed.peek());

        rsx! {}
    }

    #[test]
    fn test_disposed_surface_has_nothing_to_draw() {
        let mut dom = VirtualDom::new(dispose_cycle);
        dom.rebuild_in_place();
    }
}
