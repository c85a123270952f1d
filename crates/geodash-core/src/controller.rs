//! Dashboard state machine
//!
//! ```text
//!            start / click(province) / return_to_national
//!   Ready ─────────────────────────────────────────────▶ Loading
//!   Error ─────────────────────────────────────────────▶ Loading
//!   Loading ── success ──▶ Ready
//!   Loading ── failure ──▶ Error
//!   Ready ── select_date ──▶ Ready (metrics regenerated, no reload)
//! ```
//!
//! Loads are split in two: [`DashboardController::begin_load`] hands out a
//! [`LoadTicket`], the caller runs the fetch, and
//! [`DashboardController::complete_load`] applies the outcome. Only the
//! most recently issued ticket is applied, so a slow response for a map the
//! user has already navigated away from is dropped instead of overwriting
//! newer state.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chart::{resolve_click, ChartConfig};
use crate::config::DashboardConfig;
use crate::error::LoadFailure;
use crate::fetch::BoundarySource;
use crate::loader::{LoadRequest, LoadTicket, LoadedMap, MapLoader};
use crate::metrics::{MetricSample, MetricSource, MetricSummary};
use crate::region::RegionRegistry;
use crate::surface::ChartSurface;
use crate::timeline::DateWindow;

/// Coarse controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Error(String),
}

/// What the dashboard currently shows
///
/// `current_map_id`, `current_code` and `visible_region_names` always
/// describe the last map that loaded successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub current_map_id: String,
    pub current_code: u32,
    pub is_national: bool,
    pub visible_region_names: Vec<String>,
    pub selected_date: Option<NaiveDate>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if let Some(message) = &self.error_message {
            Phase::Error(message.clone())
        } else {
            Phase::Ready
        }
    }
}

pub struct DashboardController<C> {
    config: DashboardConfig,
    registry: RegionRegistry,
    metrics: Box<dyn MetricSource>,
    surface: C,
    window: DateWindow,
    state: ViewState,
    samples: Vec<MetricSample>,
    chart: Option<ChartConfig>,
    next_seq: u64,
    pending: Option<LoadTicket>,
    generations: u64,
    disposed: bool,
}

impl<C: ChartSurface> DashboardController<C> {
    /// New controller in the `Loading` state for the national map
    pub fn new(config: DashboardConfig, surface: C, metrics: Box<dyn MetricSource>) -> Self {
        let window = DateWindow::ending_today(config.timeline_days);
        let state = ViewState {
            current_map_id: config.national_map_id.clone(),
            current_code: config.national_code,
            is_national: true,
            visible_region_names: Vec::new(),
            selected_date: window.latest(),
            is_loading: true,
            error_message: None,
        };

        Self {
            config,
            registry: RegionRegistry::default(),
            metrics,
            surface,
            window,
            state,
            samples: Vec::new(),
            chart: None,
            next_seq: 0,
            pending: None,
            generations: 0,
            disposed: false,
        }
    }

    /// Replace the date window (selection moves to its latest date)
    pub fn with_date_window(mut self, window: DateWindow) -> Self {
        self.state.selected_date = window.latest();
        self.window = window;
        self
    }

    /// Request the national map at session start
    pub fn start(&mut self) -> LoadTicket {
        self.national()
    }

    /// Handle a click on a rendered region
    ///
    /// Returns `None` and leaves all state untouched when the region cannot
    /// be drilled into.
    pub fn click_region(&mut self, name: &str) -> Option<LoadTicket> {
        match resolve_click(&self.registry, name) {
            Some(request) => Some(self.begin_load(request)),
            None => {
                debug!(region = name, "Region has no drill-down");
                None
            }
        }
    }

    pub fn return_to_national(&mut self) -> LoadTicket {
        self.national()
    }

    fn national(&mut self) -> LoadTicket {
        let request = LoadRequest::new(self.config.national_code, self.config.national_map_id.clone());
        self.begin_load(request)
    }

    /// Enter `Loading` for a request, superseding any load in flight
    pub fn begin_load(&mut self, request: LoadRequest) -> LoadTicket {
        self.next_seq += 1;
        let ticket = LoadTicket {
            seq: self.next_seq,
            request,
        };
        if let Some(previous) = &self.pending {
            debug!(superseded = %previous.request.map_id, "Load superseded");
        }
        info!(map_id = %ticket.request.map_id, code = ticket.request.code, seq = ticket.seq, "Loading map");

        self.state.is_loading = true;
        self.state.error_message = None;
        self.pending = Some(ticket.clone());
        ticket
    }

    /// Apply the outcome of a load
    ///
    /// Returns `false` when the ticket is stale or the controller has been
    /// torn down; the outcome is then discarded.
    pub fn complete_load(&mut self, ticket: &LoadTicket, result: Result<LoadedMap, LoadFailure>) -> bool {
        if self.disposed {
            return false;
        }
        if self.pending.as_ref().map(|p| p.seq) != Some(ticket.seq) {
            debug!(map_id = %ticket.request.map_id, seq = ticket.seq, "Discarding stale load");
            return false;
        }
        self.pending = None;
        self.state.is_loading = false;

        match result {
            Ok(map) => {
                self.surface.register_map(&map.map_id, map.geometry.clone());
                self.state.is_national = map.code == self.config.national_code;
                self.state.current_map_id = map.map_id;
                self.state.current_code = map.code;
                self.state.visible_region_names = map.region_names;
                self.refresh();
            }
            Err(failure) => {
                warn!(map_id = %failure.map_id, "{failure}");
                self.state.error_message = Some(failure.to_string());
            }
        }
        true
    }

    /// Run a ticket's load against a loader and apply the result
    pub async fn drive<S: BoundarySource>(&mut self, loader: &MapLoader<S>, ticket: LoadTicket) -> bool {
        let result = loader.load(&ticket.request).await;
        self.complete_load(&ticket, result)
    }

    /// Change the selected date
    ///
    /// Returns `true` if the selection changed. Metrics are regenerated only
    /// while `Ready`; re-selecting the current date does nothing.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if !self.window.contains(date) {
            warn!(%date, "Date outside the selectable window");
            return false;
        }
        if self.state.selected_date == Some(date) {
            return false;
        }

        self.state.selected_date = Some(date);
        if self.state.phase() == Phase::Ready {
            self.refresh();
        }
        true
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width, height);
    }

    /// Release the rendering surface; later calls are no-ops
    pub fn teardown(&mut self) {
        if !self.disposed {
            self.surface.dispose();
            self.disposed = true;
        }
    }

    fn refresh(&mut self) {
        self.samples = self.metrics.generate(&self.state.visible_region_names);
        self.generations += 1;

        let chart = ChartConfig::build(&self.state, &self.samples, &self.registry);
        self.surface.render(&chart);
        self.chart = Some(chart);
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    pub fn summary(&self) -> Option<MetricSummary> {
        MetricSummary::from_samples(&self.samples)
    }

    pub fn chart(&self) -> Option<&ChartConfig> {
        self.chart.as_ref()
    }

    pub fn date_window(&self) -> &DateWindow {
        &self.window
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn pending(&self) -> Option<&LoadTicket> {
        self.pending.as_ref()
    }

    /// How many times metrics have been generated
    pub fn metric_generations(&self) -> u64 {
        self.generations
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundaryGeometry, Feature, Shape};
    use crate::metrics::RandomMetrics;
    use crate::surface::RecordingSurface;
    use std::sync::Arc;

    fn controller() -> DashboardController<RecordingSurface> {
        let window = DateWindow::ending(NaiveDate::from_ymd_opt(2024, 5, 7).unwrap(), 7);
        DashboardController::new(
            DashboardConfig::default(),
            RecordingSurface::new(),
            Box::new(RandomMetrics::seeded(1)),
        )
        .with_date_window(window)
    }

    fn loaded(map_id: &str, code: u32, names: &[&str]) -> Result<LoadedMap, LoadFailure> {
        let geometry = BoundaryGeometry::new(
            names.iter().map(|n| Feature::new(*n, Shape::Other)).collect(),
        );
        Ok(LoadedMap {
            map_id: map_id.to_string(),
            code,
            region_names: geometry.region_names(),
            geometry: Arc::new(geometry),
            from_cache: false,
        })
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_initial_state_is_national_loading() {
        let c = controller();
        assert_eq!(c.phase(), Phase::Loading);
        assert_eq!(c.state().current_code, 100000);
        assert_eq!(c.state().current_map_id, "china");
        assert_eq!(c.state().selected_date, Some(day(7)));
    }

    #[test]
    fn test_success_registers_renders_and_clears_loading() {
        let mut c = controller();
        let ticket = c.start();
        assert!(c.complete_load(&ticket, loaded("china", 100000, &["广东省", "湖南省"])));

        assert_eq!(c.phase(), Phase::Ready);
        assert_eq!(c.state().visible_region_names, vec!["广东省", "湖南省"]);
        assert_eq!(c.samples().len(), 2);
        assert!(c.surface().registered.contains_key("china"));
        assert_eq!(c.surface().renders.len(), 1);
        assert_eq!(c.metric_generations(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_map() {
        let mut c = controller();
        let ticket = c.start();
        c.complete_load(&ticket, loaded("china", 100000, &["广东省"]));

        let ticket = c.click_region("广东省").unwrap();
        assert_eq!(ticket.request, LoadRequest::new(440000, "广东省"));
        c.complete_load(&ticket, Err(LoadFailure::new("广东省", "unexpected HTTP status 500")));

        assert!(!c.state().is_loading);
        assert!(matches!(c.phase(), Phase::Error(m) if m.starts_with("Unable to load map for 广东省")));
        assert_eq!(c.state().current_map_id, "china");
        assert_eq!(c.surface().renders.len(), 1);
        assert_eq!(c.chart().unwrap().map_id, "china");
    }

    #[test]
    fn test_new_attempt_clears_error() {
        let mut c = controller();
        let ticket = c.start();
        c.complete_load(&ticket, Err(LoadFailure::new("china", "boom")));
        assert!(c.state().error_message.is_some());

        c.return_to_national();
        assert_eq!(c.phase(), Phase::Loading);
        assert!(c.state().error_message.is_none());
    }

    #[test]
    fn test_leaf_click_is_noop() {
        let mut c = controller();
        let ticket = c.start();
        c.complete_load(&ticket, loaded("china", 100000, &["广东省"]));
        let before = c.state().clone();

        assert!(c.click_region("广州市").is_none());
        assert_eq!(c.state(), &before);
        assert!(c.pending().is_none());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut c = controller();
        let first = c.start();
        c.complete_load(&first, loaded("china", 100000, &["广东省", "湖南省"]));

        let slow = c.click_region("广东省").unwrap();
        let fast = c.click_region("湖南省").unwrap();

        assert!(c.complete_load(&fast, loaded("湖南省", 430000, &["长沙市"])));
        assert!(!c.complete_load(&slow, loaded("广东省", 440000, &["广州市"])));
        assert_eq!(c.state().current_map_id, "湖南省");
        assert_eq!(c.state().visible_region_names, vec!["长沙市"]);
    }

    #[test]
    fn test_loading_stays_until_latest_settles() {
        let mut c = controller();
        let first = c.start();
        let second = c.return_to_national();

        assert!(!c.complete_load(&first, loaded("china", 100000, &["广东省"])));
        assert!(c.state().is_loading);
        assert!(c.complete_load(&second, loaded("china", 100000, &["广东省"])));
        assert!(!c.state().is_loading);
    }

    #[test]
    fn test_select_date_regenerates_once() {
        let mut c = controller();
        let ticket = c.start();
        c.complete_load(&ticket, loaded("china", 100000, &["广东省"]));
        assert_eq!(c.metric_generations(), 1);

        assert!(c.select_date(day(3)));
        assert_eq!(c.metric_generations(), 2);
        assert!(!c.select_date(day(3)));
        assert_eq!(c.metric_generations(), 2);
        assert_eq!(c.surface().renders.len(), 2);
        assert_eq!(c.chart().unwrap().subtitle, "2024-05-03");
        assert_eq!(c.phase(), Phase::Ready);
    }

    #[test]
    fn test_select_date_outside_window() {
        let mut c = controller();
        assert!(!c.select_date(day(20)));
        assert_eq!(c.state().selected_date, Some(day(7)));
    }

    #[test]
    fn test_select_date_while_loading_does_not_render() {
        let mut c = controller();
        c.start();
        assert!(c.select_date(day(2)));
        assert_eq!(c.metric_generations(), 0);
        assert!(c.surface().renders.is_empty());
    }

    #[test]
    fn test_national_title_and_drilldown_title() {
        let mut c = controller();
        let ticket = c.start();
        c.complete_load(&ticket, loaded("china", 100000, &["广东省"]));
        assert_eq!(c.chart().unwrap().title, "中国");

        let ticket = c.click_region("广东省").unwrap();
        c.complete_load(&ticket, loaded("广东省", 440000, &["广州市"]));
        assert_eq!(c.chart().unwrap().title, "广东省");
        assert!(!c.state().is_national);
    }

    #[test]
    fn test_teardown_disposes_once() {
        let mut c = controller();
        let ticket = c.start();
        c.teardown();
        c.teardown();
        assert_eq!(c.surface().dispose_count, 1);
        assert!(!c.complete_load(&ticket, loaded("china", 100000, &["广东省"])));
    }

    #[test]
    fn test_resize_forwards_to_surface() {
        let mut c = controller();
        c.resize(800.0, 600.0);
        assert_eq!(c.surface().size, Some((800.0, 600.0)));
    }
}
