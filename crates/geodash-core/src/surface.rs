//! The rendering layer boundary
//!
//! The controller treats the chart as an opaque capability. A surface is
//! acquired once per session, receives any number of register/render
//! cycles, and is disposed exactly once on teardown.

use std::collections::HashMap;
use std::sync::Arc;

use crate::chart::ChartConfig;
use crate::geometry::BoundaryGeometry;

pub trait ChartSurface {
    /// Make geometry available under a map id before it is rendered
    fn register_map(&mut self, map_id: &str, geometry: Arc<BoundaryGeometry>);

    /// Replace the whole chart with a new configuration
    fn render(&mut self, config: &ChartConfig);

    /// Re-fit the chart to its container
    fn resize(&mut self, width: f64, height: f64);

    /// Release the chart and its listeners
    fn dispose(&mut self);
}

/// In-memory surface that records every call
///
/// Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub registered: HashMap<String, Arc<BoundaryGeometry>>,
    pub renders: Vec<ChartConfig>,
    pub size: Option<(f64, f64)>,
    pub dispose_count: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartSurface for RecordingSurface {
    fn register_map(&mut self, map_id: &str, geometry: Arc<BoundaryGeometry>) {
        self.registered.insert(map_id.to_string(), geometry);
    }

    fn render(&mut self, config: &ChartConfig) {
        self.renders.push(config.clone());
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.size = Some((width, height));
    }

    fn dispose(&mut self) {
        self.dispose_count += 1;
    }
}
