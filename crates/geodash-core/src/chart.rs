//! Choropleth configuration
//!
//! [`ChartConfig::build`] is a pure function of the view state and the
//! current metrics. Each transition produces a complete configuration with
//! zoom and center reset, never a patch on the previous one.

use serde::Serialize;
use serde_json::{json, Value};

use crate::controller::ViewState;
use crate::loader::LoadRequest;
use crate::metrics::{MetricSample, VALUE_RANGE};
use crate::region::RegionRegistry;
use crate::timeline::date_label;

/// Title shown for the national map
pub const NATIONAL_TITLE: &str = "中国";

/// Fill for regions without a metric
pub const NO_DATA_COLOR: &str = "#eeeeee";

const SCALE_COLORS: [&str; 5] = ["#e0f3f8", "#abd9e9", "#74add1", "#4575b4", "#313695"];

/// One color band of the scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorPiece {
    pub min: f64,
    pub max: f64,
    pub color: &'static str,
    pub label: String,
}

/// Piecewise color scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualMap {
    pub min: f64,
    pub max: f64,
    pub pieces: Vec<ColorPiece>,
}

impl Default for VisualMap {
    fn default() -> Self {
        Self::stepped(*VALUE_RANGE.start(), *VALUE_RANGE.end())
    }
}

impl VisualMap {
    /// Five equal bands between `min` and `max`
    pub fn stepped(min: f64, max: f64) -> Self {
        let step = (max - min) / SCALE_COLORS.len() as f64;
        let pieces = SCALE_COLORS
            .into_iter()
            .enumerate()
            .map(|(i, color)| {
                let lo = min + step * i as f64;
                let hi = lo + step;
                ColorPiece {
                    min: lo,
                    max: hi,
                    color,
                    label: format!("{lo:.0} - {hi:.0}"),
                }
            })
            .collect();
        Self { min, max, pieces }
    }

    /// Color for a value, clamped to the scale ends
    pub fn color_for(&self, value: f64) -> &'static str {
        self.pieces
            .iter()
            .find(|p| value < p.max)
            .or(self.pieces.last())
            .map(|p| p.color)
            .unwrap_or(NO_DATA_COLOR)
    }
}

/// A region as drawn on the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionDatum {
    pub name: String,
    pub value: f64,
    pub growth_ratio: f64,
    pub color: &'static str,
    pub drillable: bool,
    pub tooltip: String,
}

/// Everything needed to draw the chart from scratch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub title: String,
    pub subtitle: String,
    pub map_id: String,
    pub zoom: f64,
    pub center: Option<[f64; 2]>,
    pub roam: bool,
    pub visual_map: VisualMap,
    pub data: Vec<RegionDatum>,
}

impl ChartConfig {
    pub fn build(state: &ViewState, metrics: &[MetricSample], registry: &RegionRegistry) -> Self {
        let visual_map = VisualMap::default();
        let data = metrics
            .iter()
            .map(|sample| RegionDatum {
                name: sample.name.clone(),
                value: sample.value,
                growth_ratio: sample.growth_ratio,
                color: visual_map.color_for(sample.value),
                drillable: registry.lookup(&sample.name).is_some(),
                tooltip: tooltip(sample),
            })
            .collect();

        let title = if state.is_national {
            NATIONAL_TITLE.to_string()
        } else {
            state.current_map_id.clone()
        };

        Self {
            title,
            subtitle: state.selected_date.map(date_label).unwrap_or_default(),
            map_id: state.current_map_id.clone(),
            zoom: 1.0,
            center: None,
            roam: true,
            visual_map,
            data,
        }
    }

    pub fn datum(&self, name: &str) -> Option<&RegionDatum> {
        self.data.iter().find(|d| d.name == name)
    }

    /// Fill color for a region, falling back to the no-data color
    pub fn color_of(&self, name: &str) -> &'static str {
        self.datum(name).map(|d| d.color).unwrap_or(NO_DATA_COLOR)
    }

    /// Equivalent ECharts option object
    pub fn to_option(&self) -> Value {
        let pieces: Vec<Value> = self
            .visual_map
            .pieces
            .iter()
            .map(|p| json!({ "min": p.min, "max": p.max, "color": p.color, "label": p.label }))
            .collect();
        let data: Vec<Value> = self
            .data
            .iter()
            .map(|d| json!({ "name": d.name, "value": d.value, "growth": d.growth_ratio }))
            .collect();

        json!({
            "title": { "text": self.title, "subtext": self.subtitle, "left": "center" },
            "tooltip": { "trigger": "item" },
            "visualMap": {
                "type": "piecewise",
                "min": self.visual_map.min,
                "max": self.visual_map.max,
                "pieces": pieces,
                "left": "left",
                "bottom": "bottom"
            },
            "series": [{
                "type": "map",
                "map": self.map_id,
                "roam": self.roam,
                "zoom": self.zoom,
                "center": self.center,
                "label": { "show": true, "fontSize": 10 },
                "data": data
            }]
        })
    }
}

fn tooltip(sample: &MetricSample) -> String {
    format!(
        "{}\nValue: {:.0}\nGrowth: {:+.1}%",
        sample.name,
        sample.value,
        sample.growth_ratio * 100.0
    )
}

/// Map a clicked region name to a drill-down request
///
/// Leaf regions and unknown names resolve to `None`.
pub fn resolve_click(registry: &RegionRegistry, name: &str) -> Option<LoadRequest> {
    registry
        .lookup(name)
        .map(|code| LoadRequest::new(code, name))
}
