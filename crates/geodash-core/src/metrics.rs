//! Per-region metric values
//!
//! The dashboard shows mock data: every time the visible region set or the
//! selected date changes, a fresh random sample is drawn for each region.
//! A real data feed plugs in behind [`MetricSource`].

use std::ops::RangeInclusive;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Range every generated value falls in
pub const VALUE_RANGE: RangeInclusive<f64> = 1000.0..=10000.0;

/// Range every generated growth ratio falls in
pub const GROWTH_RANGE: RangeInclusive<f64> = -0.2..=0.2;

/// One region's metric for the selected date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: String,
    pub value: f64,
    pub growth_ratio: f64,
}

/// Strategy producing metric samples for a list of regions
///
/// Implementations return exactly one sample per name, in input order.
pub trait MetricSource: Send + Sync {
    fn generate(&self, region_names: &[String]) -> Vec<MetricSample>;
}

/// Uniformly random mock metrics
pub struct RandomMetrics {
    rng: Mutex<StdRng>,
}

impl Default for RandomMetrics {
    fn default() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl RandomMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible sequence, for tests and demos
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl MetricSource for RandomMetrics {
    fn generate(&self, region_names: &[String]) -> Vec<MetricSample> {
        let mut rng = self.rng.lock();
        region_names
            .iter()
            .map(|name| MetricSample {
                name: name.clone(),
                value: rng.random_range(VALUE_RANGE).round(),
                growth_ratio: rng.random_range(GROWTH_RANGE),
            })
            .collect()
    }
}

/// Aggregate view of the visible metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub regions: usize,
    pub total: f64,
    pub mean: f64,
    pub max_region: String,
    pub max_value: f64,
    pub growing: usize,
}

impl MetricSummary {
    /// `None` for an empty sample set
    pub fn from_samples(samples: &[MetricSample]) -> Option<Self> {
        let max = samples
            .iter()
            .max_by(|a, b| a.value.total_cmp(&b.value))?;
        let total: f64 = samples.iter().map(|s| s.value).sum();

        Some(Self {
            regions: samples.len(),
            total,
            mean: total / samples.len() as f64,
            max_region: max.name.clone(),
            max_value: max.value,
            growing: samples.iter().filter(|s| s.growth_ratio > 0.0).count(),
        })
    }
}
