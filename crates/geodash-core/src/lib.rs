//! # Geodash Core
//!
//! The drill-down map state machine behind the geodash dashboard.
//!
//! A session starts on the national map. Clicking a province resolves its
//! administrative code through the [`RegionRegistry`], the [`MapLoader`]
//! fetches (or reuses) its boundary geometry, and the
//! [`DashboardController`] regenerates per-region metrics and hands a
//! complete [`ChartConfig`] to whatever [`ChartSurface`] draws it.
//!
//! ## Key Traits
//!
//! - [`BoundarySource`]: where boundary geometry comes from (HTTP in production)
//! - [`MetricSource`]: per-region values (random mock data by default)
//! - [`ChartSurface`]: the rendering layer (register, render, resize, dispose)
//!
//! ## Key Types
//!
//! - [`ViewState`]: what the dashboard is currently showing
//! - [`LoadTicket`]: sequence-numbered load attempt; stale completions are dropped
//! - [`LoadFailure`]: the only error surfaced to the controller

pub mod cache;
pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod geometry;
pub mod loader;
pub mod metrics;
pub mod region;
pub mod surface;
pub mod timeline;

pub use cache::BoundaryCache;
pub use chart::{ChartConfig, ColorPiece, RegionDatum, VisualMap};
pub use config::DashboardConfig;
pub use controller::{DashboardController, Phase, ViewState};
pub use error::{ConfigError, FetchError, LoadFailure};
pub use fetch::{boundary_url, BoundarySource, HttpBoundarySource};
pub use geometry::{BoundaryGeometry, Bounds, Feature, Shape};
pub use loader::{LoadRequest, LoadTicket, LoadedMap, MapLoader};
pub use metrics::{MetricSample, MetricSource, MetricSummary, RandomMetrics};
pub use region::{Region, RegionRegistry};
pub use surface::ChartSurface;
pub use timeline::DateWindow;
