//! Session-lifetime store of fetched boundary geometry
//!
//! Entries are keyed by map id (`"china"` or a province name) and are never
//! evicted or replaced once present. The set of maps is finite and small.

use std::collections::HashMap;
use std::sync::Arc;

use crate::geometry::BoundaryGeometry;

#[derive(Debug, Default)]
pub struct BoundaryCache {
    entries: HashMap<String, Arc<BoundaryGeometry>>,
}

impl BoundaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, map_id: &str) -> Option<Arc<BoundaryGeometry>> {
        self.entries.get(map_id).cloned()
    }

    /// Store geometry for a map id
    ///
    /// If the id is already cached the existing entry wins and is returned,
    /// so every caller observes the same immutable geometry.
    pub fn put(&mut self, map_id: impl Into<String>, geometry: BoundaryGeometry) -> Arc<BoundaryGeometry> {
        self.entries
            .entry(map_id.into())
            .or_insert_with(|| Arc::new(geometry))
            .clone()
    }

    pub fn contains(&self, map_id: &str) -> bool {
        self.entries.contains_key(map_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
