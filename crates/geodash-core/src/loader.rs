//! Cache-first loading of boundary geometry
//!
//! The loader owns the [`BoundaryCache`]. A load for a cached map id never
//! touches the [`BoundarySource`]; a miss issues exactly one fetch and
//! stores the parsed result. Every failure is turned into a
//! [`LoadFailure`] naming the map id.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::cache::BoundaryCache;
use crate::error::LoadFailure;
use crate::fetch::BoundarySource;
use crate::geometry::BoundaryGeometry;

/// What to load: an administrative code and the map id to register it under
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LoadRequest {
    pub code: u32,
    pub map_id: String,
}

impl LoadRequest {
    pub fn new(code: u32, map_id: impl Into<String>) -> Self {
        Self {
            code,
            map_id: map_id.into(),
        }
    }
}

/// A load attempt issued by the controller
///
/// Sequence numbers increase with every attempt; only the completion for the
/// most recent ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub request: LoadRequest,
}

/// Result of a successful load
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub map_id: String,
    pub code: u32,
    pub geometry: Arc<BoundaryGeometry>,
    pub region_names: Vec<String>,
    pub from_cache: bool,
}

pub struct MapLoader<S> {
    source: S,
    cache: Mutex<BoundaryCache>,
    network_fetches: AtomicU64,
}

impl<S: BoundarySource> MapLoader<S> {
    pub fn new(source: S) -> Self {
        Self::with_cache(source, BoundaryCache::new())
    }

    /// Start from a pre-populated cache
    pub fn with_cache(source: S, cache: BoundaryCache) -> Self {
        Self {
            source,
            cache: Mutex::new(cache),
            network_fetches: AtomicU64::new(0),
        }
    }

    /// Load the geometry for a request, from cache when possible
    pub async fn load(&self, request: &LoadRequest) -> Result<LoadedMap, LoadFailure> {
        let span = info_span!("load_map", map_id = %request.map_id, code = request.code);
        self.load_inner(request).instrument(span).await
    }

    async fn load_inner(&self, request: &LoadRequest) -> Result<LoadedMap, LoadFailure> {
        let cached = self.cache.lock().get(&request.map_id);
        let (geometry, from_cache) = match cached {
            Some(geometry) => {
                debug!("Boundary cache hit");
                (geometry, true)
            }
            None => {
                self.network_fetches.fetch_add(1, Ordering::Relaxed);
                let fetched = self.source.fetch(request.code).await.map_err(|e| {
                    warn!(error = %e, "Boundary fetch failed");
                    LoadFailure::from_fetch(&request.map_id, &e)
                })?;
                (self.cache.lock().put(&request.map_id, fetched), false)
            }
        };

        let region_names = geometry.region_names();
        info!(regions = region_names.len(), from_cache, "Map loaded");

        Ok(LoadedMap {
            map_id: request.map_id.clone(),
            code: request.code,
            geometry,
            region_names,
            from_cache,
        })
    }

    pub fn cached(&self, map_id: &str) -> Option<Arc<BoundaryGeometry>> {
        self.cache.lock().get(map_id)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Number of requests sent to the source so far
    pub fn network_fetches(&self) -> u64 {
        self.network_fetches.load(Ordering::Relaxed)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::geometry::{Feature, Shape};
    use async_trait::async_trait;

    /// Serves a fixed geometry per code and counts requests
    struct StaticSource {
        fail_with: Option<u16>,
        calls: AtomicU64,
    }

    impl StaticSource {
        fn ok() -> Self {
            Self {
                fail_with: None,
                calls: AtomicU64::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                fail_with: Some(status),
                calls: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl BoundarySource for StaticSource {
        async fn fetch(&self, code: u32) -> Result<BoundaryGeometry, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(status) = self.fail_with {
                return Err(FetchError::Status {
                    url: format!("test://{code}_full.json"),
                    status,
                });
            }
            Ok(BoundaryGeometry::new(vec![
                Feature::new(format!("{code}-a"), Shape::Other),
                Feature::new("", Shape::Other),
                Feature::new(format!("{code}-b"), Shape::Other),
            ]))
        }
    }

    #[tokio::test]
    async fn test_miss_fetches_and_caches() {
        let loader = MapLoader::new(StaticSource::ok());
        let request = LoadRequest::new(440000, "广东省");

        let loaded = loader.load(&request).await.unwrap();
        assert_eq!(loaded.map_id, "广东省");
        assert_eq!(loaded.code, 440000);
        assert_eq!(loaded.region_names, vec!["440000-a", "440000-b"]);
        assert!(!loaded.from_cache);
        assert!(loader.cached("广东省").is_some());
        assert_eq!(loader.network_fetches(), 1);
    }

    #[tokio::test]
    async fn test_hit_skips_source() {
        let loader = MapLoader::new(StaticSource::ok());
        let request = LoadRequest::new(440000, "广东省");

        loader.load(&request).await.unwrap();
        let again = loader.load(&request).await.unwrap();

        assert!(again.from_cache);
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 1);
        assert_eq!(loader.network_fetches(), 1);
    }

    #[tokio::test]
    async fn test_prepopulated_cache_never_fetches() {
        let mut cache = BoundaryCache::new();
        cache.put("china", BoundaryGeometry::new(vec![Feature::new("广东省", Shape::Other)]));
        let loader = MapLoader::with_cache(StaticSource::failing(500), cache);

        let loaded = loader.load(&LoadRequest::new(100000, "china")).await.unwrap();
        assert_eq!(loaded.region_names, vec!["广东省"]);
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_names_map_and_caches_nothing() {
        let loader = MapLoader::new(StaticSource::failing(500));
        let err = loader
            .load(&LoadRequest::new(440000, "广东省"))
            .await
            .unwrap_err();

        assert_eq!(err.map_id, "广东省");
        assert!(err.to_string().starts_with("Unable to load map for 广东省"));
        assert_eq!(loader.cache_len(), 0);
    }
}
