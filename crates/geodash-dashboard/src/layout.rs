//! Fitting boundary geometry into the chart viewport
//!
//! Equirectangular projection with longitude scaled by the cosine of the
//! map's center latitude, so provinces far from the equator keep a
//! plausible aspect ratio. The map is centered and padded on all sides.

use geodash_core::geometry::{BoundaryGeometry, Bounds, Position, Ring};

/// Space left around the map, in pixels
const PADDING: f64 = 24.0;

/// Projection from longitude/latitude to viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    scale: f64,
    lon_factor: f64,
    origin_lon: f64,
    origin_lat: f64,
    offset_x: f64,
    offset_y: f64,
}

impl MapProjection {
    /// Fit `bounds` into a `width` x `height` viewport
    pub fn fit(bounds: &Bounds, width: f64, height: f64) -> Self {
        let lon_factor = bounds.center()[1].to_radians().cos().max(0.1);
        let map_w = (bounds.width() * lon_factor).max(f64::EPSILON);
        let map_h = bounds.height().max(f64::EPSILON);

        let avail_w = (width - 2.0 * PADDING).max(1.0);
        let avail_h = (height - 2.0 * PADDING).max(1.0);
        let scale = (avail_w / map_w).min(avail_h / map_h);

        Self {
            scale,
            lon_factor,
            origin_lon: bounds.min_lon,
            origin_lat: bounds.max_lat,
            offset_x: (width - map_w * scale) / 2.0,
            offset_y: (height - map_h * scale) / 2.0,
        }
    }

    pub fn project(&self, [lon, lat]: Position) -> (f64, f64) {
        (
            self.offset_x + (lon - self.origin_lon) * self.lon_factor * self.scale,
            self.offset_y + (self.origin_lat - lat) * self.scale,
        )
    }

    /// SVG path data for one closed ring
    pub fn ring_path(&self, ring: &Ring) -> String {
        let mut d = String::new();
        for (i, position) in ring.iter().enumerate() {
            let (x, y) = self.project(*position);
            let cmd = if i == 0 { "M" } else { " L" };
            d.push_str(&format!("{cmd} {x:.1} {y:.1}"));
        }
        if !d.is_empty() {
            d.push_str(" Z");
        }
        d
    }
}

/// A feature ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPath {
    pub key: String,
    pub name: Option<String>,
    pub d: String,
}

/// Project every drawable feature into SVG path data
pub fn region_paths(geometry: &BoundaryGeometry, width: f64, height: f64) -> Vec<RegionPath> {
    let Some(bounds) = geometry.bounds() else {
        return Vec::new();
    };
    let projection = MapProjection::fit(&bounds, width, height);

    geometry
        .features
        .iter()
        .enumerate()
        .filter_map(|(i, feature)| {
            let d = feature
                .rings()
                .into_iter()
                .map(|ring| projection.ring_path(ring))
                .filter(|d| !d.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if d.is_empty() {
                return None;
            }
            Some(RegionPath {
                key: format!("{i}-{}", feature.name().unwrap_or("")),
                name: feature.name().map(str::to_string),
                d,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodash_core::geometry::{Feature, Shape};

    fn square(lon: f64, lat: f64, size: f64) -> Shape {
        Shape::Polygon {
            coordinates: vec![vec![
                [lon, lat],
                [lon + size, lat],
                [lon + size, lat + size],
                [lon, lat + size],
                [lon, lat],
            ]],
        }
    }

    #[test]
    fn test_fit_keeps_map_inside_viewport() {
        let geometry = BoundaryGeometry::new(vec![
            Feature::new("a", square(100.0, 20.0, 5.0)),
            Feature::new("b", square(110.0, 35.0, 5.0)),
        ]);
        let bounds = geometry.bounds().unwrap();
        let projection = MapProjection::fit(&bounds, 800.0, 600.0);

        for corner in [
            [bounds.min_lon, bounds.min_lat],
            [bounds.max_lon, bounds.max_lat],
            [bounds.min_lon, bounds.max_lat],
            [bounds.max_lon, bounds.min_lat],
        ] {
            let (x, y) = projection.project(corner);
            assert!((PADDING - 0.001..=800.0 - PADDING + 0.001).contains(&x), "x={x}");
            assert!((PADDING - 0.001..=600.0 - PADDING + 0.001).contains(&y), "y={y}");
        }
    }

    #[test]
    fn test_north_is_up() {
        let bounds = Bounds {
            min_lon: 100.0,
            min_lat: 20.0,
            max_lon: 110.0,
            max_lat: 30.0,
        };
        let projection = MapProjection::fit(&bounds, 400.0, 400.0);
        let (_, north) = projection.project([105.0, 30.0]);
        let (_, south) = projection.project([105.0, 20.0]);
        assert!(north < south);
    }

    #[test]
    fn test_ring_path_is_closed() {
        let bounds = Bounds {
            min_lon: 0.0,
            min_lat: 0.0,
            max_lon: 1.0,
            max_lat: 1.0,
        };
        let projection = MapProjection::fit(&bounds, 100.0, 100.0);
        let d = projection.ring_path(&vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
        assert!(d.starts_with("M "));
        assert_eq!(d.matches(" L ").count(), 2);
        assert!(d.ends_with(" Z"));
    }

    #[test]
    fn test_region_paths_skip_undrawable_features() {
        let geometry = BoundaryGeometry::new(vec![
            Feature::new("广州市", square(113.0, 23.0, 1.0)),
            Feature::new("line", Shape::Other),
            Feature::new("", square(114.0, 22.0, 0.5)),
        ]);
        let paths = region_paths(&geometry, 640.0, 480.0);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].name.as_deref(), Some("广州市"));
        assert_eq!(paths[1].name, None);
    }

    #[test]
    fn test_empty_geometry_draws_nothing() {
        assert!(region_paths(&BoundaryGeometry::default(), 640.0, 480.0).is_empty());
    }
}
