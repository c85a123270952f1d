//! Boundary geometry as served by the map data endpoint
//!
//! The payload is a GeoJSON `FeatureCollection`. Only the pieces the
//! dashboard needs are typed: feature names and polygon rings. Other
//! geometry kinds are kept as [`Shape::Other`] and never drawn.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A longitude/latitude pair
pub type Position = [f64; 2];

/// Closed ring of positions
pub type Ring = Vec<Position>;

/// Geometry of one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Polygon {
        #[serde(deserialize_with = "polygon_rings")]
        coordinates: Vec<Ring>,
    },
    MultiPolygon {
        #[serde(deserialize_with = "multi_polygon_rings")]
        coordinates: Vec<Vec<Ring>>,
    },
    #[serde(other)]
    Other,
}

/// Position with any trailing values (altitude, measure) dropped
struct LenientPosition(Position);

impl<'de> Deserialize<'de> for LenientPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        match values.as_slice() {
            [lon, lat, ..] => Ok(Self([*lon, *lat])),
            _ => Err(de::Error::invalid_length(
                values.len(),
                &"a position with at least 2 values",
            )),
        }
    }
}

fn into_rings(rings: Vec<Vec<LenientPosition>>) -> Vec<Ring> {
    rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|p| p.0).collect())
        .collect()
}

fn polygon_rings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Ring>, D::Error> {
    Ok(into_rings(Vec::deserialize(deserializer)?))
}

fn multi_polygon_rings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Vec<Ring>>, D::Error> {
    let polygons: Vec<Vec<Vec<LenientPosition>>> = Vec::deserialize(deserializer)?;
    Ok(polygons.into_iter().map(into_rings).collect())
}

impl Shape {
    /// Every ring of the shape, outer rings and holes alike
    pub fn rings(&self) -> Vec<&Ring> {
        match self {
            Shape::Polygon { coordinates } => coordinates.iter().collect(),
            Shape::MultiPolygon { coordinates } => coordinates.iter().flatten().collect(),
            Shape::Other => Vec::new(),
        }
    }
}

/// Feature properties we care about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub name: Option<String>,
}

/// A named shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<FeatureProperties>,
    #[serde(default)]
    pub geometry: Option<Shape>,
}

impl Feature {
    pub fn new(name: impl Into<String>, geometry: Shape) -> Self {
        Self {
            properties: Some(FeatureProperties {
                name: Some(name.into()),
            }),
            geometry: Some(geometry),
        }
    }

    /// Display name, `None` when missing or empty
    pub fn name(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .filter(|n| !n.is_empty())
    }

    pub fn rings(&self) -> Vec<&Ring> {
        self.geometry.as_ref().map(Shape::rings).unwrap_or_default()
    }
}

/// All features composing one map level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryGeometry {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl BoundaryGeometry {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Parse a response body
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Names of all features, skipping unnamed ones, in feature order
    pub fn region_names(&self) -> Vec<String> {
        self.features
            .iter()
            .filter_map(Feature::name)
            .map(str::to_string)
            .collect()
    }

    /// Bounding box over every ring, `None` when nothing is drawable
    pub fn bounds(&self) -> Option<Bounds> {
        let mut positions = self
            .features
            .iter()
            .flat_map(Feature::rings)
            .flat_map(|ring| ring.iter());

        let first = positions.next()?;
        let mut bounds = Bounds::point(*first);
        for position in positions {
            bounds.extend(*position);
        }
        Some(bounds)
    }
}

/// Longitude/latitude bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    pub fn point([lon, lat]: Position) -> Self {
        Self {
            min_lon: lon,
            min_lat: lat,
            max_lon: lon,
            max_lat: lat,
        }
    }

    pub fn extend(&mut self, [lon, lat]: Position) {
        self.min_lon = self.min_lon.min(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lon = self.max_lon.max(lon);
        self.max_lat = self.max_lat.max(lat);
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> Position {
        [
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        ]
    }
}
