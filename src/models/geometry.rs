//! GeoJSON geometry types consumed from Nominatim and returned to callers.

use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GeoJSON geometry type tag.
///
/// Tags outside the GeoJSON set are kept verbatim in `Other` so they
/// serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    /// No geometry (serialized as `""`)
    #[default]
    Empty,
    Other(String),
}

impl GeometryKind {
    /// Polygon or MultiPolygon
    pub fn is_areal(&self) -> bool {
        matches!(self, GeometryKind::Polygon | GeometryKind::MultiPolygon)
    }

    pub fn as_str(&self) -> &str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
            GeometryKind::Empty => "",
            GeometryKind::Other(tag) => tag,
        }
    }
}

impl From<String> for GeometryKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Point" => GeometryKind::Point,
            "MultiPoint" => GeometryKind::MultiPoint,
            "LineString" => GeometryKind::LineString,
            "MultiLineString" => GeometryKind::MultiLineString,
            "Polygon" => GeometryKind::Polygon,
            "MultiPolygon" => GeometryKind::MultiPolygon,
            "GeometryCollection" => GeometryKind::GeometryCollection,
            "" => GeometryKind::Empty,
            _ => GeometryKind::Other(tag),
        }
    }
}

impl From<GeometryKind> for String {
    fn from(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Other(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

/// A single geometry as returned in a Nominatim `geojson` field.
///
/// `coordinates` is kept as the nested JSON arrays the service sent so that
/// any geometry type can be passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Missing tag decodes as `Empty`
    #[serde(rename = "type", default)]
    pub kind: GeometryKind,

    /// Absent for GeometryCollection
    #[serde(default)]
    pub coordinates: Vec<Value>,
}

/// Result geometry handed back by the fetcher.
///
/// `coordinates` never carries placeholder entries: it holds exactly the
/// polygons (or pass-through coordinates) that were merged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputGeometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: Vec<Value>,
}

impl OutputGeometry {
    /// The `{"type": "", "coordinates": []}` geometry.
    pub fn empty() -> Self {
        Self {
            kind: GeometryKind::Empty,
            coordinates: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == GeometryKind::Empty && self.coordinates.is_empty()
    }

    /// Number of top-level polygons held
    pub fn polygon_count(&self) -> usize {
        match self.kind {
            GeometryKind::Polygon => 1,
            GeometryKind::MultiPolygon => self.coordinates.len(),
            _ => 0,
        }
    }

    /// Convert to a `geo` MultiPolygon.
    ///
    /// Returns `None` for non-areal geometries or when a position is not a
    /// pair of numbers. A Polygon becomes a single-member MultiPolygon.
    pub fn to_multi_polygon(&self) -> Option<MultiPolygon<f64>> {
        let polygons = match self.kind {
            GeometryKind::Polygon => vec![polygon_from_rings(&self.coordinates)?],
            GeometryKind::MultiPolygon => self
                .coordinates
                .iter()
                .map(|member| polygon_from_rings(member.as_array()?))
                .collect::<Option<Vec<_>>>()?,
            _ => return None,
        };

        Some(MultiPolygon::new(polygons))
    }

    /// Bounding box as (min_lon, min_lat, max_lon, max_lat)
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        self.to_multi_polygon()?
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

fn polygon_from_rings(rings: &[Value]) -> Option<Polygon<f64>> {
    let mut rings = rings
        .iter()
        .map(ring_from_value)
        .collect::<Option<Vec<_>>>()?
        .into_iter();

    let exterior = rings.next()?;
    Some(Polygon::new(exterior, rings.collect()))
}

fn ring_from_value(ring: &Value) -> Option<LineString<f64>> {
    let coords = ring
        .as_array()?
        .iter()
        .map(|position| {
            let position = position.as_array()?;
            // Positions may carry a third (altitude) element; only x/y are used
            Some(Coord {
                x: position.first()?.as_f64()?,
                y: position.get(1)?.as_f64()?,
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square(offset: f64) -> Value {
        json!([[
            [offset, offset],
            [offset + 1.0, offset],
            [offset + 1.0, offset + 1.0],
            [offset, offset + 1.0],
            [offset, offset]
        ]])
    }

    #[test]
    fn test_empty_serializes_with_blank_type() {
        let value = serde_json::to_value(OutputGeometry::empty()).unwrap();
        assert_eq!(value, json!({"type": "", "coordinates": []}));
    }

    #[test]
    fn test_unknown_type_keeps_tag() {
        let geometry: Geometry =
            serde_json::from_value(json!({"type": "Circle", "coordinates": [1, 2]})).unwrap();
        assert_eq!(geometry.kind, GeometryKind::Other("Circle".to_string()));
        assert_eq!(
            serde_json::to_value(&geometry).unwrap(),
            json!({"type": "Circle", "coordinates": [1, 2]})
        );
    }

    #[test]
    fn test_missing_type_decodes_empty() {
        let geometry: Geometry = serde_json::from_value(json!({"coordinates": [1, 2]})).unwrap();
        assert_eq!(geometry.kind, GeometryKind::Empty);
        assert!(!geometry.kind.is_areal());
    }

    #[test]
    fn test_known_tags_round_trip() {
        for tag in ["Point", "Polygon", "MultiPolygon", "GeometryCollection", ""] {
            let kind = GeometryKind::from(tag.to_string());
            assert!(!matches!(kind, GeometryKind::Other(_)));
            assert_eq!(kind.as_str(), tag);
        }
    }

    #[test]
    fn test_missing_coordinates_defaults_empty() {
        let geometry: Geometry =
            serde_json::from_value(json!({"type": "GeometryCollection"})).unwrap();
        assert_eq!(geometry.kind, GeometryKind::GeometryCollection);
        assert!(geometry.coordinates.is_empty());
    }

    #[test]
    fn test_polygon_to_multi_polygon() {
        let output = OutputGeometry {
            kind: GeometryKind::Polygon,
            coordinates: square(0.0).as_array().unwrap().clone(),
        };

        let multi = output.to_multi_polygon().unwrap();
        assert_eq!(multi.0.len(), 1);
        assert_eq!(multi.0[0].exterior().0.len(), 5);
        assert_eq!(output.polygon_count(), 1);
    }

    #[test]
    fn test_multi_polygon_bbox() {
        let output = OutputGeometry {
            kind: GeometryKind::MultiPolygon,
            coordinates: vec![square(0.0), square(5.0)],
        };

        assert_eq!(output.polygon_count(), 2);
        assert_eq!(output.bbox(), Some((0.0, 0.0, 6.0, 6.0)));
    }

    #[test]
    fn test_point_has_no_multi_polygon() {
        let output = OutputGeometry {
            kind: GeometryKind::Point,
            coordinates: vec![json!(1.0), json!(2.0)],
        };

        assert!(output.to_multi_polygon().is_none());
        assert_eq!(output.polygon_count(), 0);
    }
}
