//! Structural merge of per-area geometries into one GeoJSON geometry.
//!
//! This is concatenation of coordinate arrays, not a geometric union:
//! overlapping areas stay overlapping and rings are not re-wound.

use serde_json::Value;
use tracing::debug;

use crate::models::{Geometry, GeometryKind, OutputGeometry};

/// Fold `geometries` into a single output geometry.
///
/// `area_count` is the number of areas the caller asked for, which decides
/// the shape of the result:
/// - one area: the geometry is passed through verbatim, whatever its type
/// - more than one: every Polygon becomes one member and every MultiPolygon
///   contributes each of its members, in order; the result is always a
///   MultiPolygon. Non-areal geometries contribute nothing.
pub fn merge<I>(geometries: I, area_count: usize) -> OutputGeometry
where
    I: IntoIterator<Item = Geometry>,
{
    let mut geometries = geometries.into_iter();

    match area_count {
        0 => OutputGeometry::empty(),
        1 => geometries
            .next()
            .map(|g| OutputGeometry {
                kind: g.kind,
                coordinates: g.coordinates,
            })
            .unwrap_or_else(OutputGeometry::empty),
        _ => {
            let mut coordinates: Vec<Value> = Vec::new();

            for geometry in geometries {
                match geometry.kind {
                    GeometryKind::Polygon => coordinates.push(Value::Array(geometry.coordinates)),
                    GeometryKind::MultiPolygon => coordinates.extend(geometry.coordinates),
                    other => debug!("Skipping {:?} geometry in merge", other),
                }
            }

            OutputGeometry {
                kind: GeometryKind::MultiPolygon,
                coordinates,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn polygon(id: i64) -> Geometry {
        Geometry {
            kind: GeometryKind::Polygon,
            coordinates: vec![json!([[id, 0], [id, 1], [id + 1, 1], [id, 0]])],
        }
    }

    fn multi_polygon(ids: &[i64]) -> Geometry {
        Geometry {
            kind: GeometryKind::MultiPolygon,
            coordinates: ids
                .iter()
                .map(|id| Value::Array(polygon(*id).coordinates))
                .collect(),
        }
    }

    fn point() -> Geometry {
        Geometry {
            kind: GeometryKind::Point,
            coordinates: vec![json!(8.68), json!(50.11)],
        }
    }

    #[test]
    fn test_single_area_is_verbatim() {
        let source = polygon(1);
        let output = merge(vec![source.clone()], 1);
        assert_eq!(output.kind, GeometryKind::Polygon);
        assert_eq!(output.coordinates, source.coordinates);
    }

    #[test]
    fn test_single_area_point_passes_through() {
        let output = merge(vec![point()], 1);
        assert_eq!(output.kind, GeometryKind::Point);
        assert_eq!(output.coordinates, point().coordinates);
    }

    #[test]
    fn test_single_area_unknown_type_passes_through() {
        let source = Geometry {
            kind: GeometryKind::Other("Circle".to_string()),
            coordinates: vec![json!(1), json!(2)],
        };

        let output = merge(vec![source], 1);
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"type": "Circle", "coordinates": [1, 2]})
        );
    }

    #[test]
    fn test_single_area_nothing_selected() {
        assert!(merge(Vec::new(), 1).is_empty());
    }

    #[test]
    fn test_no_areas() {
        assert!(merge(vec![polygon(1)], 0).is_empty());
    }

    #[test]
    fn test_two_polygons_become_multi_polygon() {
        let output = merge(vec![polygon(1), polygon(2)], 2);
        assert_eq!(output.kind, GeometryKind::MultiPolygon);
        assert_eq!(
            output.coordinates,
            vec![
                Value::Array(polygon(1).coordinates),
                Value::Array(polygon(2).coordinates)
            ]
        );
    }

    #[test]
    fn test_multi_polygon_members_are_flattened() {
        let output = merge(vec![polygon(1), multi_polygon(&[2, 3, 4]), polygon(5)], 3);
        assert_eq!(output.kind, GeometryKind::MultiPolygon);
        assert_eq!(output.coordinates.len(), 5);

        let expected: Vec<Value> = [1, 2, 3, 4, 5]
            .iter()
            .map(|id| Value::Array(polygon(*id).coordinates))
            .collect();
        assert_eq!(output.coordinates, expected);
    }

    #[test]
    fn test_non_areal_contributes_nothing() {
        let output = merge(vec![point(), polygon(1)], 2);
        assert_eq!(output.kind, GeometryKind::MultiPolygon);
        assert_eq!(output.coordinates.len(), 1);
    }

    #[test]
    fn test_single_contribution_of_many_areas_is_multi_polygon() {
        let output = merge(vec![polygon(1)], 2);
        assert_eq!(output.kind, GeometryKind::MultiPolygon);
        assert_eq!(output.polygon_count(), 1);
    }

    #[test]
    fn test_no_capacity_limit() {
        let ids: Vec<i64> = (0..500).collect();
        let output = merge(vec![multi_polygon(&ids), polygon(1000)], 2);
        assert_eq!(output.coordinates.len(), 501);
        assert!(output.coordinates.iter().all(|c| !c.is_null()));
    }
}
