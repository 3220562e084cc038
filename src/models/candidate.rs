//! Nominatim search result records.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use super::geometry::Geometry;

/// Place `type` tag carried by administrative boundaries
pub const ADMINISTRATIVE: &str = "administrative";

/// One entry of the JSON array returned by the Nominatim search endpoint.
///
/// Only the fields used for selection are decoded; everything is optional
/// so that a sparse record never fails the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    /// Place type, e.g. "administrative", "city"
    #[serde(rename = "type", default)]
    pub place_type: Option<String>,

    /// OSM class, e.g. "boundary", "place"
    #[serde(default)]
    pub class: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Present when the request asked for `polygon_geojson=1`; a malformed
    /// object decodes as `None`
    #[serde(default, deserialize_with = "lenient_geometry")]
    pub geojson: Option<Geometry>,
}

fn lenient_geometry<'de, D>(deserializer: D) -> Result<Option<Geometry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value(v) {
        Ok(geometry) => Some(geometry),
        Err(e) => {
            debug!("Ignoring malformed geojson: {}", e);
            None
        }
    }))
}

impl Candidate {
    pub fn is_administrative(&self) -> bool {
        self.place_type.as_deref() == Some(ADMINISTRATIVE)
    }

    /// Administrative boundary with a Polygon or MultiPolygon geometry
    pub fn is_admin_area(&self) -> bool {
        self.is_administrative()
            && self
                .geojson
                .as_ref()
                .map(|g| g.kind.is_areal())
                .unwrap_or(false)
    }
}
