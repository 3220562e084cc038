//! Polyfetch - administrative boundary polygons from OpenStreetMap
//!
//! Looks up area names on Nominatim, keeps the administrative boundary
//! geometry of each, and optionally combines several areas into a single
//! MultiPolygon.

pub mod aggregate;
pub mod config;
pub mod models;
pub mod osm;

pub use aggregate::{FetchError, PolygonFetcher};
pub use config::Config;
pub use models::{Geometry, GeometryKind, OutputGeometry};
pub use osm::{OsmResolver, ResolveError, SelectionPolicy, SetupError};
