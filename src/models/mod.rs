//! Core data models for polygon fetching.

pub mod candidate;
pub mod geometry;

pub use candidate::{Candidate, ADMINISTRATIVE};
pub use geometry::{Geometry, GeometryKind, OutputGeometry};
