//! Candidate selection from a Nominatim result list.

use serde::Deserialize;

use crate::models::{Candidate, Geometry};

/// How one geometry is picked from the candidates returned for an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Last candidate that is an administrative Polygon or MultiPolygon
    #[default]
    LastAdministrative,
    /// First candidate, whatever its type
    First,
}

impl SelectionPolicy {
    /// Pick at most one geometry from `candidates`.
    ///
    /// `None` means the lookup succeeded but nothing qualified.
    pub fn select(&self, candidates: Vec<Candidate>) -> Option<Geometry> {
        self.select_candidate(candidates).and_then(|c| c.geojson)
    }

    /// Pick at most one candidate record from `candidates`.
    pub fn select_candidate(&self, candidates: Vec<Candidate>) -> Option<Candidate> {
        match self {
            SelectionPolicy::LastAdministrative => candidates
                .into_iter()
                .rev()
                .find(Candidate::is_admin_area),
            SelectionPolicy::First => candidates.into_iter().next(),
        }
    }
}
