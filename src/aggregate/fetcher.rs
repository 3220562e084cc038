//! Concurrent fetch of several areas and assembly of their geometries.

use std::iter;
use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::merge::merge;
use crate::config::OsmConfig;
use crate::models::{Geometry, OutputGeometry};
use crate::osm::{OsmResolver, ResolveError, SetupError};

/// Failure of a whole fetch or combine call.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Every requested area failed to resolve
    #[error("error while fetching the polygon")]
    AllAreasFailed { failures: Vec<(String, ResolveError)> },
}

/// Fetches boundary polygons for several areas at once.
///
/// All lookups of one call run concurrently and are awaited together before
/// any result is assembled. A call fails only when every area failed;
/// otherwise failed areas are logged and left out.
#[derive(Debug, Clone)]
pub struct PolygonFetcher {
    resolver: OsmResolver,
}

impl PolygonFetcher {
    pub fn new(resolver: OsmResolver) -> Self {
        Self { resolver }
    }

    pub fn from_config(config: &OsmConfig) -> Result<Self, SetupError> {
        Ok(Self::new(OsmResolver::new(config)?))
    }

    pub fn resolver(&self) -> &OsmResolver {
        &self.resolver
    }

    /// One geometry per requested area, in request order.
    ///
    /// With a single area its geometry is returned as-is. With several, each
    /// areal geometry is returned as a MultiPolygon. Areas that failed or had
    /// no Polygon/MultiPolygon yield the empty geometry.
    pub async fn fetch_polygons<S: AsRef<str>>(
        &self,
        areas: &[S],
    ) -> Result<Vec<OutputGeometry>, FetchError> {
        let started = Instant::now();
        info!("Fetching polygons for {} areas", areas.len());

        let selected = self.resolve_all(areas).await?;

        let response: Vec<OutputGeometry> = selected
            .into_iter()
            .map(|geometry| match geometry {
                Some(g) if areas.len() == 1 || g.kind.is_areal() => {
                    merge(iter::once(g), areas.len())
                }
                _ => OutputGeometry::empty(),
            })
            .collect();

        info!("Fetch polygons took {:?}", started.elapsed());
        Ok(response)
    }

    /// All requested areas folded into one geometry.
    ///
    /// With more than one area the result is a MultiPolygon holding every
    /// contributed polygon in request order.
    pub async fn combine_polygons<S: AsRef<str>>(
        &self,
        areas: &[S],
    ) -> Result<OutputGeometry, FetchError> {
        let started = Instant::now();
        info!("Combining polygons for {} areas", areas.len());

        let selected = self.resolve_all(areas).await?;
        let response = merge(selected.into_iter().flatten(), areas.len());

        debug!(
            "Combined {} polygons from {} areas",
            response.polygon_count(),
            areas.len()
        );
        info!("Combine polygons took {:?}", started.elapsed());
        Ok(response)
    }

    /// Resolve every area concurrently.
    ///
    /// The returned vector is index-aligned with `areas`; `None` marks an
    /// area that failed or had nothing selected.
    async fn resolve_all<S: AsRef<str>>(
        &self,
        areas: &[S],
    ) -> Result<Vec<Option<Geometry>>, FetchError> {
        let outcomes = join_all(
            areas
                .iter()
                .map(|area| self.resolver.resolve(area.as_ref())),
        )
        .await;

        let mut failures = Vec::new();
        let mut selected = Vec::with_capacity(outcomes.len());

        for (area, outcome) in areas.iter().zip(outcomes) {
            let area = area.as_ref();
            match outcome {
                Ok(geometry) => selected.push(geometry),
                Err(e) => {
                    warn!("Lookup for '{}' failed: {}", area, e);
                    failures.push((area.to_string(), e));
                    selected.push(None);
                }
            }
        }

        if !areas.is_empty() && failures.len() == areas.len() {
            warn!("error while fetching the polygon: all {} areas failed", areas.len());
            return Err(FetchError::AllAreasFailed { failures });
        }

        Ok(selected)
    }
}
