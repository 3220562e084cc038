//! Nominatim lookup for a single area name.

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::SelectionPolicy;
use crate::config::OsmConfig;
use crate::models::{Candidate, Geometry};

/// Failure to construct a resolver from configuration.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("invalid OSM endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failure of one area lookup.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("error while fetching the polygon from OSM")]
    Transport(#[source] reqwest::Error),
    #[error("no data found in OSM")]
    EmptyResponse,
    #[error("no data available in OSM")]
    NoResults,
}

/// Resolves area names to administrative boundary geometries via Nominatim
#[derive(Debug, Clone)]
pub struct OsmResolver {
    client: Client,
    endpoint: Url,
    selection: SelectionPolicy,
}

impl OsmResolver {
    pub fn new(config: &OsmConfig) -> Result<Self, SetupError> {
        let endpoint = Url::parse(&config.endpoint)?;

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(SetupError::Client)?;

        Ok(Self {
            client,
            endpoint,
            selection: config.selection,
        })
    }

    pub fn selection(&self) -> SelectionPolicy {
        self.selection
    }

    /// Search URL for `area`; the name is passed through as-is apart from
    /// percent-encoding.
    pub fn lookup_url(&self, area: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", area)
            .append_pair("format", "json")
            .append_pair("polygon_geojson", "1");
        url
    }

    /// Fetch the raw candidate list for `area`.
    pub async fn lookup(&self, area: &str) -> Result<Vec<Candidate>, ResolveError> {
        let url = self.lookup_url(area);
        debug!("Looking up '{}' at {}", area, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ResolveError::Transport)?;

        if !response.status().is_success() {
            warn!("OSM lookup for '{}' returned status {}", area, response.status());
            return Err(ResolveError::EmptyResponse);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return Err(ResolveError::Transport(e)),
            Err(e) => {
                warn!("Failed to read OSM response for '{}': {}", area, e);
                return Err(ResolveError::EmptyResponse);
            }
        };

        let candidates: Vec<Candidate> = serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse OSM response for '{}': {}", area, e);
            ResolveError::EmptyResponse
        })?;

        if candidates.is_empty() {
            return Err(ResolveError::NoResults);
        }

        debug!("OSM returned {} candidates for '{}'", candidates.len(), area);
        Ok(candidates)
    }

    /// Look up `area` and select its geometry.
    ///
    /// `Ok(None)` means candidates came back but none satisfied the
    /// selection policy.
    pub async fn resolve(&self, area: &str) -> Result<Option<Geometry>, ResolveError> {
        let candidates = self.lookup(area).await?;
        let Some(candidate) = self.selection.select_candidate(candidates) else {
            debug!("No candidate for '{}' matched {:?}", area, self.selection);
            return Ok(None);
        };

        debug!(
            "Selected '{}' for '{}'",
            candidate.display_name.as_deref().unwrap_or("<unnamed>"),
            area
        );
        Ok(candidate.geojson)
    }
}
