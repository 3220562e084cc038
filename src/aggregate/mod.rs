//! Multi-area fetching and polygon combination.

mod fetcher;
mod merge;

pub use fetcher::{FetchError, PolygonFetcher};
pub use merge::merge;
