//! OpenStreetMap (Nominatim) boundary lookup.
//!
//! One request per area name; the response is narrowed down to a single
//! geometry according to a [`SelectionPolicy`].

mod resolver;
mod selection;

pub use resolver::{OsmResolver, ResolveError, SetupError};
pub use selection::SelectionPolicy;
