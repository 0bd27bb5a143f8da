//! Exact shortest-route search over a small fixed graph of Colombian
//! cities, plus an HTML map of the resulting route.
//!
//! - `graph`: the city/coordinate table and the symmetric distance table.
//! - `solver`: memoized search that visits every mandatory stop once.
//! - `map`: Leaflet page rendering for a found route.

pub mod graph;
pub mod map;
pub mod solver;

use thiserror::Error;

pub use graph::{City, CityId, CityMap, Coordinates};
pub use map::{render_route_map, write_route_map};
pub use solver::{best_route, parse_stops, Route, MAX_STOPS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Name not present in the city table
    #[error("Unknown city: '{0}'")]
    UnknownCity(String),

    #[error("Too many stops: {count} given, at most {max} supported")]
    TooManyStops { count: usize, max: usize },
}
