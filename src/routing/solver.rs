// Exact route search: from the origin, try every remaining mandatory stop as
// the next hop and recurse, memoizing on (current city, remaining stops).
// Once no stops remain the route closes with a direct road to the
// destination. A missing road anywhere means that branch has no route.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, instrument};

use super::graph::{CityId, CityMap};
use super::RouteError;

/// Remaining stops are tracked as a bitmask, one bit per stop.
pub const MAX_STOPS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Origin, the stops in visiting order, destination
    pub cities: Vec<String>,
    pub distance_km: u32,
}

impl Route {
    pub fn origin(&self) -> &str {
        self.cities.first().map(String::as_str).unwrap_or_default()
    }

    pub fn destination(&self) -> &str {
        self.cities.last().map(String::as_str).unwrap_or_default()
    }

    /// Cities on the route joined with arrows, e.g. `Ibagué → Medellín`.
    pub fn display_path(&self) -> String {
        self.cities.join(" → ")
    }
}

/// Split a `;`-separated list of stop names, dropping blanks.
pub fn parse_stops(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

type Best = Option<(u32, Vec<CityId>)>;

struct Search<'a> {
    map: &'a CityMap,
    destination: CityId,
    stops: Vec<CityId>,
    memo: HashMap<(CityId, u32), Best>,
}

impl Search<'_> {
    fn solve(&mut self, current: CityId, remaining: u32) -> Best {
        if let Some(hit) = self.memo.get(&(current, remaining)) {
            return hit.clone();
        }

        let best = if remaining == 0 {
            self.map
                .distance_between(current, self.destination)
                .map(|km| (km, vec![current, self.destination]))
        } else {
            let mut best: Best = None;
            for bit in 0..self.stops.len() {
                if remaining & (1 << bit) == 0 {
                    continue;
                }
                let next = self.stops[bit];
                let Some(leg) = self.map.distance_between(current, next) else {
                    continue;
                };
                let Some((rest, tail)) = self.solve(next, remaining & !(1 << bit)) else {
                    continue;
                };
                let total = leg + rest;
                if best.as_ref().map_or(true, |(km, _)| total < *km) {
                    let mut path = Vec::with_capacity(tail.len() + 1);
                    path.push(current);
                    path.extend(tail);
                    best = Some((total, path));
                }
            }
            best
        };

        self.memo.insert((current, remaining), best.clone());
        best
    }
}

/// Shortest route from `origin` to `destination` visiting every stop exactly
/// once. Returns `Ok(None)` when no ordering of the stops is connected by
/// roads.
///
/// Stops naming the origin or the destination are ignored, and duplicates
/// collapse into one.
#[instrument(skip(map, stops), fields(stop_count = stops.len()))]
pub fn best_route<S: AsRef<str>>(
    map: &CityMap,
    origin: &str,
    destination: &str,
    stops: &[S],
) -> Result<Option<Route>, RouteError> {
    let from = map.require(origin)?;
    let to = map.require(destination)?;

    let mut stop_ids = stops
        .iter()
        .map(|s| map.require(s.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    stop_ids.retain(|&id| id != from && id != to);
    stop_ids.sort_unstable();
    stop_ids.dedup();

    if stop_ids.len() > MAX_STOPS {
        return Err(RouteError::TooManyStops {
            count: stop_ids.len(),
            max: MAX_STOPS,
        });
    }

    let all = (1u32 << stop_ids.len()) - 1;
    let mut search = Search {
        map,
        destination: to,
        stops: stop_ids,
        memo: HashMap::new(),
    };
    let best = search.solve(from, all);
    debug!(states = search.memo.len(), found = best.is_some(), "route search finished");

    Ok(best.map(|(distance_km, ids)| Route {
        cities: ids.into_iter().map(|id| map.name(id).to_string()).collect(),
        distance_km,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Coordinates;
    use proptest::prelude::*;
    use rstest::rstest;

    fn path_length(map: &CityMap, cities: &[String]) -> Option<u32> {
        cities
            .windows(2)
            .map(|w| map.distance(&w[0], &w[1]))
            .sum()
    }

    #[test]
    fn ibague_to_barranquilla_through_medellin() {
        let map = CityMap::colombia();
        let route = best_route(&map, "Ibagué", "Barranquilla", &["Medellín"])
            .unwrap()
            .unwrap();
        assert_eq!(route.cities, vec!["Ibagué", "Medellín", "Barranquilla"]);
        assert_eq!(route.distance_km, 380 + 700);
        assert_eq!(route.display_path(), "Ibagué → Medellín → Barranquilla");
    }

    #[test]
    fn no_stops_uses_direct_road() {
        let map = CityMap::colombia();
        let stops: [&str; 0] = [];
        let route = best_route(&map, "Bogotá", "Cali", &stops).unwrap().unwrap();
        assert_eq!(route.cities, vec!["Bogotá", "Cali"]);
        assert_eq!(route.distance_km, 460);
    }

    #[test]
    fn no_direct_road_means_no_route() {
        let map = CityMap::colombia();
        let stops: [&str; 0] = [];
        assert_eq!(best_route(&map, "Bogotá", "Pereira", &stops).unwrap(), None);
        assert_eq!(best_route(&map, "Bogotá", "Bogotá", &stops).unwrap(), None);
    }

    #[test]
    fn unreachable_stop_means_no_route() {
        let map = CityMap::colombia();
        let route = best_route(&map, "Bogotá", "Cali", &["Tunja"]).unwrap();
        assert_eq!(route, None);
    }

    #[test]
    fn picks_the_shorter_ordering() {
        let map = CityMap::colombia();
        let route = best_route(&map, "Ibagué", "Barranquilla", &["Medellín", "Cartagena"])
            .unwrap()
            .unwrap();
        // Ibagué-Medellín-Cartagena-Barranquilla = 380 + 640 + 120
        // Ibagué-Cartagena-Medellín-Barranquilla = 1000 + 640 + 700
        assert_eq!(route.cities, vec!["Ibagué", "Medellín", "Cartagena", "Barranquilla"]);
        assert_eq!(route.distance_km, 1140);
    }

    #[rstest]
    #[case("Lima", "Cali", "Lima")]
    #[case("Cali", "Quito", "Quito")]
    fn unknown_endpoint_is_an_error(#[case] origin: &str, #[case] dest: &str, #[case] bad: &str) {
        let map = CityMap::colombia();
        let stops: [&str; 0] = [];
        let err = best_route(&map, origin, dest, &stops).unwrap_err();
        assert_eq!(err, RouteError::UnknownCity(bad.to_string()));
    }

    #[test]
    fn unknown_stop_is_an_error() {
        let map = CityMap::colombia();
        let err = best_route(&map, "Cali", "Bogotá", &["Caracas"]).unwrap_err();
        assert_eq!(err, RouteError::UnknownCity("Caracas".into()));
    }

    #[test]
    fn endpoints_and_duplicates_in_stops_are_ignored() {
        let map = CityMap::colombia();
        let route = best_route(
            &map,
            "Ibagué",
            "Barranquilla",
            &["Medellín", "medellín", "Ibagué", "Barranquilla"],
        )
        .unwrap()
        .unwrap();
        assert_eq!(route.cities, vec!["Ibagué", "Medellín", "Barranquilla"]);
    }

    #[test]
    fn too_many_stops_is_rejected() {
        let mut map = CityMap::new();
        let names: Vec<String> = (0..=MAX_STOPS + 2).map(|i| format!("C{i}")).collect();
        for name in &names {
            map.add_city(name, Coordinates { lat: 0.0, lon: 0.0 });
        }
        let stops = &names[2..];
        let err = best_route(&map, &names[0], &names[1], stops).unwrap_err();
        assert_eq!(
            err,
            RouteError::TooManyStops {
                count: MAX_STOPS + 1,
                max: MAX_STOPS
            }
        );
    }

    #[rstest]
    #[case("Medellín; Cartagena", vec!["Medellín", "Cartagena"])]
    #[case("  ; Cali ;; ", vec!["Cali"])]
    #[case("", vec![])]
    fn stops_are_split_on_semicolons(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(parse_stops(raw), expected);
    }

    /// Cities that have at least one road in the built-in table.
    const CONNECTED: &[&str] = &[
        "Bogotá",
        "Ibagué",
        "Medellín",
        "Cali",
        "Barranquilla",
        "Cartagena",
        "Bucaramanga",
        "Villavicencio",
    ];

    proptest! {
        #[test]
        fn found_routes_visit_every_stop_once(
            origin in 0..CONNECTED.len(),
            destination in 0..CONNECTED.len(),
            stops in prop::collection::btree_set(0..CONNECTED.len(), 0..5),
        ) {
            let map = CityMap::colombia();
            let origin = CONNECTED[origin];
            let destination = CONNECTED[destination];
            let stops: Vec<&str> = stops
                .into_iter()
                .map(|i| CONNECTED[i])
                .filter(|s| *s != origin && *s != destination)
                .collect();

            if let Some(route) = best_route(&map, origin, destination, &stops).unwrap() {
                prop_assert_eq!(route.origin(), origin);
                prop_assert_eq!(route.destination(), destination);
                for stop in &stops {
                    let visits = route.cities.iter().filter(|c| c.as_str() == *stop).count();
                    prop_assert_eq!(visits, 1);
                }
                prop_assert_eq!(route.cities.len(), stops.len() + 2);
                prop_assert_eq!(path_length(&map, &route.cities), Some(route.distance_km));
            }
        }

        #[test]
        fn route_is_no_longer_than_any_given_ordering(
            stops in prop::collection::btree_set(2..CONNECTED.len(), 1..4),
        ) {
            let map = CityMap::colombia();
            let stops: Vec<&str> = stops.into_iter().map(|i| CONNECTED[i]).collect();
            let mut ordered: Vec<String> = vec!["Bogotá".into()];
            ordered.extend(stops.iter().map(|s| s.to_string()));
            ordered.push("Ibagué".into());

            let found = best_route(&map, "Bogotá", "Ibagué", &stops).unwrap();
            if let Some(manual) = path_length(&map, &ordered) {
                let route = found.expect("a connected ordering exists");
                prop_assert!(route.distance_km <= manual);
            }
        }
    }
}
