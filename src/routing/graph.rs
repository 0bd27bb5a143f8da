// City table: names, coordinates and the road distances between them.
// Distances are stored in both directions so lookups never depend on the
// order the pair was written in.

use std::collections::HashMap;

use serde::Serialize;

use super::RouteError;

/// Index of a city inside a [`CityMap`].
pub type CityId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub coordinates: Coordinates,
}

/// Approximate coordinates of the built-in cities.
const COLOMBIA_CITIES: &[(&str, f64, f64)] = &[
    ("Bogotá", 4.7110, -74.0721),
    ("Ibagué", 4.4389, -75.2322),
    ("Medellín", 6.2442, -75.5812),
    ("Cali", 3.4516, -76.5320),
    ("Barranquilla", 10.9639, -74.7964),
    ("Cartagena", 10.3910, -75.4794),
    ("Bucaramanga", 7.1254, -73.1198),
    ("Villavicencio", 4.1420, -73.6266),
    ("Pereira", 4.8143, -75.6946),
    ("Manizales", 5.0703, -75.5138),
    ("Santa Marta", 11.2408, -74.1990),
    ("Neiva", 2.9273, -75.2819),
    ("Cúcuta", 7.8939, -72.5078),
    ("Popayán", 2.4448, -76.6147),
    ("Tunja", 5.5353, -73.3678),
];

/// Approximate road distances in km.
const COLOMBIA_ROADS: &[(&str, &str, u32)] = &[
    ("Bogotá", "Ibagué", 200),
    ("Bogotá", "Medellín", 415),
    ("Bogotá", "Cali", 460),
    ("Bogotá", "Barranquilla", 1000),
    ("Bogotá", "Cartagena", 1050),
    ("Bogotá", "Bucaramanga", 400),
    ("Bogotá", "Villavicencio", 120),
    ("Ibagué", "Medellín", 380),
    ("Ibagué", "Cali", 230),
    ("Ibagué", "Barranquilla", 960),
    ("Ibagué", "Cartagena", 1000),
    ("Medellín", "Barranquilla", 700),
    ("Medellín", "Cartagena", 640),
    ("Medellín", "Bucaramanga", 380),
    ("Cali", "Barranquilla", 1070),
    ("Cali", "Cartagena", 1040),
    ("Cali", "Bucaramanga", 720),
    ("Barranquilla", "Cartagena", 120),
    ("Barranquilla", "Bucaramanga", 600),
    ("Cartagena", "Bucaramanga", 580),
    ("Bucaramanga", "Villavicencio", 450),
];

/// Cities plus a symmetric distance table.
#[derive(Debug, Clone, Default)]
pub struct CityMap {
    cities: Vec<City>,
    roads: HashMap<(CityId, CityId), u32>,
}

impl CityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of fifteen Colombian cities.
    pub fn colombia() -> Self {
        let mut map = Self::new();
        for &(name, lat, lon) in COLOMBIA_CITIES {
            map.add_city(name, Coordinates { lat, lon });
        }
        for &(a, b, km) in COLOMBIA_ROADS {
            // Both ends are in COLOMBIA_CITIES.
            if let Err(e) = map.add_road(a, b, km) {
                tracing::error!(error = %e, "built-in road table references a missing city");
            }
        }
        map
    }

    /// Add a city, or move an existing one to new coordinates.
    pub fn add_city(&mut self, name: &str, coordinates: Coordinates) -> CityId {
        let name = name.trim();
        if let Some(id) = self.cities.iter().position(|c| c.name == name) {
            self.cities[id].coordinates = coordinates;
            return id;
        }
        self.cities.push(City {
            name: name.to_string(),
            coordinates,
        });
        self.cities.len() - 1
    }

    /// Record a road in both directions.
    pub fn add_road(&mut self, a: &str, b: &str, km: u32) -> Result<(), RouteError> {
        let a = self.require(a)?;
        let b = self.require(b)?;
        self.roads.insert((a, b), km);
        self.roads.insert((b, a), km);
        Ok(())
    }

    /// Look a city up by name. Surrounding whitespace and letter case are
    /// ignored.
    pub fn find(&self, name: &str) -> Option<CityId> {
        let name = name.trim();
        if let Some(id) = self.cities.iter().position(|c| c.name == name) {
            return Some(id);
        }
        let lowered = name.to_lowercase();
        self.cities
            .iter()
            .position(|c| c.name.to_lowercase() == lowered)
    }

    pub fn require(&self, name: &str) -> Result<CityId, RouteError> {
        self.find(name)
            .ok_or_else(|| RouteError::UnknownCity(name.trim().to_string()))
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(id)
    }

    pub fn name(&self, id: CityId) -> &str {
        self.cities.get(id).map(|c| c.name.as_str()).unwrap_or("?")
    }

    pub fn coordinates(&self, name: &str) -> Option<Coordinates> {
        self.find(name).map(|id| self.cities[id].coordinates)
    }

    /// Road length between two cities by id, `None` when there is no road.
    pub fn distance_between(&self, a: CityId, b: CityId) -> Option<u32> {
        self.roads.get(&(a, b)).copied()
    }

    /// Road length between two cities by name.
    pub fn distance(&self, a: &str, b: &str) -> Option<u32> {
        self.distance_between(self.find(a)?, self.find(b)?)
    }

    pub fn names_sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cities.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
