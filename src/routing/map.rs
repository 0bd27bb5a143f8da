// Route map rendering. Produces a standalone Leaflet page over
// OpenStreetMap tiles: one marker per city on the route (endpoints green,
// stops blue) and a red line following the route.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::graph::CityMap;
use super::solver::Route;

const CENTER: [f64; 2] = [4.5, -74.1];
const ZOOM: u8 = 6;

#[derive(Serialize)]
struct Marker<'a> {
    name: &'a str,
    lat: f64,
    lon: f64,
    color: &'static str,
}

#[derive(Serialize)]
struct MapData<'a> {
    center: [f64; 2],
    zoom: u8,
    markers: Vec<Marker<'a>>,
    line: Vec<[f64; 2]>,
    line_color: &'static str,
    line_weight: f64,
    line_opacity: f64,
}

fn map_data<'a>(map: &CityMap, route: &'a Route) -> MapData<'a> {
    let origin = route.origin();
    let destination = route.destination();

    let mut markers = Vec::with_capacity(route.cities.len());
    let mut line = Vec::with_capacity(route.cities.len());
    for name in &route.cities {
        let Some(at) = map.coordinates(name) else {
            tracing::warn!(city = %name, "city on route has no coordinates, skipping");
            continue;
        };
        let color = if name == origin || name == destination {
            "green"
        } else {
            "blue"
        };
        markers.push(Marker {
            name,
            lat: at.lat,
            lon: at.lon,
            color,
        });
        line.push([at.lat, at.lon]);
    }

    MapData {
        center: CENTER,
        zoom: ZOOM,
        markers,
        line,
        line_color: "red",
        line_weight: 4.5,
        line_opacity: 0.8,
    }
}

/// Render the route as a self-contained HTML page.
pub fn render_route_map(map: &CityMap, route: &Route) -> Result<String> {
    let data = serde_json::to_string(&map_data(map, route)).context("Serializing map data")?;
    // Keep the JSON from closing the surrounding <script> element.
    let data = data.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>Route map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const data = {data};
const map = L.map("map").setView(data.center, data.zoom);
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
for (const m of data.markers) {{
  L.circleMarker([m.lat, m.lon], {{ radius: 9, color: m.color, fillColor: m.color, fillOpacity: 0.9 }})
    .bindPopup(() => {{ const el = document.createElement("span"); el.textContent = m.name; return el; }})
    .bindTooltip(m.name)
    .addTo(map);
}}
L.polyline(data.line, {{ color: data.line_color, weight: data.line_weight, opacity: data.line_opacity }}).addTo(map);
</script>
</body>
</html>
"#
    ))
}

/// Render the route map and write it to `path`.
pub fn write_route_map(map: &CityMap, route: &Route, path: &Path) -> Result<()> {
    let html = render_route_map(map, route)?;
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write map file {}", path.display()))?;
    tracing::info!(path = %path.display(), "route map written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::best_route;

    fn sample_route(map: &CityMap) -> Route {
        best_route(map, "Ibagué", "Barranquilla", &["Medellín"])
            .unwrap()
            .unwrap()
    }

    #[test]
    fn endpoints_are_green_and_stops_blue() {
        let map = CityMap::colombia();
        let route = sample_route(&map);
        let data = map_data(&map, &route);

        let colors: Vec<(&str, &str)> = data.markers.iter().map(|m| (m.name, m.color)).collect();
        assert_eq!(
            colors,
            vec![
                ("Ibagué", "green"),
                ("Medellín", "blue"),
                ("Barranquilla", "green")
            ]
        );
        assert_eq!(data.line.len(), 3);
        assert_eq!(data.line[1], [6.2442, -75.5812]);
    }

    #[test]
    fn html_embeds_route_and_styling() {
        let map = CityMap::colombia();
        let html = render_route_map(&map, &sample_route(&map)).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("leaflet.js"));
        assert!(html.contains("\"name\":\"Medellín\""));
        assert!(html.contains("\"line_color\":\"red\""));
        assert!(html.contains("\"line_weight\":4.5"));
        assert!(html.contains("\"center\":[4.5,-74.1]"));
    }

    #[test]
    fn writes_map_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ruta.html");
        let map = CityMap::colombia();
        write_route_map(&map, &sample_route(&map), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Barranquilla"));
    }
}
