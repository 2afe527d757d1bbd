//! Typed records parsed from the two GeoJSON feeds.

use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::Value as Json;
use walkers::{Position, lon_lat};

use crate::feeds::FeedError;

/// A single event from the USGS earthquake summary feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    pub position: Position,
    pub magnitude: f64,
    /// Hypocenter depth in kilometers, negative for events above sea level.
    pub depth_km: f64,
    pub place: Option<String>,
}

/// One tectonic plate boundary polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateLine {
    pub points: Vec<Position>,
}

pub fn parse_earthquakes(document: &str) -> Result<Vec<Earthquake>, FeedError> {
    let collection = FeatureCollection::try_from(document.parse::<GeoJson>()?)?;
    Ok(collection.features.iter().filter_map(earthquake).collect())
}

fn earthquake(feature: &Feature) -> Option<Earthquake> {
    let geometry = feature.geometry.as_ref()?;
    let geojson::Value::Point(coordinates) = &geometry.value else {
        log::debug!("Skipping a feature without a point geometry.");
        return None;
    };

    // The feed encodes the hypocenter as [lon, lat, depth].
    let &[lon, lat, depth_km] = coordinates.as_slice() else {
        log::debug!("Skipping a point without a depth coordinate.");
        return None;
    };

    let Some(magnitude) = feature.property("mag").and_then(Json::as_f64) else {
        // Deleted or not-yet-reviewed events carry a null magnitude.
        log::debug!("Skipping an event without a magnitude.");
        return None;
    };

    let place = feature
        .property("place")
        .and_then(Json::as_str)
        .map(str::to_owned);

    Some(Earthquake {
        position: lon_lat(lon, lat),
        magnitude,
        depth_km,
        place,
    })
}

pub fn parse_plate_lines(document: &str) -> Result<Vec<PlateLine>, FeedError> {
    let collection = FeatureCollection::try_from(document.parse::<GeoJson>()?)?;

    let mut lines = Vec::new();
    for feature in &collection.features {
        let Some(geometry) = feature.geometry.as_ref() else {
            continue;
        };

        match &geometry.value {
            geojson::Value::LineString(points) => lines.push(plate_line(points)),
            geojson::Value::MultiLineString(strings) => {
                lines.extend(strings.iter().map(|points| plate_line(points)));
            }
            _ => log::debug!("Skipping a boundary feature which is not a line."),
        }
    }

    Ok(lines)
}

fn plate_line(points: &[Vec<f64>]) -> PlateLine {
    PlateLine {
        points: points
            .iter()
            .filter_map(|point| match point.as_slice() {
                [lon, lat, ..] => Some(lon_lat(*lon, *lat)),
                _ => None,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAKES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "mag": 4.2, "place": "10 km SSW of Idyllwild, CA" },
                "geometry": { "type": "Point", "coordinates": [-116.75, 33.7, 15.0] }
            },
            {
                "type": "Feature",
                "properties": { "mag": null, "place": "deleted event" },
                "geometry": { "type": "Point", "coordinates": [10.0, 20.0, 30.0] }
            },
            {
                "type": "Feature",
                "properties": { "mag": 1.0, "place": "no depth" },
                "geometry": { "type": "Point", "coordinates": [10.0, 20.0] }
            }
        ]
    }"#;

    #[test]
    fn well_formed_features_become_earthquakes() {
        let quakes = parse_earthquakes(QUAKES).unwrap();
        assert_eq!(quakes.len(), 1);
        assert_eq!(quakes[0].magnitude, 4.2);
        assert_eq!(quakes[0].depth_km, 15.0);
        assert_eq!(quakes[0].position, lon_lat(-116.75, 33.7));
        assert_eq!(
            quakes[0].place.as_deref(),
            Some("10 km SSW of Idyllwild, CA")
        );
    }

    #[test]
    fn empty_collection_parses_to_no_records() {
        let empty = r#"{ "type": "FeatureCollection", "features": [] }"#;
        assert!(parse_earthquakes(empty).unwrap().is_empty());
        assert!(parse_plate_lines(empty).unwrap().is_empty());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_earthquakes("definitely not geojson").is_err());
        assert!(parse_plate_lines("definitely not geojson").is_err());
    }

    #[test]
    fn boundaries_come_as_line_strings_and_multi_line_strings() {
        let plates = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "Name": "one" },
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }
                },
                {
                    "type": "Feature",
                    "properties": { "Name": "two" },
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [
                            [[2.0, 2.0], [3.0, 3.0]],
                            [[4.0, 4.0], [5.0, 5.0], [6.0, 6.0]]
                        ]
                    }
                }
            ]
        }"#;

        let lines = parse_plate_lines(plates).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].points, vec![lon_lat(0.0, 0.0), lon_lat(1.0, 1.0)]);
        assert_eq!(lines[2].points.len(), 3);
    }
}
