//! # Overpass Response Parsing
//!
//! Turns the raw element list (interleaved `node` and `way` entries) into
//! typed Building and Street entities. Node ids a way references but the
//! response cannot resolve are skipped silently; a way left with no resolved
//! coordinates yields no entity at all.
//!
//! ## Table of Contents
//! 1. Wire schema
//! 2. FeatureSet + parse entry points
//! 3. Tag resolution

use std::collections::HashMap;

use serde::Deserialize;

use urbe_common::{Building, GeoPoint, Street};

use crate::error::Result;

// ============================================================================
// 1. Wire schema
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<OverpassElement>,
}

/// One element of the response: a `node` carries lat/lon, a `way` carries an
/// ordered node-id list and a tag map.
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub nodes: Option<Vec<i64>>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
}

// ============================================================================
// 2. FeatureSet + parse entry points
// ============================================================================

/// Everything one ingestion produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    pub buildings: Vec<Building>,
    pub streets: Vec<Street>,
}

/// Parse a raw response body into typed entities
pub fn parse_features(body: &str) -> Result<FeatureSet> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(features_from_elements(response.elements))
}

/// Convert an element list into entities. Element order is preserved for
/// ways, so truncation downstream sees features in ingestion order.
pub fn features_from_elements(elements: Vec<OverpassElement>) -> FeatureSet {
    let mut nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut ways: Vec<(i64, Vec<i64>, HashMap<String, String>)> = Vec::new();

    for element in elements {
        match element.element_type.as_str() {
            "node" => {
                if let (Some(lat), Some(lon)) = (element.lat, element.lon) {
                    nodes.insert(element.id, GeoPoint::new(lat, lon));
                }
            }
            "way" => {
                if let Some(node_ids) = element.nodes {
                    ways.push((element.id, node_ids, element.tags.unwrap_or_default()));
                }
            }
            _ => {}
        }
    }

    let mut set = FeatureSet::default();
    for (way_id, node_ids, tags) in ways {
        let points: Vec<GeoPoint> = node_ids
            .iter()
            .filter_map(|id| nodes.get(id).copied())
            .collect();

        if let Some(kind_tag) = tags.get("building") {
            // Zero resolvable nodes: no entity, not a defaulted one
            if points.is_empty() {
                continue;
            }
            set.buildings.push(Building::from_osm(
                way_id,
                tags.get("name").cloned(),
                mean_point(&points),
                resolve_height(&tags),
                resolve_kind(kind_tag, &tags),
                tags.get("start_date").and_then(|s| leading_int(s)),
            ));
        } else if let Some(highway) = tags.get("highway") {
            // A centerline needs at least two resolved points
            if points.len() < 2 {
                continue;
            }
            set.streets.push(Street::from_osm(
                way_id,
                tags.get("name").cloned(),
                points,
                highway,
            ));
        }
    }
    set
}

// ============================================================================
// 3. Tag resolution
// ============================================================================

/// Default height when no tag resolves
const DEFAULT_HEIGHT: f32 = 10.0;
/// Meters per building level
const METERS_PER_LEVEL: f32 = 3.0;

/// Height priority: explicit `height` tag, then `building:levels` × 3 m,
/// then the 10 m default. Values that fail to parse or are non-positive fall
/// through to the next rule.
pub fn resolve_height(tags: &HashMap<String, String>) -> f32 {
    if let Some(height) = tags.get("height").and_then(|s| leading_f32(s)) {
        if height > 0.0 {
            return height;
        }
    }
    if let Some(levels) = tags.get("building:levels").and_then(|s| leading_f32(s)) {
        if levels > 0.0 {
            return levels * METERS_PER_LEVEL;
        }
    }
    DEFAULT_HEIGHT
}

/// Resolve the building kind: the `building` tag value, except the generic
/// `yes` marker defers to `building:use`, else `"unknown"`.
pub fn resolve_kind(building_tag: &str, tags: &HashMap<String, String>) -> String {
    if building_tag == "yes" {
        tags.get("building:use")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string())
    } else {
        building_tag.to_string()
    }
}

/// Parse the leading float of a tag value ("15", "15 m", "15.5;12")
fn leading_f32(value: &str) -> Option<f32> {
    let trimmed = value.trim();
    let end = trimmed
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && c == '-'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    trimmed[..end].parse().ok()
}

/// Parse the leading integer of a tag value ("1974", "1974-06-01")
fn leading_int(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    let end = trimmed
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && c == '-'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    trimmed[..end].parse().ok()
}

/// Arithmetic mean of the resolved coordinates
fn mean_point(points: &[GeoPoint]) -> GeoPoint {
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;
    GeoPoint::new(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use urbe_common::StreetClass;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn node(id: i64, lat: f64, lon: f64) -> OverpassElement {
        OverpassElement {
            element_type: "node".to_string(),
            id,
            lat: Some(lat),
            lon: Some(lon),
            nodes: None,
            tags: None,
        }
    }

    fn way(id: i64, node_ids: &[i64], tag_pairs: &[(&str, &str)]) -> OverpassElement {
        OverpassElement {
            element_type: "way".to_string(),
            id,
            lat: None,
            lon: None,
            nodes: Some(node_ids.to_vec()),
            tags: Some(tags(tag_pairs)),
        }
    }

    #[test]
    fn test_building_coordinate_is_mean_of_resolvable_nodes() {
        let elements = vec![
            node(1, -33.44, -70.65),
            node(2, -33.46, -70.67),
            // Node 3 is referenced but never emitted
            way(10, &[1, 2, 3], &[("building", "office")]),
        ];
        let set = features_from_elements(elements);

        assert_eq!(set.buildings.len(), 1);
        let building = &set.buildings[0];
        assert_eq!(building.id, "osm-10");
        assert!((building.coordinates.lat - (-33.45)).abs() < 1e-9);
        assert!((building.coordinates.lng - (-70.66)).abs() < 1e-9);
    }

    #[test]
    fn test_way_with_no_resolvable_nodes_yields_nothing() {
        let elements = vec![
            way(10, &[1, 2], &[("building", "office")]),
            way(11, &[3, 4], &[("highway", "primary")]),
        ];
        let set = features_from_elements(elements);
        assert!(set.buildings.is_empty());
        assert!(set.streets.is_empty());
    }

    #[test]
    fn test_street_keeps_full_point_sequence_in_order() {
        let elements = vec![
            node(1, -33.44, -70.65),
            node(2, -33.441, -70.651),
            node(3, -33.442, -70.652),
            way(20, &[1, 2, 3], &[("highway", "primary"), ("name", "Alameda")]),
        ];
        let set = features_from_elements(elements);

        assert_eq!(set.streets.len(), 1);
        let street = &set.streets[0];
        assert_eq!(street.id, "street-20");
        assert_eq!(street.name.as_deref(), Some("Alameda"));
        assert_eq!(street.points.len(), 3);
        assert_eq!(street.points[0], GeoPoint::new(-33.44, -70.65));
        assert_eq!(street.points[2], GeoPoint::new(-33.442, -70.652));
        assert_eq!(street.class, StreetClass::Primary);
        assert_eq!(street.width, 12.0);
    }

    #[test]
    fn test_street_with_single_resolved_point_is_dropped() {
        let elements = vec![
            node(1, -33.44, -70.65),
            way(20, &[1, 99], &[("highway", "residential")]),
        ];
        let set = features_from_elements(elements);
        assert!(set.streets.is_empty());
    }

    #[test]
    fn test_height_resolution_priority() {
        assert_eq!(resolve_height(&tags(&[("height", "15")])), 15.0);
        assert_eq!(resolve_height(&tags(&[("height", "15 m")])), 15.0);
        assert_eq!(
            resolve_height(&tags(&[("height", "15"), ("building:levels", "4")])),
            15.0
        );
        assert_eq!(resolve_height(&tags(&[("building:levels", "4")])), 12.0);
        assert_eq!(resolve_height(&tags(&[])), 10.0);
        // Unparseable or non-positive values fall through
        assert_eq!(resolve_height(&tags(&[("height", "tall")])), 10.0);
        assert_eq!(
            resolve_height(&tags(&[("height", "0"), ("building:levels", "2")])),
            6.0
        );
    }

    #[test]
    fn test_kind_resolution() {
        assert_eq!(resolve_kind("office", &tags(&[])), "office");
        assert_eq!(
            resolve_kind("yes", &tags(&[("building:use", "retail")])),
            "retail"
        );
        assert_eq!(resolve_kind("yes", &tags(&[])), "unknown");
    }

    #[test]
    fn test_year_from_start_date() {
        let elements = vec![
            node(1, -33.44, -70.65),
            way(10, &[1], &[("building", "office"), ("start_date", "1974-06-01")]),
        ];
        let set = features_from_elements(elements);
        assert_eq!(set.buildings[0].year, Some(1974));
    }

    #[test]
    fn test_color_is_stable_across_repeated_parses() {
        let make = || {
            features_from_elements(vec![
                node(1, -33.44, -70.65),
                way(10, &[1], &[("building", "hangar")]),
            ])
        };
        let first = make();
        let second = make();
        assert_eq!(first.buildings[0].color, second.buildings[0].color);
        assert!(first.buildings[0].color.starts_with("hsl("));
    }

    #[test]
    fn test_parse_features_from_raw_json() {
        let body = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": -33.44, "lon": -70.65},
                {"type": "node", "id": 2, "lat": -33.441, "lon": -70.651},
                {"type": "way", "id": 10, "nodes": [1, 2],
                 "tags": {"building": "yes", "building:use": "retail"}},
                {"type": "way", "id": 20, "nodes": [1, 2],
                 "tags": {"highway": "residential"}}
            ]
        }"#;
        let set = parse_features(body).unwrap();

        assert_eq!(set.buildings.len(), 1);
        assert_eq!(set.buildings[0].kind, "retail");
        assert_eq!(set.buildings[0].color, "#CD5C5C");
        assert_eq!(set.streets.len(), 1);
        assert_eq!(set.streets[0].width, 6.0);
    }

    #[test]
    fn test_malformed_body_is_a_parse_error() {
        let result = parse_features("not json");
        assert!(matches!(result, Err(crate::error::IngestError::Parse(_))));
    }
}
