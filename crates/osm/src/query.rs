//! # Overpass Query Builder
//!
//! One combined Overpass QL query fetches every feature class an ingestion
//! needs: ways tagged `building` plus ways carrying one of the four ingested
//! road classifications, all scoped to a district bounding box.

use urbe_common::GeoBounds;

/// Public Overpass API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Server-side query timeout in seconds; the HTTP client allows the same
pub const QUERY_TIMEOUT_SECS: u64 = 25;

/// Road classifications ingested as streets
pub const STREET_CLASSES: [&str; 4] = ["primary", "secondary", "tertiary", "residential"];

/// Build the combined feature query for `bounds`.
///
/// `out body` emits the matched ways, `>` recurses into their member nodes,
/// and `out skel qt` emits the node coordinates the parser resolves against.
pub fn feature_query(bounds: &GeoBounds) -> String {
    let bbox = format!(
        "{},{},{},{}",
        bounds.south, bounds.west, bounds.north, bounds.east
    );

    let mut query = format!("[out:json][timeout:{QUERY_TIMEOUT_SECS}];(");
    query.push_str(&format!("way[\"building\"]({bbox});"));
    for class in STREET_CLASSES {
        query.push_str(&format!("way[\"highway\"=\"{class}\"]({bbox});"));
    }
    query.push_str(");out body;>;out skel qt;");
    query
}
