//! # Urbe OSM — Overpass Ingestion
//!
//! Queries the Overpass API for buildings and streets within a district
//! bounding box and parses the node/way response into the typed entities of
//! `urbe-common`. Failures map to a small error taxonomy; a failed ingestion
//! never partially replaces existing collections (that policy lives in the
//! viewer).
//!
//! ## Modules
//! - `query` — Overpass QL builder
//! - `parse` — node/way response → Building/Street entities
//! - `client` — async HTTP client with an explicit timeout
//! - `error` — Network/Status/Parse taxonomy

pub mod client;
pub mod error;
pub mod parse;
pub mod query;

pub use client::OsmClient;
pub use error::{IngestError, Result};
pub use parse::{parse_features, FeatureSet};
pub use query::{feature_query, DEFAULT_ENDPOINT, QUERY_TIMEOUT_SECS};
