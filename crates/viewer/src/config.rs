//! # Viewer Configuration
//!
//! Optional `urbe.toml` next to the executable overrides the built-in
//! defaults: Overpass endpoint, request timeout, startup district and
//! quality tier, and the per-tier budgets. Every section defaults, so an
//! empty or absent file is a valid configuration.

use std::path::{Path, PathBuf};

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use urbe_common::{QualityProfiles, QualityTier};
use urbe_osm::{DEFAULT_ENDPOINT, QUERY_TIMEOUT_SECS};

/// Viewer configuration, parsed from `urbe.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct ViewerConfig {
    /// Overpass endpoint URL
    pub endpoint: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// District selected at startup (catalog id)
    pub default_district: String,
    /// Quality tier selected at startup
    pub default_quality: QualityTier,
    /// Whether streets are rendered at startup
    pub show_streets: bool,
    /// Per-tier entity and distance budgets
    pub quality: QualityProfiles,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: QUERY_TIMEOUT_SECS,
            default_district: "santiago-centro".to_string(),
            default_quality: QualityTier::default(),
            show_streets: true,
            quality: QualityProfiles::default(),
        }
    }
}

impl ViewerConfig {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: ViewerConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        Ok(config)
    }

    /// Load `path` if it exists; fall back to defaults (with a warning when
    /// the file exists but cannot be used).
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring config: {err}");
                Self::default()
            }
        }
    }
}

/// Errors from loading `urbe.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout_secs, 25);
        assert_eq!(config.default_district, "santiago-centro");
        assert_eq!(config.default_quality, QualityTier::Medium);
        assert!(config.show_streets);
        assert_eq!(config.quality.medium.max_buildings, 1000);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: ViewerConfig = toml::from_str(
            r#"
            default_district = "las-condes"
            default_quality = "high"

            [quality.high]
            max_buildings = 3000
            max_distance = 2500.0
            lod_levels = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.default_district, "las-condes");
        assert_eq!(config.default_quality, QualityTier::High);
        assert_eq!(config.quality.high.max_buildings, 3000);
        // Untouched sections keep their defaults
        assert_eq!(config.quality.low.max_buildings, 500);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ViewerConfig::load_or_default(Path::new("/nonexistent/urbe.toml"));
        assert_eq!(config, ViewerConfig::default());
    }
}
