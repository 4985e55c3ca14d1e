//! Runtime configuration.
//!
//! [`ReportMetadata`] is the static block attached to every report.
//! [`AeroApiConfig`] holds the flight API credentials, which the binary
//! takes from `--api-key` / `AEROAPI_KEY` (after `.env` has been loaded).

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AEROAPI_BASE_URL: &str = "https://aeroapi.flightaware.com/aeroapi";

/// Static description of the airport a report covers.
///
/// Can be overridden from a JSON file:
/// ```json
/// {
///   "airport": "OPO",
///   "timeZone": "Europe/Lisbon",
///   "updateFrequency": "daily"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub airport: String,
    pub time_zone: String,
    pub update_frequency: String,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            airport: "LIS".to_string(),
            time_zone: "Europe/Lisbon".to_string(),
            update_frequency: "daily".to_string(),
        }
    }
}

impl ReportMetadata {
    /// Loads metadata from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read metadata file '{path}'"))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid metadata file '{path}'"))
    }
}

/// Credentials and endpoint for FlightAware AeroAPI.
#[derive(Debug, Clone)]
pub struct AeroApiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl AeroApiConfig {
    /// Rejects an empty key. An empty `base_url` falls back to
    /// [`DEFAULT_AEROAPI_BASE_URL`].
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            bail!("AEROAPI_KEY must not be empty");
        }

        let base_url = match base_url.trim() {
            "" => DEFAULT_AEROAPI_BASE_URL,
            url => url,
        };

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_metadata() {
        let m = ReportMetadata::default();
        assert_eq!(m.airport, "LIS");
        assert_eq!(m.time_zone, "Europe/Lisbon");
        assert_eq!(m.update_frequency, "daily");
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let json = serde_json::to_value(ReportMetadata::default()).unwrap();
        assert_eq!(json["timeZone"], "Europe/Lisbon");
        assert_eq!(json["updateFrequency"], "daily");
    }

    #[test]
    fn test_load_metadata_from_file() {
        let path = std::env::temp_dir().join("lis_on_time_test_metadata.json");
        fs::write(
            &path,
            r#"{"airport": "OPO", "timeZone": "Europe/Lisbon", "updateFrequency": "hourly"}"#,
        )
        .unwrap();

        let m = ReportMetadata::load(path.to_str().unwrap()).unwrap();
        assert_eq!(m.airport, "OPO");
        assert_eq!(m.update_frequency, "hourly");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_metadata_missing_file() {
        assert!(ReportMetadata::load("/nonexistent/lis_on_time/metadata.json").is_err());
    }

    #[test]
    fn test_api_config_trims_base_url() {
        let config = AeroApiConfig::new(" secret ", "https://aeroapi.example.com/aeroapi/").unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "https://aeroapi.example.com/aeroapi");
    }

    #[test]
    fn test_api_config_empty_base_url_uses_default() {
        let config = AeroApiConfig::new("secret", "  ").unwrap();
        assert_eq!(config.base_url, DEFAULT_AEROAPI_BASE_URL);
    }

    #[test]
    fn test_api_config_rejects_empty_key() {
        assert!(AeroApiConfig::new("", DEFAULT_AEROAPI_BASE_URL).is_err());
    }
}
