//! Configuration management for the `TourGuide` assistant
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. Keyword sets,
//! filter lists and the user agent live here so components receive them
//! at construction instead of reading module-level globals.

use crate::TourGuideError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TourGuide` assistant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TourGuideConfig {
    /// Geocoding (Nominatim) settings
    pub geocoding: GeocodingConfig,
    /// Weather (Open-Meteo) settings
    pub weather: WeatherConfig,
    /// Attraction search (Overpass) settings
    pub attractions: AttractionsConfig,
    /// Intent keyword sets
    pub intents: IntentsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Geocoding API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
    /// Identifying User-Agent header (required by Nominatim's usage policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Attraction search configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionsConfig {
    /// Base URL for the Overpass API
    #[serde(default = "default_attractions_base_url")]
    pub base_url: String,
    /// Client-side request timeout in seconds
    #[serde(default = "default_attractions_timeout")]
    pub timeout_seconds: u32,
    /// Server-side query timeout in seconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout_seconds: u32,
    /// Search radius in meters
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,
    /// Maximum number of attractions to return
    #[serde(default = "default_attraction_limit")]
    pub limit: usize,
    /// Lowercase substrings that mark a name as lodging, food or retail
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,
    /// Accepted values of the `tourism` tag
    #[serde(default = "default_tourism_allowlist")]
    pub tourism_allowlist: Vec<String>,
    /// Accepted values of the `leisure` tag
    #[serde(default = "default_leisure_allowlist")]
    pub leisure_allowlist: Vec<String>,
}

/// Keyword sets used for intent detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentsConfig {
    /// Substrings that signal a weather question
    #[serde(default = "default_weather_keywords")]
    pub weather_keywords: Vec<String>,
    /// Substrings that signal an attractions question
    #[serde(default = "default_places_keywords")]
    pub places_keywords: Vec<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    format!("tourguide/{}", crate::VERSION)
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_attractions_base_url() -> String {
    "https://overpass-api.de/api".to_string()
}

fn default_attractions_timeout() -> u32 {
    30
}

fn default_query_timeout() -> u32 {
    25
}

fn default_radius_meters() -> u32 {
    5000
}

fn default_attraction_limit() -> usize {
    5
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn default_denylist() -> Vec<String> {
    to_strings(&[
        "hotel",
        "lodge",
        "residency",
        "resort",
        "inn",
        "guest",
        "pg",
        "mens pg",
        "ladies pg",
        "restaurant",
        "bar",
        "cafe",
        "shop",
    ])
}

fn default_tourism_allowlist() -> Vec<String> {
    to_strings(&[
        "attraction",
        "museum",
        "gallery",
        "theme_park",
        "zoo",
        "viewpoint",
        "park",
        "monument",
        "heritage",
    ])
}

fn default_leisure_allowlist() -> Vec<String> {
    to_strings(&["park"])
}

fn default_weather_keywords() -> Vec<String> {
    to_strings(&["temperature", "weather", "hot", "cold"])
}

fn default_places_keywords() -> Vec<String> {
    to_strings(&["places", "visit", "trip", "plan", "go"])
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_geocoding_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for AttractionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_attractions_base_url(),
            timeout_seconds: default_attractions_timeout(),
            query_timeout_seconds: default_query_timeout(),
            radius_meters: default_radius_meters(),
            limit: default_attraction_limit(),
            denylist: default_denylist(),
            tourism_allowlist: default_tourism_allowlist(),
            leisure_allowlist: default_leisure_allowlist(),
        }
    }
}

impl Default for IntentsConfig {
    fn default() -> Self {
        Self {
            weather_keywords: default_weather_keywords(),
            places_keywords: default_places_keywords(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TourGuideConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TOURGUIDE_WEATHER__TIMEOUT_SECONDS=5
        builder = builder.add_source(
            Environment::with_prefix("TOURGUIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TourGuideConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tourguide").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_geocoding_timeout();
        }
        if self.geocoding.user_agent.trim().is_empty() {
            self.geocoding.user_agent = default_user_agent();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.attractions.base_url.is_empty() {
            self.attractions.base_url = default_attractions_base_url();
        }
        if self.attractions.timeout_seconds == 0 {
            self.attractions.timeout_seconds = default_attractions_timeout();
        }
        if self.attractions.query_timeout_seconds == 0 {
            self.attractions.query_timeout_seconds = default_query_timeout();
        }
        if self.attractions.radius_meters == 0 {
            self.attractions.radius_meters = default_radius_meters();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_keyword_sets()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        let timeouts = [
            ("Geocoding", self.geocoding.timeout_seconds),
            ("Weather", self.weather.timeout_seconds),
            ("Attractions", self.attractions.timeout_seconds),
        ];
        for (name, seconds) in timeouts {
            if seconds > 300 {
                return Err(TourGuideError::config(format!(
                    "{name} API timeout cannot exceed 300 seconds"
                ))
                .into());
            }
        }

        if self.attractions.query_timeout_seconds > self.attractions.timeout_seconds {
            return Err(TourGuideError::config(
                "Attractions query timeout cannot exceed the request timeout",
            )
            .into());
        }

        if self.attractions.radius_meters > 50_000 {
            return Err(
                TourGuideError::config("Search radius cannot exceed 50000 meters").into(),
            );
        }

        if self.attractions.limit == 0 || self.attractions.limit > 50 {
            return Err(
                TourGuideError::config("Attraction limit must be between 1 and 50").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TourGuideError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TourGuideError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let base_urls = [
            ("Geocoding", &self.geocoding.base_url),
            ("Weather", &self.weather.base_url),
            ("Attractions", &self.attractions.base_url),
        ];
        for (name, url) in base_urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TourGuideError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate keyword and category sets
    fn validate_keyword_sets(&self) -> Result<()> {
        if self.intents.weather_keywords.is_empty() || self.intents.places_keywords.is_empty() {
            return Err(TourGuideError::config("Intent keyword sets cannot be empty").into());
        }

        if self.attractions.tourism_allowlist.is_empty()
            && self.attractions.leisure_allowlist.is_empty()
        {
            return Err(TourGuideError::config(
                "At least one tourism or leisure category must be allowed",
            )
            .into());
        }

        Ok(())
    }
}
