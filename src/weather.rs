//! Weather lookup against the Open-Meteo forecast API
//!
//! Only a missing current-conditions block counts as a failure. Missing
//! temperature or an absent/empty hourly precipitation series degrade to
//! `None` fields in the [`WeatherSnapshot`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::error::{TourGuideError, Upstream};
use crate::models::WeatherSnapshot;
use crate::{Result, http};

/// Current conditions for a pair of coordinates
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn fetch_weather(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot>;
}

/// Open-Meteo forecast client (no API key required)
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Create a new client from the weather settings
    pub fn new(config: &WeatherConfig, user_agent: &str) -> Result<Self> {
        let client = http::build_client(
            Duration::from_secs(config.timeout_seconds.into()),
            user_agent,
        )?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl WeatherLookup for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        info!(
            "Getting current weather for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );

        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current_weather=true&hourly=precipitation_probability",
            self.base_url, latitude, longitude
        );
        debug!("Open-Meteo request URL: {}", url);

        let response = http::send(Upstream::Weather, self.client.get(url)).await?;
        let forecast: openmeteo::ForecastResponse =
            http::parse_json(Upstream::Weather, response).await?;

        let snapshot = forecast.into_snapshot().ok_or_else(|| {
            warn!(
                "No current weather block for coordinates {:.4}, {:.4}",
                latitude, longitude
            );
            TourGuideError::upstream(Upstream::Weather, "response lacks current conditions")
        })?;

        debug!("Weather snapshot: {:?}", snapshot);
        Ok(snapshot)
    }
}

/// `OpenMeteo` API response structures and conversion utilities
mod openmeteo {
    use super::WeatherSnapshot;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current_weather: Option<CurrentWeather>,
        pub hourly: Option<HourlyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentWeather {
        pub temperature: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct HourlyData {
        pub precipitation_probability: Option<Vec<Option<f64>>>,
    }

    impl ForecastResponse {
        /// `None` when the current-conditions block is missing
        pub fn into_snapshot(self) -> Option<WeatherSnapshot> {
            let current = self.current_weather?;

            // First entry of the hourly series is the next applicable hour
            let rain_chance_percent = self
                .hourly
                .and_then(|hourly| hourly.precipitation_probability)
                .and_then(|series| series.into_iter().next())
                .flatten()
                .map(|p| p.round().clamp(0.0, 100.0) as u8);

            Some(WeatherSnapshot {
                temperature_celsius: current.temperature,
                rain_chance_percent,
            })
        }
    }
}
