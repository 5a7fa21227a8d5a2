//! Place Resolution Module
//!
//! Turns a free-text place name into coordinates and a canonical display
//! name through the Nominatim search API. Every failure (transport, status,
//! undecodable body, empty match list, unusable coordinates) surfaces as the
//! same [`TourGuideError::NotFound`] so callers cannot tell them apart.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::{TourGuideError, Upstream};
use crate::models::ResolvedPlace;
use crate::{Result, http};

/// Geocodes a place name into a [`ResolvedPlace`]
#[async_trait]
pub trait PlaceResolver: Send + Sync {
    /// Resolve the query, failing with `NotFound` for any reason
    async fn resolve(&self, place_query: &str) -> Result<ResolvedPlace>;
}

/// Nominatim (OpenStreetMap) geocoding client
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

/// One search candidate. Nominatim reports coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(deserialize_with = "coordinate")]
    lat: f64,
    #[serde(deserialize_with = "coordinate")]
    lon: f64,
    display_name: Option<String>,
}

/// Accepts `"12.97"` as well as `12.97`
fn coordinate<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl NominatimClient {
    /// Create a new client from the geocoding settings
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = http::build_client(
            Duration::from_secs(config.timeout_seconds.into()),
            &config.user_agent,
        )?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search(&self, place_query: &str) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(place_query)
        );
        debug!("Nominatim request URL: {}", url);

        let response = http::send(Upstream::Geocoding, self.client.get(url)).await?;
        http::parse_json(Upstream::Geocoding, response).await
    }
}

#[async_trait]
impl PlaceResolver for NominatimClient {
    #[instrument(skip(self))]
    async fn resolve(&self, place_query: &str) -> Result<ResolvedPlace> {
        info!("Geocoding place: '{}'", place_query);

        let candidates = self.search(place_query).await.map_err(|e| {
            warn!("Geocoding '{}' failed: {}", place_query, e);
            TourGuideError::not_found(place_query)
        })?;

        let Some(first) = candidates.into_iter().next() else {
            warn!("No results found for place '{}'", place_query);
            return Err(TourGuideError::not_found(place_query));
        };

        let display_name = first
            .display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| place_query.to_string());

        let place = ResolvedPlace::new(first.lat, first.lon, display_name).ok_or_else(|| {
            warn!(
                "Geocoder returned out-of-range coordinates ({}, {}) for '{}'",
                first.lat, first.lon, place_query
            );
            TourGuideError::not_found(place_query)
        })?;

        debug!(
            "Resolved place: {} at ({})",
            place.display_name,
            place.format_coordinates()
        );
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NominatimClient {
        NominatimClient::new(&GeocodingConfig {
            base_url: server.uri(),
            timeout_seconds: 5,
            user_agent: "tourguide-test/1.0".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_first_candidate() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Bangalore"))
            .and(query_param("format", "json"))
            .and(query_param("limit", "1"))
            .and(header("user-agent", "tourguide-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "lat": "12.9767936",
                "lon": "77.590082",
                "display_name": "Bengaluru, Bangalore North, Karnataka, India"
            }])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server).resolve("Bangalore").await.unwrap();
        assert_eq!(place.latitude, 12.9767936);
        assert_eq!(place.longitude, 77.590082);
        assert_eq!(
            place.display_name,
            "Bengaluru, Bangalore North, Karnataka, India"
        );
    }

    #[tokio::test]
    async fn test_display_name_falls_back_to_query() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"lat": 48.85, "lon": 2.35}])),
            )
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server).resolve("Paris").await.unwrap();
        assert_eq!(place.display_name, "Paris");
        assert_eq!(place.latitude, 48.85);
    }

    #[tokio::test]
    async fn test_query_is_url_encoded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "São Paulo & Rio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "lat": "-23.55", "lon": "-46.63", "display_name": "São Paulo"
            }])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server)
            .resolve("São Paulo & Rio")
            .await
            .unwrap();
        assert_eq!(place.display_name, "São Paulo");
    }

    #[tokio::test]
    async fn test_every_failure_is_not_found() {
        let responses = [
            ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
            ResponseTemplate::new(500).set_body_string("internal error"),
            ResponseTemplate::new(200).set_body_string("not json"),
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"lat": "north", "lon": "1"}])),
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"lat": "95.0", "lon": "1"}])),
        ];

        for response in responses {
            let mock_server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(response)
                .mount(&mock_server)
                .await;

            let err = client_for(&mock_server)
                .resolve("Atlantis")
                .await
                .unwrap_err();
            assert!(err.is_not_found());
            assert_eq!(err.user_message(), "I don't know if this place exists.");
        }

        // Nothing listens on the discard port
        let unreachable = NominatimClient::new(&GeocodingConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 5,
            user_agent: "tourguide-test/1.0".to_string(),
        })
        .unwrap();
        let err = unreachable.resolve("Atlantis").await.unwrap_err();
        assert!(matches!(err, TourGuideError::NotFound { .. }));
    }
}
