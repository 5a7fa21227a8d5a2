//! Overpass API client for tourism-tagged map features

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::filter::{AttractionFilter, Tags};
use super::AttractionFinder;
use crate::config::AttractionsConfig;
use crate::error::Upstream;
use crate::models::AttractionList;
use crate::{Result, http};

/// Overpass interpreter client
pub struct OverpassClient {
    client: Client,
    base_url: String,
    radius_meters: u32,
    query_timeout_seconds: u32,
    filter: AttractionFilter,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    #[serde(default)]
    tags: Option<Tags>,
}

impl OverpassClient {
    /// Create a new client from the attraction settings
    pub fn new(config: &AttractionsConfig, user_agent: &str) -> Result<Self> {
        let client = http::build_client(
            Duration::from_secs(config.timeout_seconds.into()),
            user_agent,
        )?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            radius_meters: config.radius_meters,
            query_timeout_seconds: config.query_timeout_seconds,
            filter: AttractionFilter::from_config(config),
        })
    }

    /// Overpass QL for nodes, ways and relations carrying a `tourism` tag
    #[must_use]
    pub fn build_query(&self, latitude: f64, longitude: f64) -> String {
        let around = format!("around:{},{},{}", self.radius_meters, latitude, longitude);
        format!(
            "[out:json][timeout:{}];\n\
             (\n  \
             node[\"tourism\"]({around});\n  \
             way[\"tourism\"]({around});\n  \
             relation[\"tourism\"]({around});\n\
             );\n\
             out center;",
            self.query_timeout_seconds
        )
    }
}

#[async_trait]
impl AttractionFinder for OverpassClient {
    #[instrument(skip(self))]
    async fn find_attractions(
        &self,
        latitude: f64,
        longitude: f64,
        limit: usize,
    ) -> Result<AttractionList> {
        info!(
            "Searching attractions within {}m of ({:.4}, {:.4})",
            self.radius_meters, latitude, longitude
        );

        let query = self.build_query(latitude, longitude);
        debug!("Overpass query: {}", query);

        let request = self
            .client
            .post(format!("{}/interpreter", self.base_url))
            .form(&[("data", query.as_str())]);

        let response = http::send(Upstream::Attractions, request).await?;
        let body: OverpassResponse = http::parse_json(Upstream::Attractions, response).await?;

        let names = self
            .filter
            .select(body.elements.iter().filter_map(|e| e.tags.as_ref()), limit);

        info!(
            "Found {} attractions out of {} features",
            names.len(),
            body.elements.len()
        );
        Ok(AttractionList::new(names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TourGuideError;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OverpassClient {
        let config = AttractionsConfig {
            base_url: server.uri(),
            timeout_seconds: 5,
            ..AttractionsConfig::default()
        };
        OverpassClient::new(&config, "tourguide-test").unwrap()
    }

    #[test]
    fn test_build_query() {
        let client = OverpassClient::new(&AttractionsConfig::default(), "tourguide-test").unwrap();
        let query = client.build_query(12.5, 77.25);

        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains("node[\"tourism\"](around:5000,12.5,77.25);"));
        assert!(query.contains("way[\"tourism\"](around:5000,12.5,77.25);"));
        assert!(query.contains("relation[\"tourism\"](around:5000,12.5,77.25);"));
        assert!(query.ends_with("out center;"));
    }

    #[tokio::test]
    async fn test_find_attractions_filters_in_source_order() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/interpreter"))
            .and(body_string_contains("around%3A5000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "elements": [
                    {"type": "node", "id": 1, "tags": {"name": "Lalbagh", "leisure": "park", "tourism": "yes"}},
                    {"type": "node", "id": 2},
                    {"type": "way", "id": 3, "tags": {"name": "ITC Gardenia Hotel", "tourism": "hotel"}},
                    {"type": "node", "id": 4, "tags": {"name": "Government Museum", "tourism": "museum"}}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let list = client_for(&mock_server)
            .find_attractions(12.97, 77.59, 5)
            .await
            .unwrap();
        assert_eq!(list.names(), ["Lalbagh", "Government Museum"]);
    }

    #[tokio::test]
    async fn test_missing_elements_is_empty_list() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let list = client_for(&mock_server)
            .find_attractions(0.0, 0.0, 5)
            .await
            .unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_failures_have_distinct_diagnostics() {
        let cases = [
            (ResponseTemplate::new(429).set_body_string("rate limited"), "HTTP 429"),
            (ResponseTemplate::new(200).set_body_string("<?xml?>"), "malformed body"),
        ];

        for (response, expected) in cases {
            let mock_server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(response)
                .mount(&mock_server)
                .await;

            let err = client_for(&mock_server)
                .find_attractions(0.0, 0.0, 5)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                TourGuideError::UpstreamUnavailable {
                    service: Upstream::Attractions,
                    ..
                }
            ));
            assert!(err.to_string().contains(expected));
        }
    }
}
