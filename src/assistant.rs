//! Response composition over one travel question
//!
//! A query flows through place extraction, intent detection, the weather
//! and/or places sub-agents, and finally into a single reply string. Each
//! sub-agent resolves the place on its own, so a question asking for both
//! weather and attractions geocodes twice. A "place doesn't exist" outcome
//! from either sub-agent replaces the whole reply.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::attractions::{AttractionFinder, OverpassClient};
use crate::config::TourGuideConfig;
use crate::error::{TourGuideError, Upstream};
use crate::geocoding::{NominatimClient, PlaceResolver};
use crate::intent::{IntentKeywords, extract_place};
use crate::models::{AttractionList, ResolvedPlace, WeatherSnapshot};
use crate::weather::{OpenMeteoClient, WeatherLookup};
use crate::Result;

/// Payload of the weather sub-agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub place: ResolvedPlace,
    pub snapshot: WeatherSnapshot,
}

/// Payload of the places sub-agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacesReport {
    pub place: ResolvedPlace,
    pub attractions: AttractionList,
}

/// Orchestrates the collaborators into one reply per question
pub struct TravelAssistant {
    resolver: Arc<dyn PlaceResolver>,
    weather: Arc<dyn WeatherLookup>,
    attractions: Arc<dyn AttractionFinder>,
    keywords: IntentKeywords,
    attraction_limit: usize,
}

impl TravelAssistant {
    pub fn new(
        resolver: Arc<dyn PlaceResolver>,
        weather: Arc<dyn WeatherLookup>,
        attractions: Arc<dyn AttractionFinder>,
        keywords: IntentKeywords,
        attraction_limit: usize,
    ) -> Self {
        Self {
            resolver,
            weather,
            attractions,
            keywords,
            attraction_limit,
        }
    }

    /// Wire the Nominatim, Open-Meteo and Overpass clients from configuration
    pub fn from_config(config: &TourGuideConfig) -> Result<Self> {
        let user_agent = &config.geocoding.user_agent;

        Ok(Self::new(
            Arc::new(NominatimClient::new(&config.geocoding)?),
            Arc::new(OpenMeteoClient::new(&config.weather, user_agent)?),
            Arc::new(OverpassClient::new(&config.attractions, user_agent)?),
            IntentKeywords::from_config(&config.intents),
            config.attractions.limit,
        ))
    }

    /// Resolve the place, then fetch its current weather
    #[instrument(skip(self))]
    pub async fn weather_agent(&self, place: &str) -> Result<WeatherReport> {
        let resolved = self.resolver.resolve(place).await?;

        let snapshot = self
            .weather
            .fetch_weather(resolved.latitude, resolved.longitude)
            .await
            .map_err(|e| match e {
                TourGuideError::UpstreamUnavailable {
                    service: Upstream::Weather,
                    ..
                } => e,
                other => TourGuideError::upstream(Upstream::Weather, other.to_string()),
            })?;

        Ok(WeatherReport {
            place: resolved,
            snapshot,
        })
    }

    /// Resolve the place, then look for attractions around it
    #[instrument(skip(self))]
    pub async fn places_agent(&self, place: &str) -> Result<PlacesReport> {
        let resolved = self.resolver.resolve(place).await?;

        let attractions = match self
            .attractions
            .find_attractions(resolved.latitude, resolved.longitude, self.attraction_limit)
            .await
        {
            Ok(list) => list,
            Err(e) => {
                warn!("Attraction search near {} failed: {}", resolved.display_name, e);
                AttractionList::default()
            }
        };

        if attractions.is_empty() {
            return Err(TourGuideError::no_results(resolved.display_name));
        }

        Ok(PlacesReport {
            place: resolved,
            attractions,
        })
    }

    /// Answer one free-text question. Never fails: every recoverable
    /// condition becomes a sentence.
    #[instrument(skip(self))]
    pub async fn reply(&self, text: &str) -> String {
        let Some(place) = extract_place(text) else {
            info!("No place found in query");
            return TourGuideError::malformed_input(text).user_message();
        };

        let intent = self.keywords.detect(text).or_places();
        debug!("Place '{}' with intent {:?}", place, intent);

        let weather = if intent.wants_weather {
            Some(self.weather_agent(&place).await)
        } else {
            None
        };

        let places = if intent.wants_places {
            Some(self.places_agent(&place).await)
        } else {
            None
        };

        if let Some(message) = not_found_message(weather.as_ref()) {
            return message;
        }
        if let Some(message) = not_found_message(places.as_ref()) {
            return message;
        }

        let mut parts = Vec::new();

        if let Some(outcome) = weather {
            parts.push(match outcome {
                Ok(report) => weather_clause(&place, &report.snapshot),
                Err(e) => e.user_message(),
            });
        }

        if let Some(outcome) = places {
            parts.push(match outcome {
                Ok(report) => places_clause(&place, &report.attractions, intent.wants_weather),
                Err(e) => e.user_message(),
            });
        }

        parts.join(" ")
    }
}

fn not_found_message<T>(outcome: Option<&Result<T>>) -> Option<String> {
    match outcome {
        Some(Err(e)) if e.is_not_found() => Some(e.user_message()),
        _ => None,
    }
}

fn weather_clause(place: &str, snapshot: &WeatherSnapshot) -> String {
    let rain = snapshot
        .rain_chance_percent
        .map(|chance| format!(" with a chance of {chance}% to rain"))
        .unwrap_or_default();

    match snapshot.format_temperature() {
        Some(temperature) => format!("In {place} it's currently {temperature}°C{rain}."),
        None => format!("In {place} the current temperature isn't available{rain}."),
    }
}

fn places_clause(place: &str, attractions: &AttractionList, after_weather: bool) -> String {
    if after_weather {
        format!("And these are the places you can go:\n{}", attractions.to_lines())
    } else {
        format!(
            "In {place} these are the places you can go,\n{}",
            attractions.to_lines()
        )
    }
}

/// Run [`TravelAssistant::reply`] on its own task so a panic anywhere in
/// composition still yields a reply.
pub async fn reply_guarded(assistant: Arc<TravelAssistant>, query: String) -> String {
    match tokio::spawn(async move { assistant.reply(&query).await }).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Composing a reply failed: {}", e);
            format!("Something went wrong while processing your query: {e}")
        }
    }
}
