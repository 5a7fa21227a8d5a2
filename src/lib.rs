//! `TourGuide` - natural-language travel assistant
//!
//! This library turns one free-text travel question into a reply that
//! combines current weather (Open-Meteo) and nearby tourist attractions
//! (Overpass) for a place geocoded through Nominatim.

pub mod api;
pub mod assistant;
pub mod attractions;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod http;
pub mod intent;
pub mod logging;
pub mod models;
pub mod repl;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use assistant::{PlacesReport, TravelAssistant, WeatherReport};
pub use attractions::{AttractionFilter, AttractionFinder, OverpassClient};
pub use config::TourGuideConfig;
pub use error::{TourGuideError, Upstream};
pub use geocoding::{NominatimClient, PlaceResolver};
pub use intent::{Intent, IntentKeywords, detect_intents, extract_place};
pub use models::{AttractionList, ResolvedPlace, WeatherSnapshot};
pub use weather::{OpenMeteoClient, WeatherLookup};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library. `Ok` carries the payload,
/// `Err` a failure whose [`TourGuideError::user_message`] is shown to the user.
pub type Result<T> = std::result::Result<T, TourGuideError>;
