//! Error types and handling for the `TourGuide` assistant

use std::fmt;

use thiserror::Error;

/// Sentence returned whenever a destination cannot be geocoded.
pub const PLACE_NOT_FOUND_MESSAGE: &str = "I don't know if this place exists.";

/// Sentence returned when the weather service gives no usable answer.
pub const WEATHER_UNAVAILABLE_MESSAGE: &str = "I couldn't fetch weather data right now.";

/// Sentence returned when no destination can be read from the user's text.
pub const MALFORMED_INPUT_MESSAGE: &str =
    "I couldn't understand which place you want to go. Please type clearly.";

/// External collaborator an upstream failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Geocoding,
    Weather,
    Attractions,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Upstream::Geocoding => "geocoding service",
            Upstream::Weather => "weather service",
            Upstream::Attractions => "attractions service",
        };
        f.write_str(name)
    }
}

/// Main error type for the `TourGuide` assistant
#[derive(Error, Debug)]
pub enum TourGuideError {
    /// The place could not be geocoded
    #[error("Place not found: {query}")]
    NotFound { query: String },

    /// Transport error, bad status or malformed body from a collaborator
    #[error("{service} unavailable: {message}")]
    UpstreamUnavailable { service: Upstream, message: String },

    /// Filtering and fallback both produced no attractions
    #[error("No attractions found near {place}")]
    NoResults { place: String },

    /// No place could be extracted from the user's sentence
    #[error("Invalid input: no place found in '{input}'")]
    MalformedInput { input: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl TourGuideError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new upstream error for the given collaborator
    pub fn upstream<S: Into<String>>(service: Upstream, message: S) -> Self {
        Self::UpstreamUnavailable {
            service,
            message: message.into(),
        }
    }

    /// Create a new no-results error
    pub fn no_results<S: Into<String>>(place: S) -> Self {
        Self::NoResults {
            place: place.into(),
        }
    }

    /// Create a new malformed-input error
    pub fn malformed_input<S: Into<String>>(input: S) -> Self {
        Self::MalformedInput {
            input: input.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this failure means the destination does not exist.
    ///
    /// Covers every error whose [`user_message`](Self::user_message) is
    /// [`PLACE_NOT_FOUND_MESSAGE`], including geocoding upstream failures.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TourGuideError::NotFound { .. }
                | TourGuideError::UpstreamUnavailable {
                    service: Upstream::Geocoding,
                    ..
                }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TourGuideError::NotFound { .. } => PLACE_NOT_FOUND_MESSAGE.to_string(),
            TourGuideError::UpstreamUnavailable { service, .. } => match service {
                Upstream::Geocoding => PLACE_NOT_FOUND_MESSAGE.to_string(),
                Upstream::Weather => WEATHER_UNAVAILABLE_MESSAGE.to_string(),
                // Finder failures reach users as NoResults
                Upstream::Attractions => self.to_string(),
            },
            TourGuideError::NoResults { place } => {
                format!("I couldn't find popular tourist places near {place}.")
            }
            TourGuideError::MalformedInput { .. } => MALFORMED_INPUT_MESSAGE.to_string(),
            TourGuideError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}
