//! Intent and place extraction from a free-text travel question
//!
//! Both rules are fixed string tests, not language understanding: the place
//! is whatever follows the first "to ", and intents are keyword membership.

use serde::{Deserialize, Serialize};

use crate::config::IntentsConfig;

const PLACE_ANCHOR: &[u8] = b"to ";
const PLACE_TERMINATORS: [char; 3] = [',', '?', '.'];

/// What the user asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Intent {
    pub wants_weather: bool,
    pub wants_places: bool,
}

impl Intent {
    /// Places-only when no keyword group matched
    #[must_use]
    pub fn or_places(self) -> Self {
        if self.wants_weather || self.wants_places {
            self
        } else {
            Self {
                wants_weather: false,
                wants_places: true,
            }
        }
    }
}

/// Keyword groups used by [`IntentKeywords::detect`]
#[derive(Debug, Clone)]
pub struct IntentKeywords {
    weather: Vec<String>,
    places: Vec<String>,
}

impl IntentKeywords {
    pub fn new<W, P>(weather: W, places: P) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Self {
            weather: lowercase_all(weather),
            places: lowercase_all(places),
        }
    }

    #[must_use]
    pub fn from_config(config: &IntentsConfig) -> Self {
        Self::new(&config.weather_keywords, &config.places_keywords)
    }

    /// Independent substring checks; both flags may be set.
    #[must_use]
    pub fn detect(&self, text: &str) -> Intent {
        let text = text.to_lowercase();
        let mentions = |words: &[String]| words.iter().any(|w| text.contains(w.as_str()));

        Intent {
            wants_weather: mentions(&self.weather),
            wants_places: mentions(&self.places),
        }
    }
}

impl Default for IntentKeywords {
    fn default() -> Self {
        Self::from_config(&IntentsConfig::default())
    }
}

fn lowercase_all<I>(words: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Detect intents with the built-in keyword groups
#[must_use]
pub fn detect_intents(text: &str) -> Intent {
    IntentKeywords::default().detect(text)
}

/// Text after the first case-insensitive "to ", cut at the first comma,
/// question mark or period and trimmed.
#[must_use]
pub fn extract_place(text: &str) -> Option<String> {
    let start = text
        .as_bytes()
        .windows(PLACE_ANCHOR.len())
        .position(|window| window.eq_ignore_ascii_case(PLACE_ANCHOR))?
        + PLACE_ANCHOR.len();

    // The anchor is ASCII, so `start` is a char boundary
    let rest = &text[start..];
    let end = rest.find(PLACE_TERMINATORS).unwrap_or(rest.len());
    let place = rest[..end].trim();

    if place.is_empty() {
        None
    } else {
        Some(place.to_string())
    }
}
