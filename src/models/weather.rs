//! Current-conditions snapshot

use serde::{Deserialize, Serialize};

/// Current temperature plus near-term rain probability.
///
/// `None` means the source did not report the value for this location,
/// not that the lookup failed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct WeatherSnapshot {
    /// Temperature in Celsius
    pub temperature_celsius: Option<f64>,
    /// Precipitation probability for the next hour, 0-100
    pub rain_chance_percent: Option<u8>,
}

impl WeatherSnapshot {
    /// Format temperature the way it is spoken in replies: always one
    /// fractional digit for whole numbers (`23.0`), shortest form otherwise.
    #[must_use]
    pub fn format_temperature(&self) -> Option<String> {
        self.temperature_celsius.map(|t| {
            if t.fract() == 0.0 {
                format!("{t:.1}")
            } else {
                format!("{t}")
            }
        })
    }
}
