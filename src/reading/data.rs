//! Data structures for temperature readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The most recent temperature reading and when it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSnapshot {
    /// Temperature in degrees Fahrenheit
    pub temperature_f: f64,
    /// Wall-clock time at which the reading arrived
    pub observed_at: DateTime<Utc>,
}

impl Default for TemperatureSnapshot {
    fn default() -> Self {
        Self {
            temperature_f: 0.0,
            observed_at: DateTime::<Utc>::default(),
        }
    }
}

impl TemperatureSnapshot {
    /// Create a snapshot observed right now.
    pub fn now(temperature_f: f64) -> Self {
        Self {
            temperature_f,
            observed_at: Utc::now(),
        }
    }

    /// Whether a reading has been received since start-up.
    pub fn has_reading(&self) -> bool {
        self.observed_at > DateTime::<Utc>::default()
    }

    /// Temperature rounded to one decimal place, half-way values rounded up.
    pub fn rounded(&self) -> f64 {
        let rounded = (self.temperature_f * 10.0 + 0.5).floor() / 10.0;
        // Avoid rendering "-0"
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }
}

/// One line received from the microcontroller, e.g. `{"tempF": 72.3}`.
///
/// Any other fields on the line are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SerialRecord {
    #[serde(rename = "tempF")]
    pub temp_f: f64,
}

impl SerialRecord {
    /// Parse a single line. Fails on invalid JSON or a missing/non-numeric `tempF`.
    pub fn parse(line: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(line.trim())?)
    }
}

/// Contents of the persisted `temperature.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedReading {
    #[serde(rename = "tempF")]
    pub temp_f: String,
}

impl PersistedReading {
    pub fn new(temperature_f: f64) -> Self {
        Self {
            temp_f: temperature_f.to_string(),
        }
    }

    /// Compact JSON encoding, e.g. `{"tempF":"72.3"}`.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
