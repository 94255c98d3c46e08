use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// City name typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    /// Accepts any city name that is non-empty after trimming.
    pub fn new(city: &str) -> Result<Self, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }

        Ok(Self { city: city.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Provider local time, `YYYY-MM-DD HH:MM`.
    pub localtime: String,
}

impl Location {
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.localtime, "%Y-%m-%d %H:%M").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub code: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: Condition,
    pub precipitation_mm: f64,
    pub wind_kph: f64,
    pub humidity_pct: u8,
}

impl CurrentConditions {
    pub fn wind_speed_mps(&self) -> f64 {
        self.wind_kph / 3.6
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Date as sent by the provider, `YYYY-MM-DD`.
    pub date: String,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub condition: Condition,
    pub total_precipitation_mm: f64,
    pub chance_of_rain_pct: u8,
}

impl ForecastDay {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Decoded provider response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub location: Location,
    pub current: CurrentConditions,
    /// Ordered by date; `None` when the provider sent no forecast block.
    pub forecast: Option<Vec<ForecastDay>>,
}

/// State observed by the UI. Exactly one variant holds at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WeatherResult {
    #[default]
    Idle,
    Loading,
    Success(WeatherPayload),
    Error(String),
}

impl WeatherResult {
    /// Collapse a finished fetch into the terminal state it produces.
    pub fn from_outcome(outcome: Result<WeatherPayload, WeatherError>) -> Self {
        match outcome {
            Ok(payload) => WeatherResult::Success(payload),
            Err(err) => WeatherResult::Error(err.user_message()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WeatherResult::Loading)
    }

    pub fn payload(&self) -> Option<&WeatherPayload> {
        match self {
            WeatherResult::Success(payload) => Some(payload),
            _ => None,
        }
    }
}
