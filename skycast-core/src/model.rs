use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A point on the globe. Latitude in [-90, 90], longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The single "current location" slot: coordinates plus a display name.
///
/// Created from the configured default, a geolocation fix, or manual
/// entry. There is no location history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Current conditions at the requested location.
///
/// Field names follow the provider channel names so a value can be
/// traced back to the channel it came from. Continuous quantities are
/// rounded to one decimal during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub time: DateTime<FixedOffset>,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    pub precipitation: f64,
    pub rain: f64,
    pub weather_code: i32,
    pub cloud_cover: f64,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    pub pressure_msl: f64,
    pub is_day: bool,
}

/// Hour-by-hour forecast as a struct of arrays.
///
/// Every vector has the same length as `time`; index `i` across all
/// channels refers to the same hour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyForecast {
    pub time: Vec<DateTime<FixedOffset>>,
    pub temperature_2m: Vec<f64>,
    pub precipitation_probability: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub weather_code: Vec<i32>,
    pub relative_humidity_2m: Vec<f64>,
    pub wind_speed_10m: Vec<f64>,
    pub is_day: Vec<bool>,
}

impl HourlyForecast {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Day-by-day forecast as a struct of arrays, co-indexed by `time`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyForecast {
    pub time: Vec<DateTime<FixedOffset>>,
    pub weather_code: Vec<i32>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    pub relative_humidity_2m_max: Vec<f64>,
    pub relative_humidity_2m_min: Vec<f64>,
    pub wind_speed_10m_max: Vec<f64>,
    pub sunrise: Vec<DateTime<FixedOffset>>,
    pub sunset: Vec<DateTime<FixedOffset>>,
}

impl DailyForecast {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// One fully normalized forecast for one location.
///
/// Recomputed whole on every location change and swapped in atomically;
/// readers never observe a mix of old and new granularities.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub hourly: HourlyForecast,
    pub daily: DailyForecast,
}
