//! Forecast provider abstraction and the raw wire shape it returns.
//!
//! The provider is an external collaborator: it answers one request per
//! location with a set of granularity sections ("current", "hourly",
//! "daily"), each carrying a base epoch, an optional end epoch, a
//! sampling interval, and a map of named value channels. Everything
//! downstream of the fetch works on [`RawForecast`].

use async_trait::async_trait;
use serde::Deserialize;
use std::{collections::BTreeMap, fmt::Debug};

use crate::{error::WeatherError, model::Coordinates};

pub mod open_meteo;

/// Channel lists in request order, one table per granularity.
///
/// The same tables build the comma-joined request parameters and drive
/// extraction by name during normalization, so the request and the
/// parser cannot drift apart when a channel is added or removed.
pub const CURRENT_CHANNELS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "precipitation",
    "rain",
    "weather_code",
    "cloud_cover",
    "wind_speed_10m",
    "wind_direction_10m",
    "pressure_msl",
    "is_day",
];

pub const HOURLY_CHANNELS: &[&str] = &[
    "temperature_2m",
    "precipitation_probability",
    "precipitation",
    "weather_code",
    "relative_humidity_2m",
    "wind_speed_10m",
    "is_day",
];

pub const DAILY_CHANNELS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "relative_humidity_2m_max",
    "relative_humidity_2m_min",
    "wind_speed_10m_max",
    "sunrise",
    "sunset",
];

/// One named channel: a scalar for the current block, a flat array for
/// hourly/daily blocks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChannelValues {
    Scalar(f64),
    Series(Vec<f64>),
}

/// One granularity block of the provider response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSection {
    /// Base epoch of the block, seconds.
    pub time: i64,
    /// End epoch (exclusive); absent for the current block.
    #[serde(default)]
    pub time_end: Option<i64>,
    /// Sampling interval, seconds.
    pub interval: i64,
    /// Named value channels, keyed by the request channel name.
    #[serde(flatten)]
    pub channels: BTreeMap<String, ChannelValues>,
}

impl RawSection {
    /// Scalar channel by name; `None` when absent or array-valued.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        match self.channels.get(name)? {
            ChannelValues::Scalar(v) => Some(*v),
            ChannelValues::Series(_) => None,
        }
    }

    /// Array channel by name; `None` when absent or scalar-valued.
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        match self.channels.get(name)? {
            ChannelValues::Series(values) => Some(values.as_slice()),
            ChannelValues::Scalar(_) => None,
        }
    }
}

/// Raw provider response for one location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecast {
    pub latitude: f64,
    pub longitude: f64,
    /// Offset applied when converting epochs to wall-clock instants.
    pub utc_offset_seconds: i32,
    #[serde(default)]
    pub current: Option<RawSection>,
    #[serde(default)]
    pub hourly: Option<RawSection>,
    #[serde(default)]
    pub daily: Option<RawSection>,
}

/// Seam between the dashboard and the forecast backend. Implemented by
/// [`open_meteo::OpenMeteoProvider`] in production and by in-memory
/// fakes in tests.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, coordinates: Coordinates) -> Result<RawForecast, WeatherError>;
}
