use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::WeatherError,
    model::Coordinates,
    provider::{CURRENT_CHANNELS, DAILY_CHANNELS, ForecastProvider, HOURLY_CHANNELS, RawForecast},
};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const FORECAST_DAYS: u32 = 7;

/// HTTP client for the Open-Meteo forecast API.
///
/// The request always carries `timezone=auto`: the provider resolves
/// the location's zone and reports `utc_offset_seconds`, which the
/// normalization layer applies exactly once. The base URL is
/// injectable so tests can point at a local mock server.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch_forecast(&self, coordinates: Coordinates) -> Result<RawForecast, WeatherError> {
        tracing::debug!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "fetching forecast"
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("timezone", "auto".to_string()),
                ("current", CURRENT_CHANNELS.join(",")),
                ("hourly", HOURLY_CHANNELS.join(",")),
                ("daily", DAILY_CHANNELS.join(",")),
            ])
            .send()
            .await?
            .error_for_status()?;

        // One entry per requested location; we always request exactly one.
        let mut entries: Vec<RawForecast> = response.json().await?;

        if entries.is_empty() {
            return Err(WeatherError::EmptyResponse);
        }

        Ok(entries.swap_remove(0))
    }
}
