//! Dashboard state: one location, one snapshot, one error slot.
//!
//! Provider failures stop here. They are logged, turned into a single
//! user-visible message and reset the loading flag; nothing below the
//! dashboard ever sees an unhandled fetch failure. There is no retry
//! logic: only a new explicit trigger (another refresh or a location
//! change) fetches again.

use crate::{
    error::WeatherError,
    model::{Location, WeatherSnapshot},
    normalize,
    provider::ForecastProvider,
};

#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn ForecastProvider>,
    location: Location,
    weather: Option<WeatherSnapshot>,
    loading: bool,
    error: Option<String>,
}

impl Dashboard {
    pub fn new(provider: Box<dyn ForecastProvider>, location: Location) -> Self {
        Self {
            provider,
            location,
            weather: None,
            loading: false,
            error: None,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch and normalize a forecast for the current location.
    ///
    /// The snapshot is replaced in one assignment; on failure the
    /// previous snapshot stays visible alongside the error message.
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.error = None;

        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                self.weather = Some(snapshot);
            }
            Err(e) => {
                tracing::error!("failed to fetch weather data: {e}");
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
    }

    /// Replace the current location and refetch. The later of two
    /// overlapping refreshes wins; earlier results are simply
    /// overwritten, never merged.
    pub async fn set_location(&mut self, location: Location) {
        self.location = location;
        self.refresh().await;
    }

    async fn fetch_snapshot(&self) -> Result<WeatherSnapshot, WeatherError> {
        let raw = self
            .provider
            .fetch_forecast(self.location.coordinates())
            .await?;
        normalize::normalize(&raw)
    }
}
