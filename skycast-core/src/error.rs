use thiserror::Error;

/// Failures surfaced by the weather core.
///
/// Everything here is caught at the dashboard/CLI boundary and turned
/// into a single user-visible message; reverse-geocode failures are
/// swallowed by their call sites and never reach the user at all.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Geolocation is not supported in this environment")]
    GeolocationUnsupported,

    #[error("Geolocation request timed out")]
    GeolocationTimeout,

    #[error("No weather data received")]
    EmptyResponse,

    #[error("Incomplete weather data received: {0}")]
    IncompleteData(String),

    #[error("Failed to resolve location name: {0}")]
    ReverseGeocode(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
