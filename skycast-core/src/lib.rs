//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration and persisted user settings
//! - The forecast provider abstraction and the Open-Meteo client
//! - Normalization of raw channel arrays into typed forecast records
//! - Unit conversion, formatting and day/night icon derivation
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod dashboard;
pub mod daylight;
pub mod error;
pub mod geocode;
pub mod geolocate;
pub mod icons;
pub mod locale;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod units;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::WeatherError;
pub use icons::weather_code_to_icon;
pub use locale::Locale;
pub use model::{
    Coordinates, CurrentConditions, DailyForecast, HourlyForecast, Location, WeatherSnapshot,
};
pub use provider::{ForecastProvider, RawForecast, open_meteo::OpenMeteoProvider};
pub use units::UnitPreferences;
