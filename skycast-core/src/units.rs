//! Unit conversion and presentation formatting.
//!
//! All values are stored internally in metric units (°C, km/h, mm, hPa)
//! and converted on the way out, parameterized by [`UnitPreferences`].
//! Every formatter is total over `Option<f64>`: a missing value renders
//! as `"N/A"` and never panics.

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

/// Rendered in place of a missing measurement.
pub const NOT_AVAILABLE: &str = "N/A";

const KMH_TO_MPH: f64 = 0.621371;
const KMH_TO_MS: f64 = 0.277778;
const MM_TO_INCHES: f64 = 0.0393701;
const HPA_TO_INHG: f64 = 0.0295301;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindSpeedUnit {
    #[default]
    Kmh,
    Mph,
    Ms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationUnit {
    #[default]
    Mm,
    Inches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PressureUnit {
    #[default]
    Hpa,
    InHg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

macro_rules! unit_strings {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }

            pub const fn all() -> &'static [$ty] {
                &[$($ty::$variant,)+]
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = anyhow::Error;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value.to_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(anyhow::anyhow!(
                        "Unknown {} '{value}'. Supported: {}.",
                        stringify!($ty),
                        [$($name),+].join(", "),
                    )),
                }
            }
        }
    };
}

unit_strings!(TemperatureUnit { Celsius => "celsius", Fahrenheit => "fahrenheit" });
unit_strings!(WindSpeedUnit { Kmh => "kmh", Mph => "mph", Ms => "ms" });
unit_strings!(PrecipitationUnit { Mm => "mm", Inches => "inches" });
unit_strings!(PressureUnit { Hpa => "hpa", InHg => "inhg" });
unit_strings!(TimeFormat { TwelveHour => "12h", TwentyFourHour => "24h" });

/// The user's display units. Mutated only by explicit user action,
/// persisted with the config, and read by every formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UnitPreferences {
    pub temperature: TemperatureUnit,
    pub wind_speed: WindSpeedUnit,
    pub precipitation: PrecipitationUnit,
    pub pressure: PressureUnit,
    pub time_format: TimeFormat,
}

/// Round to one decimal, ties away from zero, and render the way a
/// dashboard expects: `10` rather than `10.0`, `6.2` rather than `6.20`.
fn one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

pub fn format_temperature(value: Option<f64>, unit: TemperatureUnit) -> String {
    let Some(celsius) = value else {
        return NOT_AVAILABLE.to_string();
    };

    match unit {
        TemperatureUnit::Celsius => format!("{}°C", celsius.round() as i64),
        TemperatureUnit::Fahrenheit => {
            let fahrenheit = celsius * 9.0 / 5.0 + 32.0;
            format!("{}°F", fahrenheit.round() as i64)
        }
    }
}

pub fn format_wind_speed(value: Option<f64>, unit: WindSpeedUnit) -> String {
    let Some(kmh) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let (converted, symbol) = match unit {
        WindSpeedUnit::Kmh => (kmh, "km/h"),
        WindSpeedUnit::Mph => (kmh * KMH_TO_MPH, "mph"),
        WindSpeedUnit::Ms => (kmh * KMH_TO_MS, "m/s"),
    };

    format!("{} {symbol}", one_decimal(converted))
}

pub fn format_precipitation(value: Option<f64>, unit: PrecipitationUnit) -> String {
    let Some(mm) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let (converted, symbol) = match unit {
        PrecipitationUnit::Mm => (mm, "mm"),
        PrecipitationUnit::Inches => (mm * MM_TO_INCHES, "inches"),
    };

    format!("{} {symbol}", one_decimal(converted))
}

pub fn format_pressure(value: Option<f64>, unit: PressureUnit) -> String {
    let Some(hpa) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let (converted, symbol) = match unit {
        PressureUnit::Hpa => (hpa, "hPa"),
        PressureUnit::InHg => (hpa * HPA_TO_INHG, "inHg"),
    };

    format!("{} {symbol}", one_decimal(converted))
}

/// `HH:MM` in 24-hour mode, unpadded hour plus AM/PM marker in 12-hour
/// mode (minutes are intentionally dropped there, matching the
/// dashboard's hourly strip).
pub fn format_time(time: DateTime<FixedOffset>, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
        TimeFormat::TwelveHour => {
            let (is_pm, hour) = time.hour12();
            format!("{} {}", hour, if is_pm { "PM" } else { "AM" })
        }
    }
}
