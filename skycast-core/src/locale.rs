//! Locale selection, string catalogs and localized date names.
//!
//! A two-letter code picks both the catalog and the weekday/month
//! names; anything unsupported falls back to English.

use chrono::{DateTime, Datelike, FixedOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    /// Parse a locale code, falling back to English for unsupported
    /// codes. Region suffixes ("de-AT") select by language.
    pub fn from_code(code: &str) -> Self {
        match code.get(..2).map(str::to_lowercase).as_deref() {
            Some("de") => Locale::De,
            _ => Locale::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }

    pub const fn all() -> &'static [Locale] {
        &[Locale::En, Locale::De]
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The dashboard's translatable labels.
#[derive(Debug)]
pub struct Messages {
    pub feels_like: &'static str,
    pub humidity: &'static str,
    pub wind: &'static str,
    pub pressure: &'static str,
    pub precipitation: &'static str,
    pub cloud_cover: &'static str,
    pub chance_of_rain: &'static str,
    pub sunrise: &'static str,
    pub sunset: &'static str,
    pub today: &'static str,
    pub weather_unavailable: &'static str,
}

static MESSAGES_EN: Messages = Messages {
    feels_like: "Feels like",
    humidity: "Humidity",
    wind: "Wind",
    pressure: "Pressure",
    precipitation: "Precipitation",
    cloud_cover: "Cloud cover",
    chance_of_rain: "Chance of rain",
    sunrise: "Sunrise",
    sunset: "Sunset",
    today: "Today",
    weather_unavailable: "Weather data is currently unavailable",
};

static MESSAGES_DE: Messages = Messages {
    feels_like: "Gefühlt",
    humidity: "Luftfeuchtigkeit",
    wind: "Wind",
    pressure: "Luftdruck",
    precipitation: "Niederschlag",
    cloud_cover: "Bewölkung",
    chance_of_rain: "Regenwahrscheinlichkeit",
    sunrise: "Sonnenaufgang",
    sunset: "Sonnenuntergang",
    today: "Heute",
    weather_unavailable: "Wetterdaten sind derzeit nicht verfügbar",
};

pub fn messages(locale: Locale) -> &'static Messages {
    match locale {
        Locale::En => &MESSAGES_EN,
        Locale::De => &MESSAGES_DE,
    }
}

const WEEKDAYS_EN: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const WEEKDAYS_SHORT_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const WEEKDAYS_DE: [&str; 7] = [
    "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
];
const WEEKDAYS_SHORT_DE: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_DE: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];

/// Localized weekday name, long or abbreviated.
pub fn weekday_name(date: DateTime<FixedOffset>, locale: Locale, long: bool) -> &'static str {
    let index = date.weekday().num_days_from_monday() as usize;
    match (locale, long) {
        (Locale::En, true) => WEEKDAYS_EN[index],
        (Locale::En, false) => WEEKDAYS_SHORT_EN[index],
        (Locale::De, true) => WEEKDAYS_DE[index],
        (Locale::De, false) => WEEKDAYS_SHORT_DE[index],
    }
}

/// The dashboard's date line: "Sunday, 15 June 2025".
pub fn format_date(date: DateTime<FixedOffset>, locale: Locale) -> String {
    let month = match locale {
        Locale::En => MONTHS_EN[date.month0() as usize],
        Locale::De => MONTHS_DE[date.month0() as usize],
    };
    format!(
        "{}, {} {} {}",
        weekday_name(date, locale, true),
        date.day(),
        month,
        date.year()
    )
}
