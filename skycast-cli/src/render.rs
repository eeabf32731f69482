//! Turns a normalized snapshot into terminal output.
//!
//! Everything here is a pure string builder over core data; the only
//! notion of "now" is the provider's current-block timestamp, which
//! keeps rendering deterministic and testable.

use std::fmt::Write;

use skycast_core::locale::{format_date, messages, weekday_name};
use skycast_core::units::{
    format_precipitation, format_pressure, format_temperature, format_time, format_wind_speed,
};
use skycast_core::{Config, Location, WeatherSnapshot, daylight, weather_code_to_icon};

/// Render the full dashboard: current conditions, the hourly strip for
/// the selected day, and the daily outlook.
pub fn dashboard(
    snapshot: &WeatherSnapshot,
    location: &Location,
    config: &Config,
    day: usize,
) -> String {
    let units = &config.units;
    let locale = config.locale();
    let m = messages(locale);
    let now = snapshot.current.time;
    let current = &snapshot.current;

    let mut out = String::new();

    let _ = writeln!(out, "{}", location.name);
    let _ = writeln!(
        out,
        "{}, {}",
        format_date(now, locale),
        format_time(now, units.time_format)
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "[{}] {}  ({} {})",
        weather_code_to_icon(current.weather_code, current.is_day),
        format_temperature(Some(current.temperature_2m), units.temperature),
        m.feels_like,
        format_temperature(Some(current.apparent_temperature), units.temperature),
    );
    let _ = writeln!(
        out,
        "{}: {}%   {}: {}   {}: {}",
        m.humidity,
        current.relative_humidity_2m,
        m.wind,
        format_wind_speed(Some(current.wind_speed_10m), units.wind_speed),
        m.pressure,
        format_pressure(Some(current.pressure_msl), units.pressure),
    );
    let _ = writeln!(
        out,
        "{}: {}   {}: {}%",
        m.precipitation,
        format_precipitation(Some(current.precipitation), units.precipitation),
        m.cloud_cover,
        current.cloud_cover,
    );

    let hours = daylight::hourly_for_day(snapshot, day);
    if !hours.is_empty() {
        let _ = writeln!(out);
        for hour in &hours {
            let _ = writeln!(
                out,
                "{:>5}  [{}] {:>6}  {}: {}%",
                format_time(hour.time, units.time_format),
                weather_code_to_icon(hour.weather_code, hour.is_day),
                format_temperature(Some(hour.temperature_2m), units.temperature),
                m.chance_of_rain,
                hour.precipitation_probability,
            );
        }
    }

    if !snapshot.daily.is_empty() {
        let now_is_day = daylight::is_daytime(snapshot, now);
        let _ = writeln!(out);
        for (i, date) in snapshot.daily.time.iter().enumerate() {
            let label = if date.date_naive() == now.date_naive() {
                m.today
            } else {
                weekday_name(*date, locale, false)
            };
            let is_day = daylight::is_day_for_daily_index(snapshot, i, now, now_is_day);

            let _ = writeln!(
                out,
                "{label:>6}  [{}] {} / {}   {}: {}   {}: {}  {}: {}",
                weather_code_to_icon(snapshot.daily.weather_code[i], is_day),
                format_temperature(Some(snapshot.daily.temperature_2m_min[i]), units.temperature),
                format_temperature(Some(snapshot.daily.temperature_2m_max[i]), units.temperature),
                m.precipitation,
                format_precipitation(Some(snapshot.daily.precipitation_sum[i]), units.precipitation),
                m.sunrise,
                format_time(snapshot.daily.sunrise[i], units.time_format),
                m.sunset,
                format_time(snapshot.daily.sunset[i], units.time_format),
            );
        }
    }

    out
}
