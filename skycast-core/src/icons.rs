//! WMO weather code to icon mapping.
//!
//! Codes follow the WMO interpretation table published with the
//! Open-Meteo docs. Light variants of drizzle/rain/snow get the
//! "partly-cloudy" composite icon; anything unmapped falls back to
//! `not-available`.

/// Icon name for a weather code, crossed with day/night state.
pub fn weather_code_to_icon(code: i32, is_day: bool) -> &'static str {
    let day_night = |day, night| if is_day { day } else { night };

    match code {
        // Clear sky
        0 => day_night("clear-day", "clear-night"),
        // Mainly clear, partly cloudy
        1 | 2 => day_night("partly-cloudy-day", "partly-cloudy-night"),
        // Overcast
        3 => day_night("overcast-day", "overcast-night"),
        // Fog and depositing rime fog
        45..=48 => day_night("fog-day", "fog-night"),
        // Drizzle: light, moderate, dense
        51 => day_night("partly-cloudy-day-drizzle", "partly-cloudy-night-drizzle"),
        52..=55 => "drizzle",
        // Freezing drizzle
        56 | 57 => "sleet",
        // Rain: slight, moderate, heavy
        61 => day_night("partly-cloudy-day-rain", "partly-cloudy-night-rain"),
        62..=65 => "rain",
        // Freezing rain
        66 | 67 => "sleet",
        // Snowfall: slight, moderate, heavy
        71 => day_night("partly-cloudy-day-snow", "partly-cloudy-night-snow"),
        72..=75 => "snow",
        // Snow grains
        77 => "snow",
        // Rain showers: slight, moderate, violent
        80 => day_night("partly-cloudy-day-rain", "partly-cloudy-night-rain"),
        81 | 82 => "rain",
        // Snow showers: slight, heavy
        85 => day_night("partly-cloudy-day-snow", "partly-cloudy-night-snow"),
        86 => "snow",
        // Thunderstorm, with slight/heavy hail
        95 | 96 | 99 => day_night("thunderstorms-day", "thunderstorms-night"),
        97 | 98 => "thunderstorms",
        _ => "not-available",
    }
}
