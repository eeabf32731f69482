//! Day/night derivation and per-day hourly slicing over a snapshot.

use chrono::{DateTime, FixedOffset, Timelike};

use crate::model::WeatherSnapshot;

/// Whether `now` falls in daytime, in priority order:
///
/// 1. the hourly day-flag for the hour bucket containing `now`;
/// 2. today's sunrise/sunset window (`sunrise <= now < sunset`);
/// 3. a fixed 06:00-18:00 local fallback.
pub fn is_daytime(snapshot: &WeatherSnapshot, now: DateTime<FixedOffset>) -> bool {
    let today = now.date_naive();

    for (index, hour) in snapshot.hourly.time.iter().enumerate() {
        if hour.date_naive() == today && hour.hour() == now.hour() {
            return snapshot.hourly.is_day.get(index).copied().unwrap_or(false);
        }
    }

    if let Some(index) = snapshot
        .daily
        .time
        .iter()
        .position(|day| day.date_naive() == today)
    {
        if let (Some(sunrise), Some(sunset)) = (
            snapshot.daily.sunrise.get(index),
            snapshot.daily.sunset.get(index),
        ) {
            return *sunrise <= now && now < *sunset;
        }
    }

    (6..18).contains(&now.hour())
}

/// Day/night state for one row of the daily forecast.
///
/// Today follows the live day/night state; every future day renders as
/// its day variant. That is a deliberate simplification: forecast icons
/// describe the day as a whole, not a moment within it.
pub fn is_day_for_daily_index(
    snapshot: &WeatherSnapshot,
    day_index: usize,
    now: DateTime<FixedOffset>,
    now_is_day: bool,
) -> bool {
    match snapshot.daily.time.get(day_index) {
        Some(day) if day.date_naive() == now.date_naive() => now_is_day,
        _ => true,
    }
}

/// One hour's worth of forecast, pulled out of the struct-of-arrays
/// shape for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HourSample {
    pub time: DateTime<FixedOffset>,
    pub temperature_2m: f64,
    pub precipitation_probability: f64,
    pub precipitation: f64,
    pub weather_code: i32,
    pub relative_humidity_2m: f64,
    pub wind_speed_10m: f64,
    pub is_day: bool,
}

/// Hourly samples belonging to the calendar day at `day_index` of the
/// daily forecast. Empty when the index is out of range.
pub fn hourly_for_day(snapshot: &WeatherSnapshot, day_index: usize) -> Vec<HourSample> {
    let Some(day) = snapshot.daily.time.get(day_index) else {
        return Vec::new();
    };
    let date = day.date_naive();
    let hourly = &snapshot.hourly;

    hourly
        .time
        .iter()
        .enumerate()
        .filter(|(_, time)| time.date_naive() == date)
        .map(|(i, time)| HourSample {
            time: *time,
            temperature_2m: hourly.temperature_2m[i],
            precipitation_probability: hourly.precipitation_probability[i],
            precipitation: hourly.precipitation[i],
            weather_code: hourly.weather_code[i],
            relative_humidity_2m: hourly.relative_humidity_2m[i],
            wind_speed_10m: hourly.wind_speed_10m[i],
            is_day: hourly.is_day[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, DailyForecast, HourlyForecast};
    use chrono::{Duration, TimeZone};

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    fn current_stub() -> CurrentConditions {
        CurrentConditions {
            time: at(15, 12),
            temperature_2m: 20.0,
            relative_humidity_2m: 50.0,
            apparent_temperature: 19.0,
            precipitation: 0.0,
            rain: 0.0,
            weather_code: 0,
            cloud_cover: 10.0,
            wind_speed_10m: 5.0,
            wind_direction_10m: 90.0,
            pressure_msl: 1013.0,
            is_day: true,
        }
    }

    /// Two days of daily data (June 15 and 16), no hourly data unless
    /// the test adds some. Sunrise 06:00, sunset 20:00.
    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            current: current_stub(),
            hourly: HourlyForecast::default(),
            daily: DailyForecast {
                time: vec![at(15, 0), at(16, 0)],
                weather_code: vec![0, 61],
                temperature_2m_max: vec![22.0, 19.0],
                temperature_2m_min: vec![12.0, 11.0],
                precipitation_sum: vec![0.0, 4.0],
                relative_humidity_2m_max: vec![80.0, 85.0],
                relative_humidity_2m_min: vec![40.0, 45.0],
                wind_speed_10m_max: vec![18.0, 22.0],
                sunrise: vec![at(15, 6), at(16, 6)],
                sunset: vec![at(15, 20), at(16, 20)],
            },
        }
    }

    fn with_hours(mut snapshot: WeatherSnapshot, hours: &[(u32, u32, bool)]) -> WeatherSnapshot {
        for &(day, hour, is_day) in hours {
            snapshot.hourly.time.push(at(day, hour));
            snapshot.hourly.temperature_2m.push(15.0);
            snapshot.hourly.precipitation_probability.push(0.0);
            snapshot.hourly.precipitation.push(0.0);
            snapshot.hourly.weather_code.push(0);
            snapshot.hourly.relative_humidity_2m.push(50.0);
            snapshot.hourly.wind_speed_10m.push(10.0);
            snapshot.hourly.is_day.push(is_day);
        }
        snapshot
    }

    #[test]
    fn sunrise_sunset_window_decides_when_no_hourly_flag_matches() {
        let snapshot = snapshot();
        assert!(is_daytime(&snapshot, at(15, 12)));
        assert!(!is_daytime(&snapshot, at(15, 22)));
        // Boundaries: sunrise inclusive, sunset exclusive.
        assert!(is_daytime(&snapshot, at(15, 6)));
        assert!(!is_daytime(&snapshot, at(15, 20)));
    }

    #[test]
    fn hourly_day_flag_wins_over_the_sun_window() {
        // Flag says night at noon; the flag is authoritative.
        let snapshot = with_hours(snapshot(), &[(15, 12, false)]);
        assert!(!is_daytime(&snapshot, at(15, 12)));

        let snapshot = with_hours(self::snapshot(), &[(15, 22, true)]);
        assert!(is_daytime(&snapshot, at(15, 22)));
    }

    #[test]
    fn falls_back_to_fixed_window_without_matching_day() {
        let mut snapshot = snapshot();
        snapshot.daily = DailyForecast::default();

        assert!(is_daytime(&snapshot, at(15, 6)));
        assert!(is_daytime(&snapshot, at(15, 17)));
        assert!(!is_daytime(&snapshot, at(15, 18)));
        assert!(!is_daytime(&snapshot, at(15, 5)));
    }

    #[test]
    fn future_days_always_render_as_day() {
        let snapshot = snapshot();
        let night = at(15, 23);

        assert!(!is_day_for_daily_index(&snapshot, 0, night, false));
        assert!(is_day_for_daily_index(&snapshot, 1, night, false));
        // Out of range defaults to day.
        assert!(is_day_for_daily_index(&snapshot, 9, night, false));
    }

    #[test]
    fn hourly_for_day_slices_one_calendar_day() {
        let snapshot = with_hours(
            snapshot(),
            &[(15, 22, false), (15, 23, false), (16, 0, false), (16, 1, false)],
        );

        let today = hourly_for_day(&snapshot, 0);
        assert_eq!(today.len(), 2);
        assert!(today.iter().all(|h| h.time.date_naive() == at(15, 0).date_naive()));

        let tomorrow = hourly_for_day(&snapshot, 1);
        assert_eq!(tomorrow.len(), 2);
        assert_eq!(tomorrow[0].time, at(16, 0));

        assert!(hourly_for_day(&snapshot, 5).is_empty());
    }

    #[test]
    fn hour_bucket_matching_ignores_minutes() {
        let snapshot = with_hours(snapshot(), &[(15, 12, true)]);
        let half_past = at(15, 12) + Duration::minutes(30);
        assert!(is_daytime(&snapshot, half_past));
    }
}
