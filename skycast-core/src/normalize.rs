//! Turns a [`RawForecast`] into a [`WeatherSnapshot`].
//!
//! Three concerns live here:
//! - reconstructing the time axis each granularity's channel arrays are
//!   aligned to (base epoch, end epoch, interval);
//! - extracting channels by name through the request channel tables;
//! - rounding continuous quantities to one decimal and converting
//!   day-flags and epochs into their typed forms.
//!
//! Tolerance policy: a wholly absent granularity block is fatal, a
//! missing individual channel is read as zero, and a channel whose
//! length disagrees with the reconstructed axis is fatal.

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::{
    error::WeatherError,
    model::{CurrentConditions, DailyForecast, HourlyForecast, WeatherSnapshot},
    provider::{RawForecast, RawSection},
};

/// Round to one decimal place, ties away from zero.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Wall-clock instant for a provider epoch under the response's UTC
/// offset. The offset is applied here and nowhere else.
fn local_time(epoch: i64, offset_seconds: i32) -> Result<DateTime<FixedOffset>, WeatherError> {
    let offset = FixedOffset::east_opt(offset_seconds).ok_or_else(|| {
        WeatherError::IncompleteData(format!("invalid utc offset {offset_seconds}s"))
    })?;

    offset
        .timestamp_opt(epoch, 0)
        .single()
        .ok_or_else(|| WeatherError::IncompleteData(format!("epoch {epoch} out of range")))
}

/// The ordered epoch sequence `start, start+step, ...` strictly below
/// `end`, of length exactly `(end - start) / step`.
///
/// A non-positive step, an end before the start, or a fractional
/// remainder means the provider broke its contract; that is a data
/// error, not something to truncate around.
pub fn time_axis(start: i64, end: i64, step: i64) -> Result<Vec<i64>, WeatherError> {
    if step <= 0 {
        return Err(WeatherError::IncompleteData(format!(
            "non-positive sampling interval {step}s"
        )));
    }
    if end < start {
        return Err(WeatherError::IncompleteData(format!(
            "time axis ends ({end}) before it starts ({start})"
        )));
    }
    if (end - start) % step != 0 {
        return Err(WeatherError::IncompleteData(format!(
            "time span {} is not a multiple of the {step}s interval",
            end - start
        )));
    }

    let len = ((end - start) / step) as usize;
    Ok((0..len).map(|i| start + i as i64 * step).collect())
}

/// Array channel by name, padded with zeros when the channel is absent.
/// A present channel whose length disagrees with the axis is fatal.
fn series_or_zero(
    section: &RawSection,
    name: &str,
    len: usize,
    granularity: &str,
) -> Result<Vec<f64>, WeatherError> {
    match section.series(name) {
        None => Ok(vec![0.0; len]),
        Some(values) if values.len() == len => Ok(values.to_vec()),
        Some(values) => Err(WeatherError::IncompleteData(format!(
            "{granularity} channel '{name}' has {} values for a time axis of {len}",
            values.len()
        ))),
    }
}

/// Normalize one raw provider response into the three typed records.
pub fn normalize(raw: &RawForecast) -> Result<WeatherSnapshot, WeatherError> {
    let offset = raw.utc_offset_seconds;

    let current = raw
        .current
        .as_ref()
        .ok_or_else(|| WeatherError::IncompleteData("missing current block".into()))?;
    let hourly = raw
        .hourly
        .as_ref()
        .ok_or_else(|| WeatherError::IncompleteData("missing hourly block".into()))?;
    let daily = raw
        .daily
        .as_ref()
        .ok_or_else(|| WeatherError::IncompleteData("missing daily block".into()))?;

    Ok(WeatherSnapshot {
        current: normalize_current(current, offset)?,
        hourly: normalize_hourly(hourly, offset)?,
        daily: normalize_daily(daily, offset)?,
    })
}

fn normalize_current(
    section: &RawSection,
    offset: i32,
) -> Result<CurrentConditions, WeatherError> {
    let rounded = |name: &str| round1(section.scalar(name).unwrap_or(0.0));

    Ok(CurrentConditions {
        time: local_time(section.time, offset)?,
        temperature_2m: rounded("temperature_2m"),
        relative_humidity_2m: rounded("relative_humidity_2m"),
        apparent_temperature: rounded("apparent_temperature"),
        precipitation: rounded("precipitation"),
        rain: rounded("rain"),
        weather_code: section.scalar("weather_code").unwrap_or(0.0) as i32,
        cloud_cover: rounded("cloud_cover"),
        wind_speed_10m: rounded("wind_speed_10m"),
        wind_direction_10m: rounded("wind_direction_10m"),
        pressure_msl: rounded("pressure_msl"),
        is_day: section.scalar("is_day").unwrap_or(0.0) != 0.0,
    })
}

fn normalize_hourly(section: &RawSection, offset: i32) -> Result<HourlyForecast, WeatherError> {
    let end = section
        .time_end
        .ok_or_else(|| WeatherError::IncompleteData("hourly block missing end time".into()))?;
    let axis = time_axis(section.time, end, section.interval)?;
    let len = axis.len();

    let time = axis
        .iter()
        .map(|&epoch| local_time(epoch, offset))
        .collect::<Result<Vec<_>, _>>()?;

    let rounded = |name: &str| -> Result<Vec<f64>, WeatherError> {
        Ok(series_or_zero(section, name, len, "hourly")?
            .into_iter()
            .map(round1)
            .collect())
    };

    Ok(HourlyForecast {
        time,
        temperature_2m: rounded("temperature_2m")?,
        precipitation_probability: rounded("precipitation_probability")?,
        precipitation: rounded("precipitation")?,
        weather_code: series_or_zero(section, "weather_code", len, "hourly")?
            .into_iter()
            .map(|v| v as i32)
            .collect(),
        relative_humidity_2m: rounded("relative_humidity_2m")?,
        wind_speed_10m: rounded("wind_speed_10m")?,
        is_day: series_or_zero(section, "is_day", len, "hourly")?
            .into_iter()
            .map(|v| v != 0.0)
            .collect(),
    })
}

fn normalize_daily(section: &RawSection, offset: i32) -> Result<DailyForecast, WeatherError> {
    let end = section
        .time_end
        .ok_or_else(|| WeatherError::IncompleteData("daily block missing end time".into()))?;
    let axis = time_axis(section.time, end, section.interval)?;
    let len = axis.len();

    let time = axis
        .iter()
        .map(|&epoch| local_time(epoch, offset))
        .collect::<Result<Vec<_>, _>>()?;

    let rounded = |name: &str| -> Result<Vec<f64>, WeatherError> {
        Ok(series_or_zero(section, name, len, "daily")?
            .into_iter()
            .map(round1)
            .collect())
    };
    let instants = |name: &str| -> Result<Vec<DateTime<FixedOffset>>, WeatherError> {
        series_or_zero(section, name, len, "daily")?
            .into_iter()
            .map(|epoch| local_time(epoch as i64, offset))
            .collect()
    };

    Ok(DailyForecast {
        time,
        weather_code: series_or_zero(section, "weather_code", len, "daily")?
            .into_iter()
            .map(|v| v as i32)
            .collect(),
        temperature_2m_max: rounded("temperature_2m_max")?,
        temperature_2m_min: rounded("temperature_2m_min")?,
        precipitation_sum: rounded("precipitation_sum")?,
        relative_humidity_2m_max: rounded("relative_humidity_2m_max")?,
        relative_humidity_2m_min: rounded("relative_humidity_2m_min")?,
        wind_speed_10m_max: rounded("wind_speed_10m_max")?,
        sunrise: instants("sunrise")?,
        sunset: instants("sunset")?,
    })
}
