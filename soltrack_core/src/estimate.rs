//! Deterministic UV estimation engine.
//!
//! There is no real weather source: the base UV index, hourly forecast and
//! sun window are all derived from the location string and the supplied
//! time. The current time is always passed in explicitly so callers (and
//! tests) control the instant being estimated.

use crate::types::{HourlyForecastEntry, RiskLevel, SunWindow};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use std::f64::consts::PI;

/// Number of entries in the hourly forecast
pub const FORECAST_HOURS: usize = 8;

/// Round to one decimal place, matching the display precision of UV indices
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derive the base UV index for a location at a given time.
///
/// The location's char-code sum (mod 700) is scaled into [2, 8], a seasonal
/// term of up to +3 is added for the month, and the result is capped at
/// 11.0. Only the month of `now` matters: two calls in the same month with
/// the same location return the identical value. The empty string is a
/// valid location (char-code sum 0).
pub fn derive_base_uv(location: &str, now: NaiveDateTime) -> f64 {
    // u64 accumulator: the location is unrestricted user text, so the
    // char-code sum must not overflow on long input
    let hash: u64 = location.chars().map(|c| c as u64).sum();
    let base = 2.0 + (hash % 700) as f64 / 700.0 * 6.0;
    let seasonal = (f64::from(now.month0() + 1) / 12.0 * PI).sin() * 3.0;
    round1((base + seasonal).min(11.0))
}

/// Generate the next 8 hours of forecast entries from a base UV index.
///
/// Each entry scales the base by a half-sine daylight curve and is labelled
/// with the 12-hour clock hour of `now + i`. Recomputed fresh on every call.
pub fn generate_forecast(base_uv: f64, now: NaiveDateTime) -> Vec<HourlyForecastEntry> {
    (0..FORECAST_HOURS)
        .map(|i| {
            let modifier = (i as f64 / FORECAST_HOURS as f64 * PI).sin();
            let uv = round1(base_uv * (0.4 + modifier)).max(0.0);
            let hour = (now + Duration::hours(i as i64)).hour();
            HourlyForecastEntry {
                hour_label: hour_label(hour),
                uv_index: uv,
            }
        })
        .collect()
}

/// Derive the estimated sunrise/sunset window for a location.
///
/// Uses a position-weighted hash of the location so that anagrams get
/// different windows. Sunrise falls in [5:00am, 7:00am), sunset in
/// [5:00pm, 8:00pm).
pub fn derive_sun_window(location: &str) -> SunWindow {
    let hash: u64 = location
        .chars()
        .enumerate()
        .map(|(i, c)| c as u64 * (i as u64 + 1))
        .sum();

    let sunrise_min = (hash % 120) as u32;
    let sunset_min = (hash % 180) as u32;

    SunWindow {
        sunrise: clock_label(5 + sunrise_min / 60, sunrise_min % 60),
        sunset: clock_label(17 + sunset_min / 60, sunset_min % 60),
    }
}

/// Classify a UV index into a risk level. Boundaries are upper-exclusive:
/// exactly 3.0 is Moderate, not Low.
pub fn risk_level(uv: f64) -> RiskLevel {
    if uv < 3.0 {
        RiskLevel::Low
    } else if uv < 6.0 {
        RiskLevel::Moderate
    } else if uv < 8.0 {
        RiskLevel::High
    } else if uv < 11.0 {
        RiskLevel::VeryHigh
    } else {
        RiskLevel::Extreme
    }
}

/// Format a 24-hour hour as a bare 12-hour label, e.g. "3pm"
fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12am".into(),
        1..=11 => format!("{}am", hour),
        12 => "12pm".into(),
        _ => format!("{}pm", hour - 12),
    }
}

/// Format a 24-hour time as a 12-hour clock label with minutes, e.g. "5:07am"
fn clock_label(hour: u32, minute: u32) -> String {
    let (h12, suffix) = match hour {
        0 => (12, "am"),
        1..=11 => (hour, "am"),
        12 => (12, "pm"),
        _ => (hour - 12, "pm"),
    };
    format!("{}:{:02}{}", h12, minute, suffix)
}
