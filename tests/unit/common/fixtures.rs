//! Synthetic daily series shared by the unit tests.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use macroscope::models::series::{Bar, TimeSeries};

pub fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
}

/// One bar per calendar day starting at `day(start)`.
pub fn daily_series(symbol: &str, start: i64, closes: &[f64], volumes: &[u64]) -> TimeSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let volume = volumes.get(i).copied().unwrap_or(1_000);
            Bar::new(day(start + i as i64), close, close, close, close, volume)
        })
        .collect();
    TimeSeries::new(symbol, bars).unwrap()
}

pub fn linear(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

/// 1000, 3000, 1000, ... so the 20-day average settles at 2000 and every
/// other day spikes to 1.5x.
pub fn alternating_volume(count: usize) -> Vec<u64> {
    (0..count).map(|i| if i % 2 == 0 { 1_000 } else { 3_000 }).collect()
}

/// Primary of 100 days rising by 1 per day.
pub fn rising_primary() -> TimeSeries {
    daily_series("PRIMARY", 0, &linear(100.0, 1.0, 100), &alternating_volume(100))
}

/// Macro series starting 80 days before the primary so every equity
/// condition holds on every primary date.
pub struct FavourableMacros {
    pub currency: TimeSeries,
    pub rates: TimeSeries,
    pub baseline: TimeSeries,
}

pub fn favourable_macros() -> FavourableMacros {
    FavourableMacros {
        currency: daily_series("DXY", -80, &linear(120.0, -0.1, 180), &[]),
        rates: daily_series("TNX", -80, &linear(5.0, -0.01, 180), &[]),
        baseline: daily_series("BASE", -80, &linear(1_000.0, 2.0, 180), &[]),
    }
}

/// One bar per weekday starting at the first weekday on or after
/// `day(start)`, the way an exchange-traded series arrives.
pub fn weekday_series(symbol: &str, start: i64, closes: &[f64]) -> TimeSeries {
    let dates = (start..)
        .map(day)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun));
    let bars = dates
        .zip(closes)
        .map(|(date, &close)| Bar::new(date, close, close, close, close, 1_000))
        .collect();
    TimeSeries::new(symbol, bars).unwrap()
}

/// Closes drifting by `drift` per step with an alternating swing of
/// `amplitude * rate^k` on top. `rate < 1` calms the series down over time,
/// `rate > 1` makes it wilder.
pub fn swinging_trend(start: f64, count: usize, drift: f64, amplitude: f64, rate: f64) -> Vec<f64> {
    let mut closes = Vec::with_capacity(count);
    let mut close = start;
    for k in 0..count {
        if k > 0 {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            close *= 1.0 + drift + sign * amplitude * rate.powi(k as i32);
        }
        closes.push(close);
    }
    closes
}
