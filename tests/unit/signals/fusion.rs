//! Unit tests for signal fusion

use crate::fixtures::{daily_series, day, linear};
use chrono::NaiveDate;
use macroscope::alignment::AlignPolicy;
use macroscope::config::FusionConfig;
use macroscope::models::indicators::{IndicatorFrame, IndicatorRow};
use macroscope::models::series::{Bar, TimeSeries};
use macroscope::models::signal::{MacroScore, MacroScoreTable};
use macroscope::signals::SignalFusion;

fn row(date: NaiveDate, close: f64, ma_slope: f64, internal_score: u8) -> IndicatorRow {
    IndicatorRow {
        date,
        close,
        volume: 1_000,
        ma_short: Some(close),
        ma_long: Some(close),
        ma_slope,
        volume_ma: Some(1_000.0),
        volume_ratio: Some(1.0),
        internal_score,
        rsi: Some(50.0),
    }
}

fn scores(entries: &[(NaiveDate, u8)]) -> MacroScoreTable {
    let mut table = MacroScoreTable::new();
    for &(date, score) in entries {
        table.insert(MacroScore {
            date,
            score,
            conditions: Vec::new(),
        });
    }
    table
}

fn flat_baseline(start: i64, count: usize) -> TimeSeries {
    daily_series("BASE", start, &vec![50.0; count], &[])
}

#[test]
fn test_inner_join_on_scored_dates() {
    let frame = IndicatorFrame::new(
        "P",
        (0..5).map(|i| row(day(i), 100.0, 1.0, 1)).collect(),
        0,
    );
    let table = scores(&[(day(1), 3), (day(3), 3), (day(9), 3)]);
    let config = FusionConfig::default();

    let fused = SignalFusion::new(&config).fuse(&frame, &table, &flat_baseline(0, 10));

    let dates: Vec<_> = fused.rows().iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(1), day(3)]);
    assert_eq!(fused.rows()[0].relative_strength, 2.0);
}

#[test]
fn test_baseline_without_shared_dates_gives_empty_table() {
    let frame = IndicatorFrame::new(
        "P",
        (0..5).map(|i| row(day(i), 100.0, 1.0, 1)).collect(),
        0,
    );
    let table = scores(&(0..5).map(|i| (day(i), 3)).collect::<Vec<_>>());
    let config = FusionConfig::default();

    let fused = SignalFusion::new(&config).fuse(&frame, &table, &flat_baseline(400, 30));

    assert!(fused.is_empty());
    assert_eq!(fused.symbol(), "P");
}

#[test]
fn test_internal_strength_needs_a_complete_window() {
    let frame = IndicatorFrame::new(
        "P",
        vec![
            row(day(0), 100.0, 1.0, 1),
            row(day(1), 101.0, 1.0, 0),
            row(day(2), 102.0, 1.0, 0),
            row(day(3), 103.0, 1.0, 0),
        ],
        0,
    );
    let table = scores(&(0..4).map(|i| (day(i), 3)).collect::<Vec<_>>());
    let config = FusionConfig::default();

    let fused = SignalFusion::new(&config).fuse(&frame, &table, &flat_baseline(0, 4));
    let strong: Vec<bool> = fused.rows().iter().map(|r| r.internal_strong).collect();
    let buys: Vec<bool> = fused.rows().iter().map(|r| r.final_buy).collect();

    assert_eq!(strong, vec![false, true, false, false]);
    assert_eq!(buys, strong);
}

#[test]
fn test_buy_requires_score_and_rising_slope() {
    let frame = IndicatorFrame::new(
        "P",
        vec![
            row(day(0), 100.0, 1.0, 1),
            row(day(1), 100.0, 1.0, 1),
            row(day(2), 100.0, 0.0, 1),
            row(day(3), 100.0, 1.0, 1),
        ],
        0,
    );
    let table = scores(&[(day(0), 3), (day(1), 2), (day(2), 3), (day(3), 1)]);
    let config = FusionConfig::default();

    let fused = SignalFusion::new(&config).fuse(&frame, &table, &flat_baseline(0, 4));
    let buys: Vec<bool> = fused.rows().iter().map(|r| r.final_buy).collect();

    assert_eq!(buys, vec![false, true, false, false]);
}

#[test]
fn test_sell_with_and_without_downtrend_requirement() {
    let frame = IndicatorFrame::new(
        "P",
        vec![
            row(day(0), 100.0, -1.0, 0),
            row(day(1), 100.0, 0.5, 0),
            row(day(2), 100.0, -1.0, 0),
        ],
        0,
    );
    let table = scores(&[(day(0), 1), (day(1), 0), (day(2), 2)]);

    let equity = FusionConfig::default();
    let fused = SignalFusion::new(&equity).fuse(&frame, &table, &flat_baseline(0, 3));
    let sells: Vec<bool> = fused.rows().iter().map(|r| r.sell).collect();
    assert_eq!(sells, vec![true, false, false]);

    let crypto = FusionConfig {
        sell_requires_downtrend: false,
        ..FusionConfig::default()
    };
    let fused = SignalFusion::new(&crypto).fuse(&frame, &table, &flat_baseline(0, 3));
    let sells: Vec<bool> = fused.rows().iter().map(|r| r.sell).collect();
    assert_eq!(sells, vec![true, true, false]);
}

#[test]
fn test_buy_and_sell_never_coincide() {
    let frame = IndicatorFrame::new(
        "P",
        (0..30)
            .map(|i| row(day(i), 100.0 + i as f64, if i % 3 == 0 { -1.0 } else { 1.0 }, (i % 2) as u8))
            .collect(),
        0,
    );
    let table = scores(&(0..30).map(|i| (day(i), (i % 4) as u8)).collect::<Vec<_>>());

    for config in [
        FusionConfig::default(),
        FusionConfig {
            sell_requires_downtrend: false,
            ..FusionConfig::default()
        },
    ] {
        let fused = SignalFusion::new(&config).fuse(&frame, &table, &flat_baseline(0, 30));
        assert!(fused.rows().iter().all(|r| !(r.final_buy && r.sell)));
    }
}

#[test]
fn test_nearest_baseline_fills_weekend_gaps() {
    // Baseline trades on even days only.
    let bars: Vec<Bar> = (0..10)
        .map(|i| {
            let close = 10.0 + i as f64;
            Bar::new(day(i * 2), close, close, close, close, 0)
        })
        .collect();
    let baseline = TimeSeries::new("BASE", bars).unwrap();

    let frame = IndicatorFrame::new(
        "P",
        (0..6).map(|i| row(day(i), 100.0, 1.0, 0)).collect(),
        0,
    );
    let table = scores(&(0..6).map(|i| (day(i), 2)).collect::<Vec<_>>());

    let pad = FusionConfig::default();
    let nearest = FusionConfig {
        baseline_policy: AlignPolicy::Nearest,
        ..FusionConfig::default()
    };

    let padded = SignalFusion::new(&pad).fuse(&frame, &table, &baseline);
    let near = SignalFusion::new(&nearest).fuse(&frame, &table, &baseline);

    // day 3 sits between day 2 (close 11) and day 4 (close 12); the tie
    // resolves to the earlier session in both policies.
    assert_eq!(padded.rows()[3].relative_strength, 100.0 / 11.0);
    assert_eq!(near.rows()[3].relative_strength, 100.0 / 11.0);
    assert_eq!(padded.len(), 6);
    assert_eq!(near.len(), 6);
}

#[test]
fn test_relative_strength_smoothing() {
    let closes = linear(100.0, 1.0, 30);
    let frame = IndicatorFrame::new(
        "P",
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| row(day(i as i64), c, 1.0, 0))
            .collect(),
        0,
    );
    let table = scores(&(0..30).map(|i| (day(i), 2)).collect::<Vec<_>>());
    let config = FusionConfig::default();

    let fused = SignalFusion::new(&config).fuse(&frame, &table, &flat_baseline(0, 30));
    let rows = fused.rows();

    assert!(rows[18].rs_ma.is_none());
    assert!((rows[19].rs_ma.unwrap() - 109.5 / 50.0).abs() < 1e-12);
    assert_eq!(rows[3].rs_slope, 0.0);
    assert!((rows[4].rs_slope - 0.02).abs() < 1e-12);
}
