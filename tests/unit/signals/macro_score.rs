//! Unit tests for the macro scorer

use crate::fixtures::{daily_series, day, favourable_macros, linear, rising_primary};
use macroscope::config::{FrameConfig, MacroConfig};
use macroscope::indicators::annotate;
use macroscope::models::series::TimeSeries;
use macroscope::signals::{MacroInputs, MacroRole, MacroScorer, ScoringRule};
use macroscope::{PipelineError, SkipReason};

fn inputs<'a>(currency: &'a TimeSeries, rates: &'a TimeSeries, benchmark: &'a TimeSeries) -> MacroInputs<'a> {
    let mut inputs = MacroInputs::new();
    inputs.insert(MacroRole::Currency, currency);
    inputs.insert(MacroRole::Rates, rates);
    inputs.insert(MacroRole::Benchmark, benchmark);
    inputs
}

#[test]
fn test_missing_role_is_a_missing_input() {
    let macros = favourable_macros();
    let mut partial = MacroInputs::new();
    partial.insert(MacroRole::Currency, &macros.currency);
    partial.insert(MacroRole::Rates, &macros.rates);

    let rule = ScoringRule::equity();
    let err = MacroScorer::new(&rule, &partial, &MacroConfig::default()).err();
    assert_eq!(
        err,
        Some(PipelineError::MissingInput {
            series: "benchmark".to_string()
        })
    );
}

#[test]
fn test_empty_macro_series_is_a_missing_input() {
    let macros = favourable_macros();
    let empty = TimeSeries::new("DXY", Vec::new()).unwrap();
    let rule = ScoringRule::equity();

    let result = MacroScorer::new(
        &rule,
        &inputs(&empty, &macros.rates, &macros.baseline),
        &MacroConfig::default(),
    );
    assert!(matches!(result, Err(PipelineError::MissingInput { .. })));
}

#[test]
fn test_favourable_environment_scores_every_condition() {
    let macros = favourable_macros();
    let rule = ScoringRule::equity();
    let scorer = MacroScorer::new(
        &rule,
        &inputs(&macros.currency, &macros.rates, &macros.baseline),
        &MacroConfig::default(),
    )
    .unwrap();

    let frame = annotate(&rising_primary(), &FrameConfig::default());
    let table = scorer.score(&frame);

    assert_eq!(table.len(), 40);
    assert!(table.skipped().is_empty());
    assert!(table.iter().all(|s| s.score == 3));
    assert!(table.get(day(59)).is_none());
    assert_eq!(table.score(day(60)), Some(3));
}

#[test]
fn test_breakdown_records_each_condition() {
    let macros = favourable_macros();
    let rising_dollar = daily_series("DXY", -80, &linear(90.0, 0.1, 180), &[]);
    let rule = ScoringRule::equity();
    let scorer = MacroScorer::new(
        &rule,
        &inputs(&rising_dollar, &macros.rates, &macros.baseline),
        &MacroConfig::default(),
    )
    .unwrap();

    let score = scorer.score_date(day(70)).unwrap();
    assert_eq!(score.score, 2);
    assert_eq!(score.conditions[0].id, "dollar_weakening");
    assert!(!score.conditions[0].passed);
    assert!(score.conditions[1].passed);
    assert!(score.conditions[2].passed);
}

#[test]
fn test_unscorable_dates_are_skipped_not_zero_filled() {
    // Macro series start with the primary, so the benchmark's 60-day average
    // is undefined for the first 59 dates.
    let currency = daily_series("DXY", 0, &linear(120.0, -0.1, 100), &[]);
    let rates = daily_series("TNX", 0, &linear(5.0, -0.01, 100), &[]);
    let baseline = daily_series("BASE", 0, &linear(1_000.0, 2.0, 100), &[]);
    let rule = ScoringRule::equity();
    let scorer = MacroScorer::new(
        &rule,
        &inputs(&currency, &rates, &baseline),
        &MacroConfig { warmup: 0 },
    )
    .unwrap();

    let frame = annotate(&rising_primary(), &FrameConfig::default());
    let table = scorer.score(&frame);

    assert_eq!(table.len(), 41);
    assert_eq!(table.skipped().len(), 59);
    assert!(table.get(day(10)).is_none());
    assert!(matches!(
        table.skipped()[0].reason,
        SkipReason::InsufficientHistory { .. }
    ));
    assert!(matches!(
        table.skipped()[58].reason,
        SkipReason::UndefinedValue { .. }
    ));
    assert!(table.iter().all(|s| s.score == 3));
}

#[test]
fn test_score_does_not_depend_on_condition_order() {
    let macros = favourable_macros();
    let rising_rates = daily_series("TNX", -80, &linear(3.0, 0.02, 180), &[]);
    let forward = ScoringRule::equity();
    let mut reversed = ScoringRule::equity();
    reversed.conditions.reverse();
    let macro_inputs = inputs(&macros.currency, &rising_rates, &macros.baseline);

    let a = MacroScorer::new(&forward, &macro_inputs, &MacroConfig::default()).unwrap();
    let b = MacroScorer::new(&reversed, &macro_inputs, &MacroConfig::default()).unwrap();

    for offset in 60..100 {
        let date = day(offset);
        assert_eq!(
            a.score_date(date).map(|s| s.score),
            b.score_date(date).map(|s| s.score)
        );
    }
    assert_eq!(a.score_date(day(80)).unwrap().score, 2);
}
