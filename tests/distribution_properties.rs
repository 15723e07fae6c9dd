//! Distribution invariants over normal-like and heavy-tailed fixtures

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use retdist::{
    PriceBar, ReturnKind, ReturnSeries, StatsError, aggregate_return, analyze, high_low_return,
    log_close_return,
};

fn series(values: Vec<f64>) -> ReturnSeries {
    ReturnSeries::new(ReturnKind::LogClose, values).unwrap()
}

fn bar(day: u64, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
    let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    PriceBar::new(start + Days::new(day), open, high, low, close)
}

/// Symmetric, roughly bell-shaped fixture
fn normal_like() -> Vec<f64> {
    let mut values = Vec::new();
    for (magnitude, copies) in [(0.0, 20), (0.005, 15), (0.01, 10), (0.02, 5), (0.03, 1)] {
        for _ in 0..copies {
            values.push(magnitude);
            if magnitude != 0.0 {
                values.push(-magnitude);
            }
        }
    }
    values
}

#[test]
fn test_normal_like_three_sigma_covers_everything() {
    let stats = analyze(&series(normal_like())).unwrap();
    let bands = stats.bands.unwrap();
    let counts: Vec<_> = bands.rows.iter().map(|r| r.count_within).collect();

    assert!(counts[0] <= counts[1] && counts[1] <= counts[2]);
    assert_eq!(counts[2], stats.sign.count_total);
    assert!(counts[0] < stats.sign.count_total);
}

#[test]
fn test_heavy_tail_escapes_three_sigma_but_stays_monotone() {
    // one extreme outlier among many zeros: mean 10, stdev ~100, 1000 > mean + 3σ
    let mut values = vec![0.0; 99];
    values.push(1000.0);
    let stats = analyze(&series(values)).unwrap();
    let bands = stats.bands.unwrap();

    let counts: Vec<_> = bands.rows.iter().map(|r| r.count_within).collect();
    assert!(counts[0] <= counts[1] && counts[1] <= counts[2]);
    assert_eq!(counts[2], 99);
    assert!(bands.rows[2].pct_within.value() < 1.0);
}

#[test]
fn test_all_positive_reports_absent_negative_mean() {
    let stats = analyze(&series(vec![0.01, 0.03, 0.02, 0.04])).unwrap();
    assert_eq!(stats.sign.negative.pct.value(), 0.0);
    assert_eq!(stats.sign.negative.mean, None);
    assert_eq!(stats.sign.negative.adjusted, None);
}

#[test]
fn test_log_close_reference_values() {
    let bars = [
        bar(0, 100.0, 100.0, 100.0, 100.0),
        bar(1, 110.0, 110.0, 110.0, 110.0),
        bar(2, 99.0, 99.0, 99.0, 99.0),
    ];
    let returns = log_close_return(&bars).unwrap();
    assert_eq!(returns.len(), 2);
    assert!((returns.values()[0] - 0.09531).abs() < 1e-5);
    assert!((returns.values()[1] + 0.10536).abs() < 1e-5);
    assert_eq!(analyze(&returns).unwrap().sign.count_total, 2);
}

#[test]
fn test_zero_low_is_domain_error_not_infinity() {
    let bars = [bar(0, 1.0, 1.2, 0.9, 1.1), bar(1, 1.0, 1.2, 0.0, 1.1)];
    assert!(matches!(
        high_low_return(&bars),
        Err(StatsError::DivisionDomain { .. })
    ));
}

#[test]
fn test_aggregate_return_reference_values() {
    assert_eq!(aggregate_return(50.0, 75.0).unwrap().value(), 50.0);
    assert!(matches!(
        aggregate_return(0.0, 75.0),
        Err(StatsError::DivisionDomain { .. })
    ));
}

#[test]
fn test_empty_bars_give_no_statistics() {
    let returns = log_close_return(&[]).unwrap();
    let err = analyze(&returns).unwrap_err();
    assert!(err.is_insufficient_data());
}

proptest! {
    #[test]
    fn test_counts_partition_total(values in proptest::collection::vec(-0.2f64..0.2, 1..200)) {
        let stats = analyze(&series(values.clone())).unwrap();
        let sign = &stats.sign;
        prop_assert_eq!(sign.count_total, values.len());
        prop_assert_eq!(
            sign.positive.count + sign.negative.count + sign.count_zero,
            sign.count_total
        );
        prop_assert_eq!(sign.positive.mean.is_none(), sign.positive.count == 0);
        prop_assert_eq!(sign.negative.mean.is_none(), sign.negative.count == 0);
    }

    #[test]
    fn test_band_coverage_is_monotone(values in proptest::collection::vec(-1.0f64..1.0, 2..300)) {
        let stats = analyze(&series(values)).unwrap();
        let bands = stats.bands.unwrap();
        let [one, two, three] = &bands.rows;
        prop_assert!(one.count_within <= two.count_within);
        prop_assert!(two.count_within <= three.count_within);
        prop_assert!(three.count_within <= stats.sign.count_total);
        prop_assert!(one.lower_bound <= one.upper_bound);
    }

    #[test]
    fn test_mixed_signs_with_zeros_never_sum_past_hundred(
        values in proptest::collection::vec(prop_oneof![Just(0.0f64), -0.1f64..0.1], 1..100)
    ) {
        let stats = analyze(&series(values)).unwrap();
        let total = stats.sign.positive.pct.value() + stats.sign.negative.pct.value();
        prop_assert!(total <= 100.0 + 1e-9);
    }
}
