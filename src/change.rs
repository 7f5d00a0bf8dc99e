use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Baseline vs forecast pair with the derived difference.
///
/// `change` is always `forecast - baseline` and `change_percent` is
/// `change / baseline`, or `0` when there is no baseline. Sign is never
/// flipped here; showing savings as positive numbers is up to the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChangeMetric {
    pub baseline: f64,
    pub forecast: f64,
    pub change: f64,
    pub change_percent: f64,
}

pub fn compute_change(baseline: f64, forecast: f64) -> ChangeMetric {
    let change = forecast - baseline;
    let change_percent = if baseline == 0.0 { 0.0 } else { change / baseline };
    ChangeMetric {
        baseline,
        forecast,
        change,
        change_percent,
    }
}

impl ChangeMetric {
    pub fn zero() -> Self {
        compute_change(0.0, 0.0)
    }

    pub fn has_change(&self) -> bool {
        self.change != 0.0
    }

    pub fn is_all_zero(&self) -> bool {
        self.baseline == 0.0 && self.forecast == 0.0
    }
}

impl Add for ChangeMetric {
    type Output = ChangeMetric;

    fn add(self, rhs: Self) -> Self::Output {
        compute_change(self.baseline + rhs.baseline, self.forecast + rhs.forecast)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairSum {
    pub baseline: f64,
    pub forecast: f64,
}

impl PairSum {
    pub fn push(&mut self, baseline: f64, forecast: f64) {
        self.baseline += baseline;
        self.forecast += forecast;
    }

    pub fn finish(self) -> ChangeMetric {
        compute_change(self.baseline, self.forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_is_forecast_minus_baseline() {
        let metric = compute_change(2_400.0, 0.0);
        assert_eq!(metric.change, -2_400.0);
        assert_eq!(metric.change_percent, -1.0);
    }

    #[test]
    fn zero_baseline_reports_zero_percent() {
        let both_zero = compute_change(0.0, 0.0);
        assert_eq!(both_zero.change, 0.0);
        assert_eq!(both_zero.change_percent, 0.0);

        let new_spend = compute_change(0.0, 150.0);
        assert_eq!(new_spend.change, 150.0);
        assert_eq!(new_spend.change_percent, 0.0);
    }

    #[test]
    fn negative_baseline_keeps_raw_sign() {
        let metric = compute_change(-10.0, -5.0);
        assert_eq!(metric.change, 5.0);
        assert_eq!(metric.change_percent, -0.5);
    }

    #[test]
    fn adding_metrics_recomputes_from_sums() {
        let a = compute_change(100.0, 50.0);
        let b = compute_change(0.0, 25.0);
        let sum = a + b;
        assert_eq!(sum.baseline, 100.0);
        assert_eq!(sum.forecast, 75.0);
        assert_eq!(sum.change, -25.0);
        assert_eq!(sum.change_percent, -0.25);
    }

    #[test]
    fn pair_sum_finishes_into_metric() {
        let mut sum = PairSum::default();
        sum.push(10.0, 5.0);
        sum.push(30.0, 5.0);
        let metric = sum.finish();
        assert_eq!(metric, compute_change(40.0, 10.0));
        assert!(metric.has_change());
        assert!(!ChangeMetric::zero().has_change());
        assert!(ChangeMetric::zero().is_all_zero());
    }
}
