pub mod csv;
pub mod json;
pub mod table;

use crate::change::ChangeMetric;
use crate::units::{display_volume, display_weight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Cost,
    Count,
    Weight,
    Water,
    Emissions,
}

impl Quantity {
    pub fn unit(self, display_as_metric: bool) -> &'static str {
        match self {
            Self::Cost => "$",
            Self::Count => "units",
            Self::Weight => display_weight(0.0, display_as_metric).1,
            Self::Water => display_volume(0.0, display_as_metric).1,
            Self::Emissions => "MTCO2e",
        }
    }

    pub fn convert(self, value: f64, display_as_metric: bool) -> f64 {
        match self {
            Self::Weight => display_weight(value, display_as_metric).0,
            Self::Water => display_volume(value, display_as_metric).0,
            Self::Cost | Self::Count | Self::Emissions => value,
        }
    }
}

pub fn display_metric(metric: &ChangeMetric, quantity: Quantity, display_as_metric: bool) -> ChangeMetric {
    ChangeMetric {
        baseline: quantity.convert(metric.baseline, display_as_metric),
        forecast: quantity.convert(metric.forecast, display_as_metric),
        change: quantity.convert(metric.change, display_as_metric),
        change_percent: metric.change_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::compute_change;

    #[test]
    fn metric_display_converts_weight_but_not_percent() {
        let shown = display_metric(&compute_change(100.0, 50.0), Quantity::Weight, true);
        assert!((shown.baseline - 45.359237).abs() < 1e-9);
        assert_eq!(shown.change_percent, -0.5);
        assert_eq!(Quantity::Weight.unit(true), "kg");
    }

    #[test]
    fn imperial_display_is_identity() {
        let metric = compute_change(10.0, 12.0);
        assert_eq!(display_metric(&metric, Quantity::Water, false), metric);
        assert_eq!(Quantity::Water.unit(false), "gal");
        assert_eq!(display_metric(&metric, Quantity::Emissions, true), metric);
    }
}
