use serde::{Deserialize, Serialize};

pub const KILOGRAMS_PER_POUND: f64 = 0.453_592_37;
pub const POUNDS_PER_SHORT_TON: f64 = 2_000.0;
pub const LITERS_PER_GALLON: f64 = 3.785_411_784;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Pounds,
    Kilograms,
    ShortTons,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    Gallons,
    Liters,
}

pub fn pounds_to_kilograms(pounds: f64) -> f64 {
    pounds * KILOGRAMS_PER_POUND
}

pub fn kilograms_to_pounds(kilograms: f64) -> f64 {
    kilograms / KILOGRAMS_PER_POUND
}

pub fn pounds_to_tons(pounds: f64) -> f64 {
    pounds / POUNDS_PER_SHORT_TON
}

pub fn tons_to_pounds(tons: f64) -> f64 {
    tons * POUNDS_PER_SHORT_TON
}

pub fn gallons_to_liters(gallons: f64) -> f64 {
    gallons * LITERS_PER_GALLON
}

pub fn liters_to_gallons(liters: f64) -> f64 {
    liters / LITERS_PER_GALLON
}

pub fn convert_weight(pounds: f64, target: WeightUnit) -> f64 {
    match target {
        WeightUnit::Pounds => pounds,
        WeightUnit::Kilograms => pounds_to_kilograms(pounds),
        WeightUnit::ShortTons => pounds_to_tons(pounds),
    }
}

pub fn convert_volume(gallons: f64, target: VolumeUnit) -> f64 {
    match target {
        VolumeUnit::Gallons => gallons,
        VolumeUnit::Liters => gallons_to_liters(gallons),
    }
}

pub fn display_weight(pounds: f64, display_as_metric: bool) -> (f64, &'static str) {
    if display_as_metric {
        (pounds_to_kilograms(pounds), "kg")
    } else {
        (pounds, "lb")
    }
}

pub fn display_volume(gallons: f64, display_as_metric: bool) -> (f64, &'static str) {
    if display_as_metric {
        (gallons_to_liters(gallons), "L")
    } else {
        (gallons, "gal")
    }
}

/// Reusable programs track the share of items that come back. Some views
/// show the share that is lost instead (shrinkage). Rates are percentages.
pub fn to_display_rate(return_rate: f64, use_shrinkage_rate: bool) -> f64 {
    if use_shrinkage_rate {
        100.0 - return_rate
    } else {
        return_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_weight_both_ways() {
        let kg = pounds_to_kilograms(10.0);
        assert!((kg - 4.535_923_7).abs() < 1e-9);
        assert!((kilograms_to_pounds(kg) - 10.0).abs() < 1e-9);
        assert!((pounds_to_tons(3_000.0) - 1.5).abs() < 1e-12);
        assert!((tons_to_pounds(1.5) - 3_000.0).abs() < 1e-9);
    }

    #[test]
    fn converts_negative_change_values() {
        assert!((pounds_to_kilograms(-2.0) + 0.907_184_74).abs() < 1e-9);
        assert!((gallons_to_liters(-1.0) + LITERS_PER_GALLON).abs() < 1e-12);
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert!(pounds_to_kilograms(f64::NAN).is_nan());
        assert_eq!(gallons_to_liters(f64::INFINITY), f64::INFINITY);
        assert_eq!(pounds_to_tons(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn unit_selectors_pick_the_right_conversion() {
        assert_eq!(convert_weight(4.0, WeightUnit::Pounds), 4.0);
        assert!((convert_weight(4_000.0, WeightUnit::ShortTons) - 2.0).abs() < 1e-12);
        assert!((convert_volume(2.0, VolumeUnit::Liters) - 7.570_823_568).abs() < 1e-9);
        assert_eq!(display_weight(1.0, false), (1.0, "lb"));
        assert_eq!(display_volume(1.0, true).1, "L");
    }

    #[test]
    fn display_rate_inverts_only_for_shrinkage() {
        assert_eq!(to_display_rate(85.0, false), 85.0);
        assert_eq!(to_display_rate(85.0, true), 15.0);
        assert_eq!(to_display_rate(100.0, true), 0.0);
    }
}
