use serde::{Deserialize, Serialize};

use crate::catalog::defaults::SHIPPING_BOX_MATERIAL;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Factors {
    #[serde(default = "default_electric_rate")]
    pub electric_rate_per_kwh: f64,
    #[serde(default = "default_gas_rate")]
    pub gas_rate_per_therm: f64,
    #[serde(default = "default_water_rate")]
    pub water_rate_per_gallon: f64,
    #[serde(default = "default_electric_emissions")]
    pub electric_mtco2e_per_kwh: f64,
    #[serde(default = "default_gas_emissions")]
    pub gas_mtco2e_per_therm: f64,
    #[serde(default = "default_transport_emissions")]
    pub transport_mtco2e_per_mile: f64,
    #[serde(default = "default_shipping_box_material")]
    pub shipping_box_material: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BottleStationFactors {
    /// 16.9 fl oz bottle.
    #[serde(default = "default_gallons_per_bottle")]
    pub gallons_per_bottle: f64,
    #[serde(default = "default_bottle_weight")]
    pub bottle_weight_lbs: f64,
}

impl Default for Factors {
    fn default() -> Self {
        Self {
            electric_rate_per_kwh: default_electric_rate(),
            gas_rate_per_therm: default_gas_rate(),
            water_rate_per_gallon: default_water_rate(),
            electric_mtco2e_per_kwh: default_electric_emissions(),
            gas_mtco2e_per_therm: default_gas_emissions(),
            transport_mtco2e_per_mile: default_transport_emissions(),
            shipping_box_material: default_shipping_box_material(),
        }
    }
}

impl Default for BottleStationFactors {
    fn default() -> Self {
        Self {
            gallons_per_bottle: default_gallons_per_bottle(),
            bottle_weight_lbs: default_bottle_weight(),
        }
    }
}

fn default_electric_rate() -> f64 {
    0.13
}

fn default_gas_rate() -> f64 {
    1.2
}

fn default_water_rate() -> f64 {
    0.012
}

fn default_electric_emissions() -> f64 {
    0.000_417
}

fn default_gas_emissions() -> f64 {
    0.005_3
}

fn default_transport_emissions() -> f64 {
    0.000_404
}

fn default_shipping_box_material() -> String {
    SHIPPING_BOX_MATERIAL.to_string()
}

fn default_gallons_per_bottle() -> f64 {
    0.132
}

fn default_bottle_weight() -> f64 {
    0.022
}
