pub mod bottle_station;
pub mod environmental;
pub mod financial;
pub mod products;

use serde::{Deserialize, Serialize};

use crate::change::ChangeMetric;
use crate::rollup::GroupedResults;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeCosts {
    pub reusable_product_costs: f64,
    pub additional_costs: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnnualCostChanges {
    pub single_use_product_costs: ChangeMetric,
    pub reusable_product_costs: ChangeMetric,
    pub labor_costs: ChangeMetric,
    pub dishwashing_costs: ChangeMetric,
    pub waste_hauling_costs: ChangeMetric,
    pub transportation_costs: ChangeMetric,
    pub other_expenses: ChangeMetric,
    pub total: ChangeMetric,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FinancialSummary {
    /// Net new annual spend; negative is a saving.
    #[serde(rename = "annualCost")]
    pub annual_cost: f64,
    #[serde(rename = "oneTimeCost")]
    pub one_time_cost: f64,
    #[serde(rename = "annualROIPercent")]
    pub annual_roi_percent: i64,
    /// `0` means not applicable.
    #[serde(rename = "paybackPeriodsMonths")]
    pub payback_periods_months: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinancialResults {
    pub one_time_costs: OneTimeCosts,
    pub annual_cost_changes: AnnualCostChanges,
    pub summary: FinancialSummary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WasteChanges {
    pub disposable_product_weight: ChangeMetric,
    pub disposable_shipping_box_weight: ChangeMetric,
    pub total: ChangeMetric,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GasEmissionChanges {
    pub landfill_waste: ChangeMetric,
    pub shipping_box: ChangeMetric,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dishwashing: Option<ChangeMetric>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transportation: Option<ChangeMetric>,
    pub total: ChangeMetric,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WaterUsageChanges {
    pub landfill_waste: ChangeMetric,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dishwashing: Option<ChangeMetric>,
    pub total: ChangeMetric,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventProjectWaste {
    pub units: ChangeMetric,
    pub weight: ChangeMetric,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalResults {
    pub annual_waste_changes: WasteChanges,
    pub annual_gas_emission_changes: GasEmissionChanges,
    pub annual_water_usage_changes: WaterUsageChanges,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub event_project_waste: Option<EventProjectWaste>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BottleStationResults {
    pub station_count: usize,
    pub annual_gallons_dispensed: f64,
    pub bottles_avoided: f64,
    pub plastic_weight_avoided: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub annual_cost: ChangeMetric,
    pub annual_units: ChangeMetric,
    pub annual_weight: ChangeMetric,
    pub one_time_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReusableItemView {
    pub line_item_id: String,
    pub product_name: String,
    pub fleet_units: f64,
    pub return_rate: f64,
    pub display_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResults {
    pub summary: ProductSummary,
    #[serde(flatten)]
    pub grouped: GroupedResults,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub items: Vec<ReusableItemView>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnnualSummary {
    pub dollar_cost: f64,
    pub single_use_product_count: ChangeMetric,
    pub waste_weight: ChangeMetric,
    pub greenhouse_gas_emissions: ChangeMetric,
    pub water_usage: ChangeMetric,
}
