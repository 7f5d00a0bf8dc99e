use crate::change::{ChangeMetric, PairSum};
use crate::lineitem::{ItemDetails, LineItem, LineItemKind};
use crate::options::ProjectCategory;
use crate::results::{
    EnvironmentalResults, EventProjectWaste, GasEmissionChanges, WasteChanges, WaterUsageChanges,
};

#[derive(Default)]
struct EnvironmentalSums {
    product_weight: PairSum,
    box_weight: PairSum,
    landfill_emissions: PairSum,
    box_emissions: PairSum,
    dishwashing_emissions: PairSum,
    transportation_emissions: PairSum,
    landfill_water: PairSum,
    dishwashing_water: PairSum,
}

impl EnvironmentalSums {
    fn push(&mut self, item: &LineItem) {
        let (b, f) = (&item.baseline, &item.forecast);
        match item.kind {
            LineItemKind::SingleUse => {
                self.product_weight.push(b.weight, f.weight);
                self.box_weight.push(b.shipping_box_weight, f.shipping_box_weight);
                self.landfill_emissions.push(b.gas_emissions, f.gas_emissions);
                self.box_emissions
                    .push(b.shipping_box_emissions, f.shipping_box_emissions);
                self.landfill_water.push(b.water_usage, f.water_usage);
            }
            LineItemKind::Dishwasher => {
                self.dishwashing_emissions.push(b.gas_emissions, f.gas_emissions);
                self.dishwashing_water.push(b.water_usage, f.water_usage);
            }
            LineItemKind::Transportation => {
                self.transportation_emissions.push(b.gas_emissions, f.gas_emissions);
            }
            _ => {}
        }
    }
}

fn total_of(parts: &[PairSum]) -> ChangeMetric {
    let mut total = PairSum::default();
    for part in parts {
        total.push(part.baseline, part.forecast);
    }
    total.finish()
}

fn when_changed(metric: ChangeMetric) -> Option<ChangeMetric> {
    metric.has_change().then_some(metric)
}

pub fn compile_environmental(items: &[LineItem], category: ProjectCategory) -> EnvironmentalResults {
    let mut sums = EnvironmentalSums::default();
    for item in items {
        sums.push(item);
    }

    let annual_waste_changes = WasteChanges {
        disposable_product_weight: sums.product_weight.finish(),
        disposable_shipping_box_weight: sums.box_weight.finish(),
        total: total_of(&[sums.product_weight, sums.box_weight]),
    };

    // Totals include every series, shown or not.
    let annual_gas_emission_changes = GasEmissionChanges {
        landfill_waste: sums.landfill_emissions.finish(),
        shipping_box: sums.box_emissions.finish(),
        dishwashing: when_changed(sums.dishwashing_emissions.finish()),
        transportation: when_changed(sums.transportation_emissions.finish()),
        total: total_of(&[
            sums.landfill_emissions,
            sums.box_emissions,
            sums.dishwashing_emissions,
            sums.transportation_emissions,
        ]),
    };

    let annual_water_usage_changes = WaterUsageChanges {
        landfill_waste: sums.landfill_water.finish(),
        dishwashing: when_changed(sums.dishwashing_water.finish()),
        total: total_of(&[sums.landfill_water, sums.dishwashing_water]),
    };

    let event_project_waste = match category {
        ProjectCategory::Event => Some(event_project_waste(items)),
        ProjectCategory::Default => None,
    };

    EnvironmentalResults {
        annual_waste_changes,
        annual_gas_emission_changes,
        annual_water_usage_changes,
        event_project_waste,
    }
}

pub fn event_project_waste(items: &[LineItem]) -> EventProjectWaste {
    let mut units = PairSum::default();
    let mut weight = PairSum::default();

    for item in items {
        match &item.details {
            ItemDetails::SingleUse { .. } => {
                let (baseline, forecast) = item.per_occurrence();
                units.push(baseline.units, forecast.units);
                weight.push(baseline.weight, forecast.weight);
            }
            ItemDetails::Reusable {
                fleet_units,
                unit_weight_lbs,
                return_rate,
                ..
            } => {
                let lost = fleet_units * (100.0 - return_rate) / 100.0;
                units.push(0.0, lost);
                weight.push(0.0, lost * unit_weight_lbs);
            }
            _ => {}
        }
    }

    EventProjectWaste {
        units: units.finish(),
        weight: weight.finish(),
    }
}
