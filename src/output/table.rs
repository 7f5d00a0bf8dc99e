use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::catalog::CatalogData;
use crate::change::ChangeMetric;
use crate::output::{display_metric, Quantity};
use crate::projection::ProjectionsResponse;
use crate::results::{EnvironmentalResults, FinancialResults, ReusableItemView};
use crate::rollup::{GroupBy, Measure, RollupRow};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn format_amount(value: f64, quantity: Quantity) -> String {
    match quantity {
        Quantity::Cost => format!("{value:.2}"),
        Quantity::Count => format!("{value:.0}"),
        Quantity::Emissions => format!("{value:.3}"),
        Quantity::Weight | Quantity::Water => format!("{value:.1}"),
    }
}

fn change_cell(metric: &ChangeMetric, quantity: Quantity) -> Cell {
    let amount = format_amount(metric.change, quantity);
    let text = if metric.change > 0.0 {
        format!("+{amount}")
    } else {
        amount
    };
    if metric.change < 0.0 {
        Cell::new(text).fg(Color::Green)
    } else if metric.change > 0.0 {
        Cell::new(text).fg(Color::Red)
    } else {
        Cell::new(text)
    }
}

fn metric_row(label: &str, metric: &ChangeMetric, quantity: Quantity, display_as_metric: bool) -> Row {
    let shown = display_metric(metric, quantity, display_as_metric);
    Row::from(vec![
        Cell::new(label),
        Cell::new(quantity.unit(display_as_metric)),
        Cell::new(format_amount(shown.baseline, quantity)),
        Cell::new(format_amount(shown.forecast, quantity)),
        change_cell(&shown, quantity),
        Cell::new(format!("{:.1}%", shown.change_percent * 100.0)),
    ])
}

const METRIC_HEADER: [&str; 6] = ["Metric", "Unit", "Baseline", "Forecast", "Change", "Change %"];

pub fn render_summary_table(response: &ProjectionsResponse, display_as_metric: bool) -> String {
    let summary = &response.annual_summary;
    let mut table = new_table(METRIC_HEADER.to_vec());
    table.add_row(metric_row(
        "Annual cost",
        &response.financial_results.annual_cost_changes.total,
        Quantity::Cost,
        display_as_metric,
    ));
    table.add_row(metric_row(
        "Single-use products",
        &summary.single_use_product_count,
        Quantity::Count,
        display_as_metric,
    ));
    table.add_row(metric_row("Waste", &summary.waste_weight, Quantity::Weight, display_as_metric));
    table.add_row(metric_row(
        "GHG emissions",
        &summary.greenhouse_gas_emissions,
        Quantity::Emissions,
        display_as_metric,
    ));
    table.add_row(metric_row("Water usage", &summary.water_usage, Quantity::Water, display_as_metric));

    let financial = &response.financial_results.summary;
    let payback = if financial.payback_periods_months == 0 {
        "-".to_string()
    } else {
        format!("{} months", financial.payback_periods_months)
    };
    format!(
        "{table}\nOne-time cost: {:.2}\nAnnual ROI: {}%\nPayback: {payback}",
        financial.one_time_cost, financial.annual_roi_percent
    )
}

pub fn render_financial_table(results: &FinancialResults) -> String {
    let changes = &results.annual_cost_changes;
    let mut table = new_table(METRIC_HEADER.to_vec());
    for (label, metric) in [
        ("Single-use products", &changes.single_use_product_costs),
        ("Reusable products", &changes.reusable_product_costs),
        ("Labor", &changes.labor_costs),
        ("Dishwashing", &changes.dishwashing_costs),
        ("Waste hauling", &changes.waste_hauling_costs),
        ("Transportation", &changes.transportation_costs),
        ("Other expenses", &changes.other_expenses),
        ("Total", &changes.total),
    ] {
        table.add_row(metric_row(label, metric, Quantity::Cost, false));
    }
    let one_time = &results.one_time_costs;
    format!(
        "{table}\nOne-time: reusable products {:.2}, additional {:.2}, total {:.2}",
        one_time.reusable_product_costs, one_time.additional_costs, one_time.total
    )
}

pub fn render_environmental_table(results: &EnvironmentalResults, display_as_metric: bool) -> String {
    let mut table = new_table(METRIC_HEADER.to_vec());
    let waste = &results.annual_waste_changes;
    table.add_row(metric_row(
        "Disposable products",
        &waste.disposable_product_weight,
        Quantity::Weight,
        display_as_metric,
    ));
    table.add_row(metric_row(
        "Shipping boxes",
        &waste.disposable_shipping_box_weight,
        Quantity::Weight,
        display_as_metric,
    ));
    table.add_row(metric_row("Waste total", &waste.total, Quantity::Weight, display_as_metric));

    let gas = &results.annual_gas_emission_changes;
    table.add_row(metric_row(
        "Landfill emissions",
        &gas.landfill_waste,
        Quantity::Emissions,
        display_as_metric,
    ));
    table.add_row(metric_row(
        "Shipping box emissions",
        &gas.shipping_box,
        Quantity::Emissions,
        display_as_metric,
    ));
    if let Some(dishwashing) = &gas.dishwashing {
        table.add_row(metric_row(
            "Dishwashing emissions",
            dishwashing,
            Quantity::Emissions,
            display_as_metric,
        ));
    }
    if let Some(transportation) = &gas.transportation {
        table.add_row(metric_row(
            "Transportation emissions",
            transportation,
            Quantity::Emissions,
            display_as_metric,
        ));
    }
    table.add_row(metric_row("Emissions total", &gas.total, Quantity::Emissions, display_as_metric));

    let water = &results.annual_water_usage_changes;
    table.add_row(metric_row("Landfill water", &water.landfill_waste, Quantity::Water, display_as_metric));
    if let Some(dishwashing) = &water.dishwashing {
        table.add_row(metric_row("Dishwashing water", dishwashing, Quantity::Water, display_as_metric));
    }
    table.add_row(metric_row("Water total", &water.total, Quantity::Water, display_as_metric));

    if let Some(event) = &results.event_project_waste {
        table.add_row(metric_row("Per-event units", &event.units, Quantity::Count, display_as_metric));
        table.add_row(metric_row("Per-event waste", &event.weight, Quantity::Weight, display_as_metric));
    }
    table.to_string()
}

pub fn render_rollup_table(rows: &[RollupRow], group_by: GroupBy, display_as_metric: bool) -> String {
    let weight_unit = Quantity::Weight.unit(display_as_metric);
    let water_unit = Quantity::Water.unit(display_as_metric);
    let mut table = new_table(vec![
        group_by.label(),
        "Items",
        "Cost change",
        &format!("Weight change ({weight_unit})"),
        "GHG change (MTCO2e)",
        &format!("Water change ({water_unit})"),
    ]);
    for row in rows {
        let cost = match &row.cost {
            Measure::Available(metric) => change_cell(metric, Quantity::Cost),
            Measure::Unavailable => Cell::new("n/a"),
        };
        let weight = display_metric(&row.weight, Quantity::Weight, display_as_metric);
        let water = display_metric(&row.water_usage, Quantity::Water, display_as_metric);
        table.add_row(Row::from(vec![
            Cell::new(&row.label),
            Cell::new(row.line_item_count),
            cost,
            change_cell(&weight, Quantity::Weight),
            change_cell(&row.gas_emissions, Quantity::Emissions),
            change_cell(&water, Quantity::Water),
        ]));
    }
    table.to_string()
}

pub fn render_reusable_items_table(items: &[ReusableItemView], use_shrinkage_rate: bool) -> String {
    let rate_header = if use_shrinkage_rate {
        "Shrinkage %"
    } else {
        "Return %"
    };
    let mut table = new_table(vec!["Line item", "Product", "Fleet units", rate_header]);
    for item in items {
        table.add_row(vec![
            item.line_item_id.clone(),
            item.product_name.clone(),
            format!("{:.0}", item.fleet_units),
            format!("{:.1}", item.display_rate),
        ]);
    }
    table.to_string()
}

pub fn render_catalog_table(catalog: &CatalogData) -> String {
    let mut table = new_table(vec![
        "Product",
        "Name",
        "Category",
        "Type",
        "Material",
        "Unit weight (lb)",
        "Units/case",
    ]);
    for product in &catalog.products {
        let category = catalog
            .categories
            .get(&product.category_id)
            .cloned()
            .unwrap_or_else(|| product.category_id.clone());
        let product_type = catalog
            .product_types
            .get(&product.product_type_id)
            .cloned()
            .unwrap_or_else(|| product.product_type_id.clone());
        table.add_row(vec![
            product.id.clone(),
            product.name.clone(),
            category,
            product_type,
            product.material_id.clone(),
            format!("{:.3}", product.unit_weight_lbs),
            format!("{:.0}", product.units_per_case),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::change::compute_change;
    use crate::lineitem::GroupKey;

    fn row(label: &str, cost: Measure) -> RollupRow {
        RollupRow {
            group: GroupKey::named(label, label),
            label: label.to_string(),
            line_item_count: 2,
            cost,
            weight: compute_change(100.0, 0.0),
            gas_emissions: compute_change(0.5, 0.0),
            water_usage: compute_change(10.0, 10.0),
        }
    }

    #[test]
    fn rollup_table_marks_unavailable_cost() {
        let rows = vec![row("Paper", Measure::Unavailable)];
        let rendered = render_rollup_table(&rows, GroupBy::Material, false);
        assert!(rendered.contains("Paper"));
        assert!(rendered.contains("n/a"));
        assert!(rendered.contains("-100.0"));
    }

    #[test]
    fn rollup_table_converts_to_metric() {
        let rows = vec![row("Cups", Measure::Available(compute_change(10.0, 5.0)))];
        let rendered = render_rollup_table(&rows, GroupBy::Category, true);
        assert!(rendered.contains("(kg)"));
        assert!(rendered.contains("-45.4"));
        assert!(rendered.contains("-5.00"));
    }

    #[test]
    fn catalog_table_lists_products() {
        let catalog = StaticCatalog::with_defaults();
        let rendered = render_catalog_table(catalog.data());
        assert!(rendered.contains("hot-cup-paper-12oz"));
    }
}
