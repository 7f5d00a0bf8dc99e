use anyhow::Result;

use crate::change::ChangeMetric;
use crate::output::{display_metric, Quantity};
use crate::projection::ProjectionsResponse;
use crate::rollup::{GroupBy, RollupRow};

fn metric_fields(metric: &ChangeMetric) -> [String; 4] {
    [
        format!("{:.4}", metric.baseline),
        format!("{:.4}", metric.forecast),
        format!("{:.4}", metric.change),
        format!("{:.4}", metric.change_percent),
    ]
}

pub fn rollup_to_csv(rows: &[RollupRow], group_by: GroupBy, display_as_metric: bool) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    let mut header = vec![group_by.to_string(), "line_items".to_string()];
    for prefix in ["cost", "weight", "gas_emissions", "water_usage"] {
        for suffix in ["baseline", "forecast", "change", "change_percent"] {
            header.push(format!("{prefix}_{suffix}"));
        }
    }
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.label.clone(), row.line_item_count.to_string()];
        match row.cost.available() {
            Some(cost) => record.extend(metric_fields(cost)),
            None => record.extend(std::iter::repeat(String::new()).take(4)),
        }
        record.extend(metric_fields(&display_metric(
            &row.weight,
            Quantity::Weight,
            display_as_metric,
        )));
        record.extend(metric_fields(&row.gas_emissions));
        record.extend(metric_fields(&display_metric(
            &row.water_usage,
            Quantity::Water,
            display_as_metric,
        )));
        writer.write_record(&record)?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn summary_to_csv(response: &ProjectionsResponse, display_as_metric: bool) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["metric", "unit", "baseline", "forecast", "change", "change_percent"])?;
    let summary = &response.annual_summary;
    for (name, metric, quantity) in [
        ("annual_cost", &response.financial_results.annual_cost_changes.total, Quantity::Cost),
        ("single_use_products", &summary.single_use_product_count, Quantity::Count),
        ("waste_weight", &summary.waste_weight, Quantity::Weight),
        ("greenhouse_gas_emissions", &summary.greenhouse_gas_emissions, Quantity::Emissions),
        ("water_usage", &summary.water_usage, Quantity::Water),
    ] {
        let shown = display_metric(metric, quantity, display_as_metric);
        let [baseline, forecast, change, percent] = metric_fields(&shown);
        writer.write_record([
            name.to_string(),
            quantity.unit(display_as_metric).to_string(),
            baseline,
            forecast,
            change,
            percent,
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
