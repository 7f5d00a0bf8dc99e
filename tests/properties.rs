//! Property-based tests for the projection engine.

use foodware_projections::catalog::StaticCatalog;
use foodware_projections::change::compute_change;
use foodware_projections::factors::{BottleStationFactors, Factors};
use foodware_projections::lineitem::{LineItem, Normalizer, RawLineItem};
use foodware_projections::options::EngineOptions;
use foodware_projections::projection::compute_projections;
use foodware_projections::rollup::{
    project_totals, roll_up, GroupBy, MetricTotals, RollupOptions, RollupRow,
};
use proptest::prelude::*;
use serde_json::json;

const EPSILON: f64 = 1e-9;

const PRODUCTS: [&str; 6] = [
    "hot-cup-paper-12oz",
    "lid-ps-hot",
    "clamshell-ps-9in",
    "cutlery-pp-kit",
    "reusable-cup-pp-16oz",
    "not-in-catalog",
];

const FREQUENCIES: [&str; 6] = ["Daily", "Weekly", "Monthly", "Quarterly", "Annually", "One Time"];

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
}

fn single_use_item() -> impl Strategy<Value = serde_json::Value> {
    (
        0usize..PRODUCTS.len(),
        0u32..60,
        0u32..400,
        0u32..60,
        0usize..FREQUENCIES.len(),
    )
        .prop_map(|(product, cases, cost, new_cases, frequency)| {
            json!({
                "kind": "single_use",
                "productId": PRODUCTS[product],
                "casesPurchased": cases,
                "caseCost": cost,
                "unitsPerCase": 100,
                "newCasesPurchased": new_cases,
                "frequency": FREQUENCIES[frequency]
            })
        })
}

fn other_item() -> impl Strategy<Value = serde_json::Value> {
    (0u32..5_000, 0u32..5_000, 0usize..FREQUENCIES.len(), 0u32..3).prop_map(
        |(cost, new_cost, frequency, kind)| {
            let kind = ["labor", "waste_hauling", "other_expense"][kind as usize];
            json!({
                "kind": kind,
                "cost": cost,
                "newCost": new_cost,
                "frequency": FREQUENCIES[frequency]
            })
        },
    )
}

fn project() -> impl Strategy<Value = Vec<RawLineItem>> {
    prop::collection::vec(prop_oneof![3 => single_use_item(), 1 => other_item()], 0..20).prop_map(
        |values| {
            values
                .into_iter()
                .enumerate()
                .map(|(idx, mut value)| {
                    value["id"] = json!(format!("item-{idx}"));
                    serde_json::from_value(value).expect("generated line item")
                })
                .collect()
        },
    )
}

fn normalize(raw: &[RawLineItem]) -> Vec<LineItem> {
    let catalog = StaticCatalog::with_defaults();
    let factors = Factors::default();
    Normalizer::new(&catalog, &factors)
        .normalize_all(raw)
        .expect("generated items are valid")
        .items
}

fn assert_conserved(items: &[LineItem], group_by: GroupBy) -> Result<(), TestCaseError> {
    let totals: MetricTotals = project_totals(items);
    let rows = roll_up(items, group_by, RollupOptions::default());

    let count: usize = rows.iter().map(|r| r.line_item_count).sum();
    prop_assert_eq!(count, items.len());

    let sum = |f: &dyn Fn(&RollupRow) -> (f64, f64)| {
        rows.iter().map(f).fold((0.0, 0.0), |acc, (b, x)| (acc.0 + b, acc.1 + x))
    };
    let (weight_b, weight_f) = sum(&|r: &RollupRow| (r.weight.baseline, r.weight.forecast));
    prop_assert!(close(weight_b, totals.weight.baseline));
    prop_assert!(close(weight_f, totals.weight.forecast));
    let (gas_b, gas_f) = sum(&|r: &RollupRow| (r.gas_emissions.baseline, r.gas_emissions.forecast));
    prop_assert!(close(gas_b, totals.gas_emissions.baseline));
    prop_assert!(close(gas_f, totals.gas_emissions.forecast));
    let (water_b, water_f) = sum(&|r: &RollupRow| (r.water_usage.baseline, r.water_usage.forecast));
    prop_assert!(close(water_b, totals.water_usage.baseline));
    prop_assert!(close(water_f, totals.water_usage.forecast));

    if group_by.supports_cost() {
        let (cost_b, cost_f) = sum(&|r: &RollupRow| {
            let cost = r.cost.available().copied().unwrap_or_default();
            (cost.baseline, cost.forecast)
        });
        prop_assert!(close(cost_b, totals.cost.baseline));
        prop_assert!(close(cost_f, totals.cost.forecast));
    }
    Ok(())
}

proptest! {
    #[test]
    fn change_is_forecast_minus_baseline(b in -1e9f64..1e9, f in -1e9f64..1e9) {
        let metric = compute_change(b, f);
        prop_assert!((metric.change - (f - b)).abs() <= EPSILON);
    }

    #[test]
    fn zero_baseline_never_divides(f in prop::num::f64::ANY) {
        let metric = compute_change(0.0, f);
        prop_assert_eq!(metric.change_percent, 0.0);
    }

    #[test]
    fn rollups_conserve_project_totals(raw in project()) {
        let items = normalize(&raw);
        for group_by in GroupBy::ALL {
            assert_conserved(&items, group_by)?;
        }
    }

    #[test]
    fn uncategorized_items_still_count(cases in 1u32..50, cost in 1u32..400) {
        let raw: Vec<RawLineItem> = serde_json::from_value(json!([
            {"kind": "single_use", "id": "known", "productId": "hot-cup-paper-12oz",
             "casesPurchased": 1, "caseCost": 10, "newCasesPurchased": 1, "frequency": "Annually"},
            {"kind": "single_use", "id": "orphan", "productId": "retired-sku",
             "casesPurchased": cases, "caseCost": cost, "newCasesPurchased": 0, "frequency": "Annually"}
        ])).expect("line items");
        let items = normalize(&raw);
        let rows = roll_up(&items, GroupBy::Category, RollupOptions::default());
        let named: f64 = rows
            .iter()
            .filter(|r| !r.group.is_uncategorized())
            .filter_map(|r| r.cost.available().map(|c| c.baseline))
            .sum();
        let total = project_totals(&items).cost.baseline;
        prop_assert_eq!(named, 10.0);
        prop_assert_eq!(total, 10.0 + f64::from(cases) * f64::from(cost));
        prop_assert!(rows.iter().any(|r| r.group.is_uncategorized()));
    }

    #[test]
    fn projections_are_idempotent(raw in project()) {
        let catalog = StaticCatalog::with_defaults();
        let factors = Factors::default();
        let bottle = BottleStationFactors::default();
        let options = EngineOptions::default();
        let first = compute_projections(&raw, &catalog, &factors, &bottle, &options).expect("valid");
        let second = compute_projections(&raw, &catalog, &factors, &bottle, &options).expect("valid");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn no_ratio_is_ever_nan(raw in project()) {
        let catalog = StaticCatalog::with_defaults();
        let run = compute_projections(
            &raw,
            &catalog,
            &Factors::default(),
            &BottleStationFactors::default(),
            &EngineOptions::default(),
        )
        .expect("valid");
        let body = serde_json::to_value(&run.response).expect("serialize");
        // serde_json writes NaN and infinities as null
        prop_assert!(!body.to_string().contains("null"));
    }
}
