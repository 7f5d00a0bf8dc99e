use crate::change::PairSum;
use crate::lineitem::{ItemDetails, LineItem, LineItemKind};
use crate::results::{ProductResults, ProductSummary, ReusableItemView};
use crate::rollup::{roll_up_all, RollupOptions};
use crate::units::to_display_rate;

pub fn compile_product_results(
    items: &[LineItem],
    kind: LineItemKind,
    rollup: RollupOptions,
    use_shrinkage_rate: bool,
) -> ProductResults {
    let family: Vec<LineItem> = items.iter().filter(|i| i.kind == kind).cloned().collect();

    let mut cost = PairSum::default();
    let mut units = PairSum::default();
    let mut weight = PairSum::default();
    let mut one_time_cost = 0.0;
    for item in &family {
        cost.push(item.baseline.cost, item.forecast.cost);
        units.push(item.baseline.units, item.forecast.units);
        weight.push(item.baseline.weight, item.forecast.weight);
        one_time_cost += item.one_time_cost;
    }

    let views = family
        .iter()
        .filter_map(|item| match &item.details {
            ItemDetails::Reusable {
                product_name,
                fleet_units,
                return_rate,
                ..
            } => Some(ReusableItemView {
                line_item_id: item.id.clone(),
                product_name: product_name.clone(),
                fleet_units: *fleet_units,
                return_rate: *return_rate,
                display_rate: to_display_rate(*return_rate, use_shrinkage_rate),
            }),
            _ => None,
        })
        .collect();

    ProductResults {
        summary: ProductSummary {
            annual_cost: cost.finish(),
            annual_units: units.finish(),
            annual_weight: weight.finish(),
            one_time_cost,
        },
        grouped: roll_up_all(&family, rollup),
        items: views,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::compute_change;
    use crate::lineitem::{GroupKey, Profile};

    fn reusable(id: &str, return_rate: f64) -> LineItem {
        LineItem {
            id: id.to_string(),
            kind: LineItemKind::Reusable,
            category: GroupKey::named("beverage-ware", "Beverage ware"),
            product_type: GroupKey::named("cup", "Cups"),
            material: GroupKey::named("plastic-pp", "Polypropylene"),
            occurrences_per_year: 1.0,
            one_time_cost: 450.0,
            baseline: Profile::default(),
            forecast: Profile {
                cost: 90.0,
                units: 100.0,
                weight: 9.0,
                ..Profile::default()
            },
            details: ItemDetails::Reusable {
                product_id: "reusable-cup-pp-16oz".to_string(),
                product_name: "Reusable cup".to_string(),
                fleet_units: 500.0,
                unit_weight_lbs: 0.09,
                return_rate,
            },
        }
    }

    fn labor() -> LineItem {
        let kind = LineItemKind::Labor;
        LineItem {
            id: "labor".to_string(),
            kind,
            category: GroupKey::for_kind(kind),
            product_type: GroupKey::for_kind(kind),
            material: GroupKey::for_kind(kind),
            occurrences_per_year: 12.0,
            one_time_cost: 0.0,
            baseline: Profile::default(),
            forecast: Profile::cost_only(1_200.0),
            details: ItemDetails::Expense {
                description: None,
                subtype: None,
            },
        }
    }

    #[test]
    fn only_counts_the_requested_family() {
        let items = vec![reusable("r1", 95.0), labor(), reusable("r2", 80.0)];
        let results = compile_product_results(&items, LineItemKind::Reusable, RollupOptions::default(), false);
        assert_eq!(results.summary.annual_cost, compute_change(0.0, 180.0));
        assert_eq!(results.summary.one_time_cost, 900.0);
        assert_eq!(results.grouped.by_category.len(), 1);
        assert_eq!(results.grouped.by_category[0].line_item_count, 2);
        assert_eq!(results.items.len(), 2);
        assert_eq!(results.items[1].display_rate, 80.0);
    }

    #[test]
    fn shrinkage_view_flips_display_rate_only() {
        let items = vec![reusable("r1", 95.0)];
        let results = compile_product_results(&items, LineItemKind::Reusable, RollupOptions::default(), true);
        assert_eq!(results.items[0].return_rate, 95.0);
        assert_eq!(results.items[0].display_rate, 5.0);
    }

    #[test]
    fn single_use_family_has_no_item_views() {
        let results =
            compile_product_results(&[reusable("r1", 95.0)], LineItemKind::SingleUse, RollupOptions::default(), false);
        assert!(results.items.is_empty());
        assert!(results.grouped.by_category.is_empty());
        assert_eq!(results.summary.annual_cost, compute_change(0.0, 0.0));
    }
}
