use crate::change::PairSum;
use crate::lineitem::{LineItem, LineItemKind};
use crate::results::{AnnualCostChanges, FinancialResults, FinancialSummary, OneTimeCosts};

#[derive(Default)]
struct CostBuckets {
    single_use: PairSum,
    reusable: PairSum,
    labor: PairSum,
    dishwashing: PairSum,
    waste_hauling: PairSum,
    transportation: PairSum,
    other: PairSum,
}

impl CostBuckets {
    fn bucket(&mut self, kind: LineItemKind) -> Option<&mut PairSum> {
        match kind {
            LineItemKind::SingleUse => Some(&mut self.single_use),
            LineItemKind::Reusable => Some(&mut self.reusable),
            LineItemKind::Labor => Some(&mut self.labor),
            LineItemKind::Dishwasher => Some(&mut self.dishwashing),
            LineItemKind::WasteHauling => Some(&mut self.waste_hauling),
            LineItemKind::Transportation => Some(&mut self.transportation),
            LineItemKind::OtherExpense => Some(&mut self.other),
            LineItemKind::BottleStation => None,
        }
    }

    fn total(&self) -> PairSum {
        let mut total = PairSum::default();
        for sum in [
            self.single_use,
            self.reusable,
            self.labor,
            self.dishwashing,
            self.waste_hauling,
            self.transportation,
            self.other,
        ] {
            total.push(sum.baseline, sum.forecast);
        }
        total
    }
}

pub fn compile_financials(items: &[LineItem]) -> FinancialResults {
    let mut one_time_costs = OneTimeCosts::default();
    let mut buckets = CostBuckets::default();

    for item in items {
        if item.kind == LineItemKind::Reusable {
            one_time_costs.reusable_product_costs += item.one_time_cost;
        } else {
            one_time_costs.additional_costs += item.one_time_cost;
        }
        if let Some(bucket) = buckets.bucket(item.kind) {
            bucket.push(item.baseline.cost, item.forecast.cost);
        }
    }
    one_time_costs.total = one_time_costs.reusable_product_costs + one_time_costs.additional_costs;

    let total = buckets.total().finish();
    let annual_cost_changes = AnnualCostChanges {
        single_use_product_costs: buckets.single_use.finish(),
        reusable_product_costs: buckets.reusable.finish(),
        labor_costs: buckets.labor.finish(),
        dishwashing_costs: buckets.dishwashing.finish(),
        waste_hauling_costs: buckets.waste_hauling.finish(),
        transportation_costs: buckets.transportation.finish(),
        other_expenses: buckets.other.finish(),
        total,
    };

    let annual_cost = total.change;
    FinancialResults {
        one_time_costs,
        annual_cost_changes,
        summary: FinancialSummary {
            annual_cost,
            one_time_cost: one_time_costs.total,
            annual_roi_percent: annual_roi_percent(annual_cost, one_time_costs.total),
            payback_periods_months: payback_period_months(annual_cost, one_time_costs.total),
        },
    }
}

pub fn annual_roi_percent(annual_cost: f64, one_time_total: f64) -> i64 {
    if one_time_total > 0.0 {
        ((-annual_cost) / one_time_total * 100.0).round() as i64
    } else {
        0
    }
}

/// Months of savings needed to recover the investment; `0` when there is no
/// investment or no saving to recover it with.
pub fn payback_period_months(annual_cost: f64, one_time_total: f64) -> u32 {
    if one_time_total > 0.0 && annual_cost < 0.0 {
        (one_time_total / (-annual_cost / 12.0)).ceil() as u32
    } else {
        0
    }
}
