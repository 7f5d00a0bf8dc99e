use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::ProductCatalog;
use crate::change::PairSum;
use crate::error::{EngineError, OrphanReference};
use crate::factors::{BottleStationFactors, Factors};
use crate::lineitem::{LineItem, LineItemKind, NormalizedItems, Normalizer, RawLineItem};
use crate::options::EngineOptions;
use crate::results::bottle_station::compile_bottle_stations;
use crate::results::environmental::compile_environmental;
use crate::results::financial::compile_financials;
use crate::results::products::compile_product_results;
use crate::results::{
    AnnualSummary, BottleStationResults, EnvironmentalResults, FinancialResults, ProductResults,
};
use crate::rollup::{roll_up, GroupBy, RollupRow};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionsResponse {
    pub annual_summary: AnnualSummary,
    pub financial_results: FinancialResults,
    pub environmental_results: EnvironmentalResults,
    pub single_use_results: ProductResults,
    pub reusable_results: ProductResults,
    pub bottle_station_results: BottleStationResults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRun {
    pub response: ProjectionsResponse,
    pub orphans: Vec<OrphanReference>,
}

pub fn assemble(
    items: &[LineItem],
    options: &EngineOptions,
    bottle: &BottleStationFactors,
) -> ProjectionsResponse {
    let financial_results = compile_financials(items);
    let environmental_results = compile_environmental(items, options.project_category);
    let rollup = options.rollup();
    let single_use_results =
        compile_product_results(items, LineItemKind::SingleUse, rollup, options.use_shrinkage_rate);
    let reusable_results =
        compile_product_results(items, LineItemKind::Reusable, rollup, options.use_shrinkage_rate);
    let bottle_station_results = compile_bottle_stations(items, bottle);

    let mut single_use_units = PairSum::default();
    for item in items.iter().filter(|i| i.kind == LineItemKind::SingleUse) {
        single_use_units.push(item.baseline.units, item.forecast.units);
    }

    let annual_summary = AnnualSummary {
        dollar_cost: financial_results.summary.annual_cost,
        single_use_product_count: single_use_units.finish(),
        waste_weight: environmental_results.annual_waste_changes.total,
        greenhouse_gas_emissions: environmental_results.annual_gas_emission_changes.total,
        water_usage: environmental_results.annual_water_usage_changes.total,
    };
    debug!(
        "assembled projections for {} line items (annual cost change {:.2})",
        items.len(),
        annual_summary.dollar_cost
    );

    ProjectionsResponse {
        annual_summary,
        financial_results,
        environmental_results,
        single_use_results,
        reusable_results,
        bottle_station_results,
    }
}

pub struct ProjectionEngine<'a> {
    catalog: &'a dyn ProductCatalog,
    factors: &'a Factors,
    bottle: &'a BottleStationFactors,
}

impl<'a> ProjectionEngine<'a> {
    pub fn new(
        catalog: &'a dyn ProductCatalog,
        factors: &'a Factors,
        bottle: &'a BottleStationFactors,
    ) -> Self {
        Self {
            catalog,
            factors,
            bottle,
        }
    }

    pub fn normalize(&self, raw_items: &[RawLineItem]) -> Result<NormalizedItems, EngineError> {
        Ok(Normalizer::new(self.catalog, self.factors).normalize_all(raw_items)?)
    }

    pub fn project(
        &self,
        raw_items: &[RawLineItem],
        options: &EngineOptions,
    ) -> Result<ProjectionRun, EngineError> {
        let normalized = self.normalize(raw_items)?;
        let response = assemble(&normalized.items, options, self.bottle);
        info!(
            "projected {} line items ({} orphaned)",
            normalized.items.len(),
            normalized.orphans.len()
        );
        Ok(ProjectionRun {
            response,
            orphans: normalized.orphans,
        })
    }

    pub fn rollup(
        &self,
        raw_items: &[RawLineItem],
        group_by: GroupBy,
        kind: Option<LineItemKind>,
        options: &EngineOptions,
    ) -> Result<Vec<RollupRow>, EngineError> {
        let normalized = self.normalize(raw_items)?;
        let items: Vec<LineItem> = match kind {
            Some(kind) => normalized.items.into_iter().filter(|i| i.kind == kind).collect(),
            None => normalized.items,
        };
        Ok(roll_up(&items, group_by, options.rollup()))
    }
}

pub fn compute_projections(
    raw_items: &[RawLineItem],
    catalog: &dyn ProductCatalog,
    factors: &Factors,
    bottle: &BottleStationFactors,
    options: &EngineOptions,
) -> Result<ProjectionRun, EngineError> {
    ProjectionEngine::new(catalog, factors, bottle).project(raw_items, options)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::options::ProjectCategory;

    fn raw_items(value: serde_json::Value) -> Vec<RawLineItem> {
        serde_json::from_value(value).expect("valid line items")
    }

    fn run(value: serde_json::Value, options: EngineOptions) -> Result<ProjectionRun, EngineError> {
        let catalog = StaticCatalog::with_defaults();
        compute_projections(
            &raw_items(value),
            &catalog,
            &Factors::default(),
            &BottleStationFactors::default(),
            &options,
        )
    }

    #[test]
    fn empty_project_is_all_zero() {
        let run = run(json!([]), EngineOptions::default()).expect("empty project");
        let summary = run.response.annual_summary;
        assert_eq!(summary.dollar_cost, 0.0);
        assert!(summary.waste_weight.is_all_zero());
        assert_eq!(summary.waste_weight.change_percent, 0.0);
        assert!(run.response.single_use_results.grouped.by_category.is_empty());
        assert!(run.orphans.is_empty());
    }

    #[test]
    fn eliminating_cups_saves_their_cost() {
        let run = run(
            json!([{
                "kind": "single_use",
                "id": "cups",
                "productId": "hot-cup-paper-12oz",
                "casesPurchased": 10,
                "caseCost": 20,
                "newCasesPurchased": 0,
                "frequency": "Monthly"
            }]),
            EngineOptions::default(),
        )
        .expect("valid project");
        let response = run.response;
        assert_eq!(response.annual_summary.dollar_cost, -2_400.0);
        assert_eq!(response.financial_results.summary.payback_periods_months, 0);
        assert_eq!(response.annual_summary.single_use_product_count.baseline, 120_000.0);
        assert_eq!(response.annual_summary.waste_weight.change_percent, -1.0);
    }

    #[test]
    fn orphans_are_returned_beside_the_response() {
        let run = run(
            json!([{
                "kind": "single_use",
                "id": "mystery",
                "productId": "discontinued",
                "casesPurchased": 1,
                "caseCost": 50,
                "unitsPerCase": 100,
                "newCasesPurchased": 1,
                "frequency": "Annually"
            }]),
            EngineOptions::default(),
        )
        .expect("orphans are not fatal");
        assert_eq!(run.orphans.len(), 1);
        assert_eq!(run.orphans[0].product_id, "discontinued");
        let by_category = &run.response.single_use_results.grouped.by_category;
        assert!(by_category[0].group.is_uncategorized());
    }

    #[test]
    fn validation_failure_rejects_the_whole_project() {
        let err = run(
            json!([
                {"kind": "labor", "id": "staff", "newCost": "lots", "frequency": "Weekly"},
                {"kind": "labor", "id": "more-staff", "newCost": 10, "frequency": "Weekly"}
            ]),
            EngineOptions::default(),
        )
        .expect_err("non-numeric cost");
        let EngineError::Validation(validation) = err else {
            panic!("expected validation error");
        };
        assert_eq!(validation.offending_line_items(), vec!["staff"]);
    }

    #[test]
    fn event_projects_report_event_waste() {
        let options = EngineOptions {
            project_category: ProjectCategory::Event,
            ..EngineOptions::default()
        };
        let run = run(
            json!([{
                "kind": "single_use",
                "id": "cups",
                "productId": "hot-cup-paper-12oz",
                "casesPurchased": 2,
                "caseCost": 20,
                "newCasesPurchased": 0,
                "frequency": "One Time"
            }]),
            options,
        )
        .expect("valid event");
        let event = run
            .response
            .environmental_results
            .event_project_waste
            .expect("event waste");
        assert_eq!(event.units.baseline, 2_000.0);
    }

    #[test]
    fn rollup_filters_to_family() {
        let catalog = StaticCatalog::with_defaults();
        let factors = Factors::default();
        let bottle = BottleStationFactors::default();
        let engine = ProjectionEngine::new(&catalog, &factors, &bottle);
        let items = raw_items(json!([
            {"kind": "single_use", "id": "cups", "productId": "hot-cup-paper-12oz",
             "casesPurchased": 1, "caseCost": 20, "newCasesPurchased": 1,
             "frequency": "Monthly"},
            {"kind": "labor", "id": "staff", "newCost": 100, "frequency": "Weekly"}
        ]));
        let all = engine
            .rollup(&items, GroupBy::Category, None, &EngineOptions::default())
            .expect("rollup");
        assert_eq!(all.len(), 2);
        let single_use = engine
            .rollup(
                &items,
                GroupBy::Category,
                Some(LineItemKind::SingleUse),
                &EngineOptions::default(),
            )
            .expect("rollup");
        assert_eq!(single_use.len(), 1);
    }
}
