use tracing::{debug, warn};

use crate::catalog::{Material, Product, ProductCatalog, ProductLookup};
use crate::error::{IssueProblem, LineItemIssue, OrphanReference, ValidationError};
use crate::factors::Factors;
use crate::lineitem::fields::FieldReader;
use crate::lineitem::raw::{
    RawBottleStation, RawCostItem, RawDishwasher, RawLineItem, RawReusable, RawSingleUse,
    RawTransportation,
};
use crate::lineitem::{GroupKey, ItemDetails, LineItem, LineItemKind, Profile};
use crate::units::pounds_to_tons;

const MAX_OPERATING_DAYS: f64 = 366.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub item: LineItem,
    pub orphan: Option<OrphanReference>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedItems {
    pub items: Vec<LineItem>,
    pub orphans: Vec<OrphanReference>,
}

pub struct Normalizer<'a> {
    catalog: &'a dyn ProductCatalog,
    factors: &'a Factors,
}

struct ResolvedProduct<'c> {
    product: Option<(&'c Product, &'c Material)>,
    category: GroupKey,
    product_type: GroupKey,
    material: GroupKey,
    orphan: Option<OrphanReference>,
}

impl<'a> Normalizer<'a> {
    pub fn new(catalog: &'a dyn ProductCatalog, factors: &'a Factors) -> Self {
        Self { catalog, factors }
    }

    pub fn normalize_all(&self, raw_items: &[RawLineItem]) -> Result<NormalizedItems, ValidationError> {
        let mut out = NormalizedItems::default();
        let mut issues = Vec::new();
        for raw in raw_items {
            match self.normalize(raw) {
                Ok(normalized) => {
                    if let Some(orphan) = normalized.orphan {
                        warn!("{orphan}; grouping as uncategorized");
                        out.orphans.push(orphan);
                    }
                    out.items.push(normalized.item);
                }
                Err(mut item_issues) => issues.append(&mut item_issues),
            }
        }
        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }
        debug!(
            "normalized {} line items ({} orphaned)",
            out.items.len(),
            out.orphans.len()
        );
        Ok(out)
    }

    pub fn normalize(&self, raw: &RawLineItem) -> Result<NormalizedItem, Vec<LineItemIssue>> {
        match raw {
            RawLineItem::SingleUse(item) => self.single_use(item),
            RawLineItem::Reusable(item) => self.reusable(item),
            RawLineItem::Labor(item) => self.cost_item(LineItemKind::Labor, item, None),
            RawLineItem::WasteHauling(item) => self.cost_item(
                LineItemKind::WasteHauling,
                &item.cost,
                item.waste_stream.clone().or_else(|| item.service_type.clone()),
            ),
            RawLineItem::OtherExpense(item) => self.cost_item(
                LineItemKind::OtherExpense,
                &item.cost,
                item.expense_type.clone(),
            ),
            RawLineItem::Dishwasher(item) => self.dishwasher(item),
            RawLineItem::Transportation(item) => self.transportation(item),
            RawLineItem::BottleStation(item) => self.bottle_station(item),
        }
        .map(|(item, orphan)| NormalizedItem { item, orphan })
    }

    fn single_use(
        &self,
        raw: &RawSingleUse,
    ) -> Result<(LineItem, Option<OrphanReference>), Vec<LineItemIssue>> {
        let mut reader = FieldReader::new(&raw.id, LineItemKind::SingleUse);
        require_product_id(&mut reader, &raw.product_id);
        let cases = reader.quantity("casesPurchased", raw.cases_purchased.as_ref());
        let case_cost = reader.quantity("caseCost", raw.case_cost.as_ref());
        let units_per_case = reader.optional_quantity("unitsPerCase", raw.units_per_case.as_ref());
        let frequency = reader.frequency("frequency", raw.frequency.as_deref());
        let new_cases = reader.quantity("newCasesPurchased", raw.new_cases_purchased.as_ref());
        let new_case_cost = reader
            .optional_quantity("newCaseCost", raw.new_case_cost.as_ref())
            .unwrap_or(case_cost);
        reader.finish()?;

        let resolved = self.resolve(&raw.id, &raw.product_id);
        let occurrences = frequency.occurrences_per_year();
        let units_per_case = units_per_case
            .or_else(|| resolved.product.map(|(p, _)| p.units_per_case))
            .unwrap_or(0.0);

        let mut baseline = self.product_profile(
            cases * occurrences,
            case_cost,
            units_per_case,
            resolved.product,
            true,
        );
        let mut forecast = self.product_profile(
            new_cases * occurrences,
            new_case_cost,
            units_per_case,
            resolved.product,
            true,
        );
        // A one-off purchase is upfront spend, never a recurring saving.
        let one_time_cost = if frequency.is_one_time() {
            let upfront = forecast.cost;
            baseline.cost = 0.0;
            forecast.cost = 0.0;
            upfront
        } else {
            0.0
        };

        Ok((
            LineItem {
                id: raw.id.clone(),
                kind: LineItemKind::SingleUse,
                category: resolved.category,
                product_type: resolved.product_type,
                material: resolved.material,
                occurrences_per_year: occurrences,
                one_time_cost,
                baseline,
                forecast,
                details: ItemDetails::SingleUse {
                    product_id: raw.product_id.clone(),
                },
            },
            resolved.orphan,
        ))
    }

    fn reusable(
        &self,
        raw: &RawReusable,
    ) -> Result<(LineItem, Option<OrphanReference>), Vec<LineItemIssue>> {
        let mut reader = FieldReader::new(&raw.id, LineItemKind::Reusable);
        require_product_id(&mut reader, &raw.product_id);
        let cases = reader.quantity("casesPurchased", raw.cases_purchased.as_ref());
        let case_cost = reader.quantity("caseCost", raw.case_cost.as_ref());
        let units_per_case = reader.optional_quantity("unitsPerCase", raw.units_per_case.as_ref());
        let repurchase = reader.fraction(
            "annualRepurchasePercentage",
            raw.annual_repurchase_percentage.as_ref(),
        );
        let return_rate = reader
            .bounded("returnRate", raw.return_rate.as_ref(), 0.0, 100.0)
            .unwrap_or(100.0);
        reader.finish()?;

        let resolved = self.resolve(&raw.id, &raw.product_id);
        let units_per_case = units_per_case
            .or_else(|| resolved.product.map(|(p, _)| p.units_per_case))
            .unwrap_or(0.0);
        let unit_weight_lbs = resolved
            .product
            .map(|(p, _)| p.unit_weight_lbs)
            .unwrap_or(0.0);
        let product_name = raw
            .product_name
            .clone()
            .or_else(|| resolved.product.map(|(p, _)| p.name.clone()))
            .unwrap_or_else(|| raw.product_id.clone());

        // Reusables ship once, so the replacement profile carries no boxes.
        let forecast = self.product_profile(
            cases * repurchase,
            case_cost,
            units_per_case,
            resolved.product,
            false,
        );

        Ok((
            LineItem {
                id: raw.id.clone(),
                kind: LineItemKind::Reusable,
                category: resolved.category,
                product_type: resolved.product_type,
                material: resolved.material,
                occurrences_per_year: 1.0,
                one_time_cost: cases * case_cost,
                baseline: Profile::default(),
                forecast,
                details: ItemDetails::Reusable {
                    product_id: raw.product_id.clone(),
                    product_name,
                    fleet_units: cases * units_per_case,
                    unit_weight_lbs,
                    return_rate,
                },
            },
            resolved.orphan,
        ))
    }

    fn cost_item(
        &self,
        kind: LineItemKind,
        raw: &RawCostItem,
        subtype: Option<String>,
    ) -> Result<(LineItem, Option<OrphanReference>), Vec<LineItemIssue>> {
        let mut reader = FieldReader::new(&raw.id, kind);
        let (item, _) = read_cost(&mut reader, raw);
        reader.finish()?;
        Ok((
            item.build(
                raw,
                kind,
                Profile::default(),
                Profile::default(),
                ItemDetails::Expense {
                    description: raw.description.clone(),
                    subtype,
                },
            ),
            None,
        ))
    }

    fn transportation(
        &self,
        raw: &RawTransportation,
    ) -> Result<(LineItem, Option<OrphanReference>), Vec<LineItemIssue>> {
        let kind = LineItemKind::Transportation;
        let mut reader = FieldReader::new(&raw.cost.id, kind);
        let (cost, occurrences) = read_cost(&mut reader, &raw.cost);
        let miles = reader
            .optional_quantity("miles", raw.miles.as_ref())
            .unwrap_or(0.0);
        let new_miles = reader
            .optional_quantity("newMiles", raw.new_miles.as_ref())
            .unwrap_or(miles);
        reader.finish()?;

        let factor = self.factors.transport_mtco2e_per_mile;
        let emissions = |miles: f64| Profile {
            gas_emissions: miles * occurrences * factor,
            ..Profile::default()
        };
        Ok((
            cost.build(
                &raw.cost,
                kind,
                emissions(miles),
                emissions(new_miles),
                ItemDetails::Transportation {
                    baseline_miles: miles * occurrences,
                    forecast_miles: new_miles * occurrences,
                },
            ),
            None,
        ))
    }

    fn dishwasher(
        &self,
        raw: &RawDishwasher,
    ) -> Result<(LineItem, Option<OrphanReference>), Vec<LineItemIssue>> {
        let mut reader = FieldReader::new(&raw.id, LineItemKind::Dishwasher);
        let racks = reader.quantity("racksPerDay", raw.racks_per_day.as_ref());
        let days = reader.quantity("operatingDays", raw.operating_days.as_ref());
        let new_racks = reader
            .optional_quantity("newRacksPerDay", raw.new_racks_per_day.as_ref())
            .unwrap_or(racks);
        let new_days = reader
            .bounded(
                "newOperatingDays",
                raw.new_operating_days.as_ref(),
                0.0,
                MAX_OPERATING_DAYS,
            )
            .unwrap_or(days);
        let water_per_rack = reader.quantity("waterGallonsPerRack", raw.water_gallons_per_rack.as_ref());
        let kwh_per_rack = reader
            .optional_quantity("energyKwhPerRack", raw.energy_kwh_per_rack.as_ref())
            .unwrap_or(0.0);
        let therms_per_rack = reader
            .optional_quantity("gasThermsPerRack", raw.gas_therms_per_rack.as_ref())
            .unwrap_or(0.0);
        if days > MAX_OPERATING_DAYS {
            reader.push(
                "operatingDays",
                IssueProblem::OutOfRange {
                    value: days,
                    min: 0.0,
                    max: MAX_OPERATING_DAYS,
                },
            );
        }
        reader.finish()?;

        let baseline_racks = racks * days;
        let forecast_racks = new_racks * new_days;
        let profile = |annual_racks: f64| {
            let water = annual_racks * water_per_rack;
            let kwh = annual_racks * kwh_per_rack;
            let therms = annual_racks * therms_per_rack;
            Profile {
                cost: water * self.factors.water_rate_per_gallon
                    + kwh * self.factors.electric_rate_per_kwh
                    + therms * self.factors.gas_rate_per_therm,
                gas_emissions: kwh * self.factors.electric_mtco2e_per_kwh
                    + therms * self.factors.gas_mtco2e_per_therm,
                water_usage: water,
                ..Profile::default()
            }
        };

        Ok((
            LineItem {
                id: raw.id.clone(),
                kind: LineItemKind::Dishwasher,
                category: GroupKey::for_kind(LineItemKind::Dishwasher),
                product_type: GroupKey::for_kind(LineItemKind::Dishwasher),
                material: GroupKey::for_kind(LineItemKind::Dishwasher),
                occurrences_per_year: days.max(1.0),
                one_time_cost: 0.0,
                baseline: profile(baseline_racks),
                forecast: profile(forecast_racks),
                details: ItemDetails::Dishwasher {
                    baseline_racks,
                    forecast_racks,
                },
            },
            None,
        ))
    }

    fn bottle_station(
        &self,
        raw: &RawBottleStation,
    ) -> Result<(LineItem, Option<OrphanReference>), Vec<LineItemIssue>> {
        let kind = LineItemKind::BottleStation;
        let mut reader = FieldReader::new(&raw.id, kind);
        let gallons = reader.quantity("gallonsDispensed", raw.gallons_dispensed.as_ref());
        let frequency = reader.frequency("frequency", raw.frequency.as_deref());
        reader.finish()?;

        let occurrences = frequency.occurrences_per_year();
        Ok((
            LineItem {
                id: raw.id.clone(),
                kind,
                category: GroupKey::for_kind(kind),
                product_type: GroupKey::for_kind(kind),
                material: GroupKey::for_kind(kind),
                occurrences_per_year: occurrences,
                one_time_cost: 0.0,
                baseline: Profile::default(),
                forecast: Profile::default(),
                details: ItemDetails::BottleStation {
                    annual_gallons: gallons * occurrences,
                },
            },
            None,
        ))
    }

    fn resolve(&self, line_item_id: &str, product_id: &str) -> ResolvedProduct<'_> {
        let found = match self.catalog.resolve_product(product_id) {
            ProductLookup::Found(product) => self
                .catalog
                .material(&product.material_id)
                .map(|material| (product, material)),
            ProductLookup::NotFound => None,
        };

        match found {
            Some((product, material)) => ResolvedProduct {
                product: Some((product, material)),
                category: GroupKey::named(
                    &product.category_id,
                    self.catalog
                        .category_name(&product.category_id)
                        .unwrap_or(&product.category_id),
                ),
                product_type: GroupKey::named(
                    &product.product_type_id,
                    self.catalog
                        .product_type_name(&product.product_type_id)
                        .unwrap_or(&product.product_type_id),
                ),
                material: GroupKey::named(&material.id, &material.name),
                orphan: None,
            },
            None => ResolvedProduct {
                product: None,
                category: GroupKey::Uncategorized,
                product_type: GroupKey::Uncategorized,
                material: GroupKey::Uncategorized,
                orphan: Some(OrphanReference {
                    line_item_id: line_item_id.to_string(),
                    product_id: product_id.to_string(),
                }),
            },
        }
    }

    fn product_profile(
        &self,
        annual_cases: f64,
        case_cost: f64,
        units_per_case: f64,
        product: Option<(&Product, &Material)>,
        ships_in_boxes: bool,
    ) -> Profile {
        let units = annual_cases * units_per_case;
        let cost = annual_cases * case_cost;
        let Some((product, material)) = product else {
            return Profile {
                cost,
                units,
                ..Profile::default()
            };
        };

        let weight = units * product.unit_weight_lbs;
        let (shipping_box_weight, shipping_box_emissions) = if ships_in_boxes {
            let box_weight = annual_cases * product.box_weight_lbs;
            let box_factor = self
                .catalog
                .material(&self.factors.shipping_box_material)
                .map(|m| m.ghg_mtco2e_per_ton)
                .unwrap_or(0.0);
            (box_weight, pounds_to_tons(box_weight) * box_factor)
        } else {
            (0.0, 0.0)
        };

        Profile {
            cost,
            units,
            weight,
            gas_emissions: pounds_to_tons(weight) * material.ghg_mtco2e_per_ton,
            water_usage: weight * material.water_gallons_per_lb,
            shipping_box_weight,
            shipping_box_emissions,
        }
    }
}

fn require_product_id(reader: &mut FieldReader<'_>, product_id: &str) {
    if product_id.trim().is_empty() {
        reader.push("productId", IssueProblem::Missing);
    }
}

struct CostFigures {
    baseline: f64,
    forecast: f64,
    occurrences: f64,
    one_time: bool,
}

fn read_cost(reader: &mut FieldReader<'_>, raw: &RawCostItem) -> (CostFigures, f64) {
    let cost = reader
        .optional_quantity("cost", raw.cost.as_ref())
        .unwrap_or(0.0);
    let new_cost = reader.quantity("newCost", raw.new_cost.as_ref());
    let frequency = reader.frequency("frequency", raw.frequency.as_deref());
    let occurrences = frequency.occurrences_per_year();
    (
        CostFigures {
            baseline: cost,
            forecast: new_cost,
            occurrences,
            one_time: frequency.is_one_time(),
        },
        occurrences,
    )
}

impl CostFigures {
    fn build(
        self,
        raw: &RawCostItem,
        kind: LineItemKind,
        mut baseline: Profile,
        mut forecast: Profile,
        details: ItemDetails,
    ) -> LineItem {
        let one_time_cost = if self.one_time {
            self.forecast
        } else {
            baseline.cost = self.baseline * self.occurrences;
            forecast.cost = self.forecast * self.occurrences;
            0.0
        };
        LineItem {
            id: raw.id.clone(),
            kind,
            category: GroupKey::for_kind(kind),
            product_type: GroupKey::for_kind(kind),
            material: GroupKey::for_kind(kind),
            occurrences_per_year: self.occurrences,
            one_time_cost,
            baseline,
            forecast,
            details,
        }
    }
}
