use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::change::{ChangeMetric, PairSum};
use crate::lineitem::{GroupKey, LineItem};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Category,
    ProductType,
    Material,
}

impl GroupBy {
    pub const ALL: [GroupBy; 3] = [GroupBy::Category, GroupBy::ProductType, GroupBy::Material];

    pub fn key_of<'i>(&self, item: &'i LineItem) -> &'i GroupKey {
        match self {
            Self::Category => &item.category,
            Self::ProductType => &item.product_type,
            Self::Material => &item.material,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::ProductType => "Product type",
            Self::Material => "Material",
        }
    }

    pub fn supports_cost(&self) -> bool {
        !matches!(self, Self::Material)
    }
}

impl Display for GroupBy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Category => "category",
            Self::ProductType => "product_type",
            Self::Material => "material",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Error)]
#[error("unknown grouping key: {0}")]
pub struct GroupByParseError(pub String);

impl FromStr for GroupBy {
    type Err = GroupByParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "category" | "categories" => Ok(Self::Category),
            "product_type" | "producttype" | "type" => Ok(Self::ProductType),
            "material" | "materials" => Ok(Self::Material),
            _ => Err(GroupByParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Measure {
    Available(ChangeMetric),
    Unavailable,
}

impl Measure {
    pub fn available(&self) -> Option<&ChangeMetric> {
        match self {
            Self::Available(metric) => Some(metric),
            Self::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RollupRow {
    pub group: GroupKey,
    pub label: String,
    pub line_item_count: usize,
    pub cost: Measure,
    pub weight: ChangeMetric,
    pub gas_emissions: ChangeMetric,
    pub water_usage: ChangeMetric,
}

impl RollupRow {
    fn is_active(&self) -> bool {
        let cost_zero = self.cost.available().map(|m| m.is_all_zero()).unwrap_or(true);
        !(cost_zero
            && self.weight.is_all_zero()
            && self.gas_emissions.is_all_zero()
            && self.water_usage.is_all_zero())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupOptions {
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricTotals {
    pub cost: PairSum,
    pub weight: PairSum,
    pub gas_emissions: PairSum,
    pub water_usage: PairSum,
}

impl MetricTotals {
    pub fn push(&mut self, item: &LineItem) {
        let (b, f) = (&item.baseline, &item.forecast);
        self.cost.push(b.cost, f.cost);
        self.weight.push(b.weight, f.weight);
        self.gas_emissions.push(b.gas_emissions, f.gas_emissions);
        self.water_usage.push(b.water_usage, f.water_usage);
    }
}

pub fn project_totals(items: &[LineItem]) -> MetricTotals {
    let mut totals = MetricTotals::default();
    for item in items {
        totals.push(item);
    }
    totals
}

/// Groups items by `group_by` in first-seen order and folds each group into
/// summed baseline/forecast metrics.
pub fn roll_up(items: &[LineItem], group_by: GroupBy, options: RollupOptions) -> Vec<RollupRow> {
    let mut index: HashMap<&GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(&GroupKey, MetricTotals, usize)> = Vec::new();

    for item in items {
        let key = group_by.key_of(item);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, MetricTotals::default(), 0));
            groups.len() - 1
        });
        let (_, totals, count) = &mut groups[slot];
        totals.push(item);
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(key, totals, count)| RollupRow {
            group: key.clone(),
            label: key.label().to_string(),
            line_item_count: count,
            cost: if group_by.supports_cost() {
                Measure::Available(totals.cost.finish())
            } else {
                Measure::Unavailable
            },
            weight: totals.weight.finish(),
            gas_emissions: totals.gas_emissions.finish(),
            water_usage: totals.water_usage.finish(),
        })
        .filter(|row| !options.active_only || row.is_active())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupedResults {
    pub by_category: Vec<RollupRow>,
    pub by_product_type: Vec<RollupRow>,
    pub by_material: Vec<RollupRow>,
}

pub fn roll_up_all(items: &[LineItem], options: RollupOptions) -> GroupedResults {
    GroupedResults {
        by_category: roll_up(items, GroupBy::Category, options),
        by_product_type: roll_up(items, GroupBy::ProductType, options),
        by_material: roll_up(items, GroupBy::Material, options),
    }
}
