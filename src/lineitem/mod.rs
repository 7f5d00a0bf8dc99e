pub mod fields;
pub mod frequency;
pub mod normalize;
pub mod raw;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use frequency::Frequency;
pub use normalize::{NormalizedItems, Normalizer};
pub use raw::RawLineItem;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    SingleUse,
    Reusable,
    Labor,
    WasteHauling,
    OtherExpense,
    Dishwasher,
    Transportation,
    BottleStation,
}

impl LineItemKind {
    pub fn as_slug(self) -> &'static str {
        match self {
            Self::SingleUse => "single_use",
            Self::Reusable => "reusable",
            Self::Labor => "labor",
            Self::WasteHauling => "waste_hauling",
            Self::OtherExpense => "other_expense",
            Self::Dishwasher => "dishwasher",
            Self::Transportation => "transportation",
            Self::BottleStation => "bottle_station",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SingleUse => "Single-use products",
            Self::Reusable => "Reusable products",
            Self::Labor => "Labor",
            Self::WasteHauling => "Waste hauling",
            Self::OtherExpense => "Other expenses",
            Self::Dishwasher => "Dishwashing",
            Self::Transportation => "Transportation",
            Self::BottleStation => "Bottle stations",
        }
    }

    pub fn is_product(self) -> bool {
        matches!(self, Self::SingleUse | Self::Reusable)
    }
}

impl Display for LineItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupKey {
    Named { id: String, label: String },
    Uncategorized,
}

impl GroupKey {
    pub fn named(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Named {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn for_kind(kind: LineItemKind) -> Self {
        Self::named(kind.as_slug(), kind.label())
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Named { label, .. } => label,
            Self::Uncategorized => "Uncategorized",
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        matches!(self, Self::Uncategorized)
    }
}

/// Annualized figures for one side of the comparison. Weight in pounds,
/// water in gallons, emissions in MTCO2e.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub cost: f64,
    pub units: f64,
    pub weight: f64,
    pub gas_emissions: f64,
    pub water_usage: f64,
    pub shipping_box_weight: f64,
    pub shipping_box_emissions: f64,
}

impl Profile {
    pub fn cost_only(cost: f64) -> Self {
        Self {
            cost,
            ..Self::default()
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            cost: self.cost * factor,
            units: self.units * factor,
            weight: self.weight * factor,
            gas_emissions: self.gas_emissions * factor,
            water_usage: self.water_usage * factor,
            shipping_box_weight: self.shipping_box_weight * factor,
            shipping_box_emissions: self.shipping_box_emissions * factor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemDetails {
    SingleUse {
        product_id: String,
    },
    Reusable {
        product_id: String,
        product_name: String,
        fleet_units: f64,
        unit_weight_lbs: f64,
        return_rate: f64,
    },
    Expense {
        description: Option<String>,
        subtype: Option<String>,
    },
    Dishwasher {
        baseline_racks: f64,
        forecast_racks: f64,
    },
    Transportation {
        baseline_miles: f64,
        forecast_miles: f64,
    },
    BottleStation {
        annual_gallons: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub kind: LineItemKind,
    pub category: GroupKey,
    pub product_type: GroupKey,
    pub material: GroupKey,
    pub occurrences_per_year: f64,
    pub one_time_cost: f64,
    pub baseline: Profile,
    pub forecast: Profile,
    pub details: ItemDetails,
}

impl LineItem {
    pub fn is_orphaned(&self) -> bool {
        self.kind.is_product() && self.category.is_uncategorized()
    }

    pub fn per_occurrence(&self) -> (Profile, Profile) {
        let occurrences = self.occurrences_per_year.max(1.0);
        let factor = 1.0 / occurrences;
        (self.baseline.scaled(factor), self.forecast.scaled(factor))
    }
}
