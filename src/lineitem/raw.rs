use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lineitem::LineItemKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawLineItem {
    SingleUse(RawSingleUse),
    Reusable(RawReusable),
    Labor(RawCostItem),
    WasteHauling(RawWasteHauling),
    OtherExpense(RawOtherExpense),
    Dishwasher(RawDishwasher),
    Transportation(RawTransportation),
    BottleStation(RawBottleStation),
}

impl RawLineItem {
    pub fn id(&self) -> &str {
        match self {
            Self::SingleUse(item) => &item.id,
            Self::Reusable(item) => &item.id,
            Self::Labor(item) => &item.id,
            Self::WasteHauling(item) => &item.cost.id,
            Self::OtherExpense(item) => &item.cost.id,
            Self::Dishwasher(item) => &item.id,
            Self::Transportation(item) => &item.cost.id,
            Self::BottleStation(item) => &item.id,
        }
    }

    pub fn kind(&self) -> LineItemKind {
        match self {
            Self::SingleUse(_) => LineItemKind::SingleUse,
            Self::Reusable(_) => LineItemKind::Reusable,
            Self::Labor(_) => LineItemKind::Labor,
            Self::WasteHauling(_) => LineItemKind::WasteHauling,
            Self::OtherExpense(_) => LineItemKind::OtherExpense,
            Self::Dishwasher(_) => LineItemKind::Dishwasher,
            Self::Transportation(_) => LineItemKind::Transportation,
            Self::BottleStation(_) => LineItemKind::BottleStation,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawSingleUse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    pub cases_purchased: Option<Value>,
    pub case_cost: Option<Value>,
    pub units_per_case: Option<Value>,
    pub frequency: Option<String>,
    pub new_cases_purchased: Option<Value>,
    pub new_case_cost: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawReusable {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    pub product_name: Option<String>,
    pub cases_purchased: Option<Value>,
    pub case_cost: Option<Value>,
    pub units_per_case: Option<Value>,
    /// Fraction of the fleet replaced each year, e.g. `0.2`.
    pub annual_repurchase_percentage: Option<Value>,
    /// Percent of items returned after use, 0 to 100.
    pub return_rate: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawCostItem {
    #[serde(default)]
    pub id: String,
    pub description: Option<String>,
    pub cost: Option<Value>,
    pub new_cost: Option<Value>,
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawWasteHauling {
    #[serde(flatten)]
    pub cost: RawCostItem,
    pub waste_stream: Option<String>,
    pub service_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawOtherExpense {
    #[serde(flatten)]
    pub cost: RawCostItem,
    pub expense_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawDishwasher {
    #[serde(default)]
    pub id: String,
    pub description: Option<String>,
    pub racks_per_day: Option<Value>,
    pub new_racks_per_day: Option<Value>,
    pub operating_days: Option<Value>,
    pub new_operating_days: Option<Value>,
    pub water_gallons_per_rack: Option<Value>,
    pub energy_kwh_per_rack: Option<Value>,
    pub gas_therms_per_rack: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawTransportation {
    #[serde(flatten)]
    pub cost: RawCostItem,
    pub miles: Option<Value>,
    pub new_miles: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawBottleStation {
    #[serde(default)]
    pub id: String,
    pub description: Option<String>,
    pub gallons_dispensed: Option<Value>,
    pub frequency: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_tagged_variants() {
        let items: Vec<RawLineItem> = serde_json::from_value(json!([
            {
                "kind": "single_use",
                "id": "cups",
                "productId": "hot-cup-paper-12oz",
                "casesPurchased": 10,
                "caseCost": "20",
                "frequency": "monthly",
                "newCasesPurchased": 0
            },
            {
                "kind": "waste_hauling",
                "id": "trash",
                "wasteStream": "landfill",
                "cost": 400,
                "newCost": 350,
                "frequency": "monthly"
            }
        ]))
        .expect("valid raw items");

        assert_eq!(items[0].kind(), LineItemKind::SingleUse);
        assert_eq!(items[1].id(), "trash");
        let RawLineItem::WasteHauling(hauling) = &items[1] else {
            panic!("expected waste hauling");
        };
        assert_eq!(hauling.waste_stream.as_deref(), Some("landfill"));
        assert_eq!(hauling.cost.new_cost, Some(json!(350)));
    }
}
