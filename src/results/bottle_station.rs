use crate::factors::BottleStationFactors;
use crate::lineitem::{ItemDetails, LineItem};
use crate::results::BottleStationResults;

pub fn compile_bottle_stations(items: &[LineItem], factors: &BottleStationFactors) -> BottleStationResults {
    let mut results = BottleStationResults::default();
    for item in items {
        if let ItemDetails::BottleStation { annual_gallons } = item.details {
            results.station_count += 1;
            results.annual_gallons_dispensed += annual_gallons;
        }
    }
    if factors.gallons_per_bottle > 0.0 {
        results.bottles_avoided = results.annual_gallons_dispensed / factors.gallons_per_bottle;
        results.plastic_weight_avoided = results.bottles_avoided * factors.bottle_weight_lbs;
    }
    results
}
