use std::collections::BTreeMap;

use crate::catalog::{CatalogData, Material, Product};

pub const SHIPPING_BOX_MATERIAL: &str = "corrugated";

pub fn default_catalog_data() -> CatalogData {
    CatalogData {
        categories: named(&[
            ("food-ware", "Food ware"),
            ("beverage-ware", "Beverage ware"),
            ("accessories", "Accessories"),
        ]),
        product_types: named(&[
            ("cup", "Cups"),
            ("lid", "Lids"),
            ("clamshell", "Clamshells"),
            ("plate", "Plates"),
            ("bowl", "Bowls"),
            ("cutlery", "Cutlery"),
            ("straw", "Straws"),
        ]),
        materials: vec![
            material("paper", "Paper", 4.5, 4.2),
            material("plastic-pet", "PET plastic", 2.2, 2.0),
            material("plastic-ps", "Polystyrene", 2.6, 1.6),
            material("plastic-pp", "Polypropylene", 1.8, 1.4),
            material("bioplastic-pla", "PLA bioplastic", 1.5, 2.8),
            material("aluminum", "Aluminum", 9.1, 12.0),
            material("glass", "Glass", 0.6, 0.7),
            material("stainless-steel", "Stainless steel", 3.0, 9.0),
            material(SHIPPING_BOX_MATERIAL, "Corrugated cardboard", 3.1, 3.4),
        ],
        products: vec![
            product("hot-cup-paper-12oz", "12oz paper hot cup", "beverage-ware", "cup", "paper", 0.025, 2.2, 1_000.0),
            product("cold-cup-pet-16oz", "16oz PET cold cup", "beverage-ware", "cup", "plastic-pet", 0.03, 2.5, 1_000.0),
            product("lid-ps-hot", "Polystyrene hot lid", "beverage-ware", "lid", "plastic-ps", 0.007, 1.4, 1_000.0),
            product("straw-pla", "PLA straw", "beverage-ware", "straw", "bioplastic-pla", 0.001, 0.8, 5_000.0),
            product("clamshell-ps-9in", "9in foam clamshell", "food-ware", "clamshell", "plastic-ps", 0.02, 2.8, 200.0),
            product("plate-paper-9in", "9in paper plate", "food-ware", "plate", "paper", 0.04, 2.0, 500.0),
            product("bowl-paper-16oz", "16oz paper bowl", "food-ware", "bowl", "paper", 0.03, 2.0, 500.0),
            product("cutlery-pp-kit", "Polypropylene cutlery kit", "accessories", "cutlery", "plastic-pp", 0.012, 1.6, 1_000.0),
            product("reusable-cup-pp-16oz", "16oz reusable cup", "beverage-ware", "cup", "plastic-pp", 0.09, 3.0, 50.0),
            product("reusable-cup-steel-12oz", "12oz stainless tumbler", "beverage-ware", "cup", "stainless-steel", 0.45, 3.5, 24.0),
            product("reusable-plate-glass", "Tempered glass plate", "food-ware", "plate", "glass", 1.1, 4.0, 12.0),
            product("reusable-bowl-pp", "Reusable polypropylene bowl", "food-ware", "bowl", "plastic-pp", 0.25, 3.0, 24.0),
            product("reusable-clamshell-pp", "Reusable takeout clamshell", "food-ware", "clamshell", "plastic-pp", 0.35, 3.0, 24.0),
            product("reusable-cutlery-steel", "Stainless cutlery set", "accessories", "cutlery", "stainless-steel", 0.2, 2.5, 36.0),
        ],
    }
}

fn named(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect()
}

fn material(id: &str, name: &str, ghg: f64, water: f64) -> Material {
    Material {
        id: id.to_string(),
        name: name.to_string(),
        ghg_mtco2e_per_ton: ghg,
        water_gallons_per_lb: water,
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category_id: &str,
    product_type_id: &str,
    material_id: &str,
    unit_weight_lbs: f64,
    box_weight_lbs: f64,
    units_per_case: f64,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category_id: category_id.to_string(),
        product_type_id: product_type_id.to_string(),
        material_id: material_id.to_string(),
        unit_weight_lbs,
        box_weight_lbs,
        units_per_case,
    }
}
