pub mod defaults;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub product_type_id: String,
    pub material_id: String,
    pub unit_weight_lbs: f64,
    #[serde(default)]
    pub box_weight_lbs: f64,
    pub units_per_case: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    /// Landfill plus production emissions, MTCO2e per short ton.
    pub ghg_mtco2e_per_ton: f64,
    /// Production water, gallons per pound.
    pub water_gallons_per_lb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductLookup<'a> {
    Found(&'a Product),
    NotFound,
}

pub trait ProductCatalog: Send + Sync {
    fn resolve_product(&self, id: &str) -> ProductLookup<'_>;
    fn material(&self, id: &str) -> Option<&Material>;
    fn category_name(&self, id: &str) -> Option<&str>;
    fn product_type_name(&self, id: &str) -> Option<&str>;
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate {kind} id in catalog: {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("product {product_id} references unknown {kind} `{reference}`")]
    UnknownReference {
        product_id: String,
        kind: &'static str,
        reference: String,
    },
    #[error("product {product_id} has invalid {field}: {value}")]
    InvalidValue {
        product_id: String,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    #[serde(default)]
    pub product_types: BTreeMap<String, String>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone)]
pub struct StaticCatalog {
    data: CatalogData,
    products: BTreeMap<String, usize>,
    materials: BTreeMap<String, usize>,
}

impl StaticCatalog {
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        let mut materials = BTreeMap::new();
        for (idx, material) in data.materials.iter().enumerate() {
            if materials.insert(material.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "material",
                    id: material.id.clone(),
                });
            }
        }

        let mut products = BTreeMap::new();
        for (idx, product) in data.products.iter().enumerate() {
            validate_product(product, &data, &materials)?;
            if products.insert(product.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "product",
                    id: product.id.clone(),
                });
            }
        }

        Ok(Self {
            data,
            products,
            materials,
        })
    }

    pub fn with_defaults() -> Self {
        Self::new(defaults::default_catalog_data()).expect("built-in catalog is consistent")
    }

    pub fn data(&self) -> &CatalogData {
        &self.data
    }

    pub fn products(&self) -> &[Product] {
        &self.data.products
    }
}

fn validate_product(
    product: &Product,
    data: &CatalogData,
    materials: &BTreeMap<String, usize>,
) -> Result<(), CatalogError> {
    let unknown = |kind: &'static str, reference: &str| CatalogError::UnknownReference {
        product_id: product.id.clone(),
        kind,
        reference: reference.to_string(),
    };
    if !data.categories.contains_key(&product.category_id) {
        return Err(unknown("category", &product.category_id));
    }
    if !data.product_types.contains_key(&product.product_type_id) {
        return Err(unknown("product type", &product.product_type_id));
    }
    if !materials.contains_key(&product.material_id) {
        return Err(unknown("material", &product.material_id));
    }

    for (field, value) in [
        ("unitWeightLbs", product.unit_weight_lbs),
        ("boxWeightLbs", product.box_weight_lbs),
        ("unitsPerCase", product.units_per_case),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CatalogError::InvalidValue {
                product_id: product.id.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}

impl ProductCatalog for StaticCatalog {
    fn resolve_product(&self, id: &str) -> ProductLookup<'_> {
        match self.products.get(id) {
            Some(idx) => ProductLookup::Found(&self.data.products[*idx]),
            None => ProductLookup::NotFound,
        }
    }

    fn material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id).map(|idx| &self.data.materials[*idx])
    }

    fn category_name(&self, id: &str) -> Option<&str> {
        self.data.categories.get(id).map(String::as_str)
    }

    fn product_type_name(&self, id: &str) -> Option<&str> {
        self.data.product_types.get(id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_and_unknown_products() {
        let catalog = StaticCatalog::with_defaults();
        let ProductLookup::Found(product) = catalog.resolve_product("hot-cup-paper-12oz") else {
            panic!("expected built-in hot cup");
        };
        assert_eq!(product.material_id, "paper");
        assert_eq!(
            catalog.resolve_product("does-not-exist"),
            ProductLookup::NotFound
        );
    }

    #[test]
    fn rejects_products_with_unknown_material() {
        let mut data = defaults::default_catalog_data();
        data.products[0].material_id = "unobtainium".to_string();
        let err = StaticCatalog::new(data).expect_err("catalog should be rejected");
        assert!(matches!(
            err,
            CatalogError::UnknownReference { kind: "material", .. }
        ));
    }

    #[test]
    fn rejects_duplicate_products() {
        let mut data = defaults::default_catalog_data();
        let copy = data.products[0].clone();
        data.products.push(copy);
        let err = StaticCatalog::new(data).expect_err("duplicate should be rejected");
        assert!(matches!(err, CatalogError::DuplicateId { kind: "product", .. }));
    }

    #[test]
    fn rejects_negative_weights() {
        let mut data = defaults::default_catalog_data();
        data.products[0].unit_weight_lbs = -1.0;
        assert!(matches!(
            StaticCatalog::new(data),
            Err(CatalogError::InvalidValue { field: "unitWeightLbs", .. })
        ));
    }
}
