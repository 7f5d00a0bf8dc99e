use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::{CatalogData, StaticCatalog};

pub fn load_catalog(path: Option<&Path>) -> Result<StaticCatalog> {
    let Some(path) = path else {
        return Ok(StaticCatalog::with_defaults());
    };
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading catalog: {}", path.display()))?;
    let parsed: CatalogData = serde_json::from_str(&data)
        .with_context(|| format!("failed parsing catalog JSON: {}", path.display()))?;
    let catalog = StaticCatalog::new(parsed)
        .with_context(|| format!("invalid catalog: {}", path.display()))?;
    info!(
        "loaded catalog from {} ({} products)",
        path.display(),
        catalog.products().len()
    );
    Ok(catalog)
}

pub fn write_catalog(path: &Path, data: &CatalogData) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating catalog directory: {}", parent.display()))?;
    }
    fs::write(path, serde_json::to_string_pretty(data)?)
        .with_context(|| format!("failed writing catalog: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults::default_catalog_data;
    use crate::catalog::{CatalogError, ProductCatalog, ProductLookup};

    #[test]
    fn round_trips_catalog_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog/products.json");
        let mut data = default_catalog_data();
        data.products.truncate(2);
        write_catalog(&path, &data).expect("write catalog");

        let catalog = load_catalog(Some(&path)).expect("load catalog");
        assert_eq!(catalog.products().len(), 2);
        assert!(matches!(
            catalog.resolve_product("hot-cup-paper-12oz"),
            ProductLookup::Found(_)
        ));
    }

    #[test]
    fn reports_broken_catalog_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("write");
        let err = load_catalog(Some(&path)).expect_err("parse should fail");
        assert!(err.to_string().contains("failed parsing catalog JSON"));
    }

    #[test]
    fn reports_inconsistent_catalog_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        let mut data = default_catalog_data();
        data.products[0].material_id = "unobtainium".to_string();
        write_catalog(&path, &data).expect("write catalog");
        let err = load_catalog(Some(&path)).expect_err("validation should fail");
        assert!(err.to_string().contains("invalid catalog"));
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::UnknownReference { kind: "material", .. })
        ));
    }

    #[test]
    fn falls_back_to_built_in_catalog() {
        let catalog = load_catalog(None).expect("defaults");
        assert!(catalog.material("corrugated").is_some());
    }
}
