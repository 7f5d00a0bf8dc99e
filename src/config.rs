use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::factors::{BottleStationFactors, Factors};
use crate::options::{EngineOptions, ProjectCategory};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub factors: Factors,
    #[serde(default)]
    pub bottle_station: BottleStationFactors,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub project_category: ProjectCategory,
    #[serde(default)]
    pub use_shrinkage_rate: bool,
    #[serde(default)]
    pub display_as_metric: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON catalog file; empty means the built-in catalog.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub project_category: Option<ProjectCategory>,
    pub use_shrinkage_rate: Option<bool>,
    pub display_as_metric: Option<bool>,
    pub catalog_path: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/foodware-projections/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(category) = overrides.project_category {
            self.engine.project_category = category;
        }
        if let Some(shrinkage) = overrides.use_shrinkage_rate {
            self.engine.use_shrinkage_rate = shrinkage;
        }
        if let Some(metric) = overrides.display_as_metric {
            self.engine.display_as_metric = metric;
        }
        if let Some(path) = overrides.catalog_path {
            self.catalog.path = path;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            project_category: self.engine.project_category,
            use_shrinkage_rate: self.engine.use_shrinkage_rate,
            display_as_metric: self.engine.display_as_metric,
            active_groups_only: false,
        }
    }

    pub fn resolved_catalog_path(&self) -> Option<PathBuf> {
        let trimmed = self.catalog.path.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(expand_tilde(trimmed))
        }
    }

    pub fn default_template() -> String {
        let template = r#"[engine]
project_category = "default"
use_shrinkage_rate = false
display_as_metric = false

[factors]
electric_rate_per_kwh = 0.13
gas_rate_per_therm = 1.2
water_rate_per_gallon = 0.012
electric_mtco2e_per_kwh = 0.000417
gas_mtco2e_per_therm = 0.0053
transport_mtco2e_per_mile = 0.000404
shipping_box_material = "corrugated"

[bottle_station]
gallons_per_bottle = 0.132
bottle_weight_lbs = 0.022

[catalog]
path = ""

[server]
host = "127.0.0.1"
port = 8080
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}
