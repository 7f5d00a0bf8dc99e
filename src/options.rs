use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rollup::RollupOptions;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    #[default]
    Default,
    Event,
}

impl Display for ProjectCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Event => write!(f, "event"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown project category: {0}")]
pub struct ProjectCategoryParseError(pub String);

impl FromStr for ProjectCategory {
    type Err = ProjectCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "standard" | "" => Ok(Self::Default),
            "event" | "events" => Ok(Self::Event),
            _ => Err(ProjectCategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    #[serde(default)]
    pub project_category: ProjectCategory,
    #[serde(default)]
    pub use_shrinkage_rate: bool,
    #[serde(default)]
    pub display_as_metric: bool,
    #[serde(default)]
    pub active_groups_only: bool,
}

impl EngineOptions {
    pub fn rollup(&self) -> RollupOptions {
        RollupOptions {
            active_only: self.active_groups_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_project_category() {
        assert_eq!("Event".parse::<ProjectCategory>().unwrap(), ProjectCategory::Event);
        assert_eq!("standard".parse::<ProjectCategory>().unwrap(), ProjectCategory::Default);
        assert!("festival".parse::<ProjectCategory>().is_err());
    }

    #[test]
    fn options_default_from_empty_json() {
        let options: EngineOptions = serde_json::from_str("{}").expect("defaults");
        assert_eq!(options, EngineOptions::default());
        assert!(!options.rollup().active_only);
    }
}
