use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lineitem::LineItemKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueProblem {
    Missing,
    NotNumeric { value: String },
    NotFinite,
    Negative { value: f64 },
    OutOfRange { value: f64, min: f64, max: f64 },
    UnknownFrequency { value: String },
}

impl Display for IssueProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "required value is missing"),
            Self::NotNumeric { value } => write!(f, "`{value}` is not a number"),
            Self::NotFinite => write!(f, "value is not finite"),
            Self::Negative { value } => write!(f, "{value} must not be negative"),
            Self::OutOfRange { value, min, max } => {
                write!(f, "{value} is outside [{min}, {max}]")
            }
            Self::UnknownFrequency { value } => write!(f, "unknown frequency `{value}`"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItemIssue {
    pub line_item_id: String,
    pub kind: LineItemKind,
    pub field: String,
    pub problem: IssueProblem,
}

impl Display for LineItemIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} `{}` field {}: {}",
            self.kind, self.line_item_id, self.field, self.problem
        )
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    pub issues: Vec<LineItemIssue>,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} invalid line item field(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl ValidationError {
    pub fn offending_line_items(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for issue in &self.issues {
            if !ids.contains(&issue.line_item_id.as_str()) {
                ids.push(issue.line_item_id.as_str());
            }
        }
        ids
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[error("line item {line_item_id} references unknown product `{product_id}`")]
#[serde(rename_all = "camelCase")]
pub struct OrphanReference {
    pub line_item_id: String,
    pub product_id: String,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
