use std::str::FromStr;

use serde_json::Value;

use crate::error::{IssueProblem, LineItemIssue};
use crate::lineitem::frequency::Frequency;
use crate::lineitem::LineItemKind;

pub struct FieldReader<'a> {
    line_item_id: &'a str,
    kind: LineItemKind,
    issues: Vec<LineItemIssue>,
}

impl<'a> FieldReader<'a> {
    pub fn new(line_item_id: &'a str, kind: LineItemKind) -> Self {
        let mut reader = Self {
            line_item_id,
            kind,
            issues: Vec::new(),
        };
        if line_item_id.trim().is_empty() {
            reader.push("id", IssueProblem::Missing);
        }
        reader
    }

    pub fn push(&mut self, field: &str, problem: IssueProblem) {
        self.issues.push(LineItemIssue {
            line_item_id: self.line_item_id.to_string(),
            kind: self.kind,
            field: field.to_string(),
            problem,
        });
    }

    pub fn quantity(&mut self, field: &str, value: Option<&Value>) -> f64 {
        match value {
            None | Some(Value::Null) => {
                self.push(field, IssueProblem::Missing);
                0.0
            }
            Some(value) => self.non_negative(field, value),
        }
    }

    pub fn optional_quantity(&mut self, field: &str, value: Option<&Value>) -> Option<f64> {
        match value {
            None | Some(Value::Null) => None,
            Some(value) => Some(self.non_negative(field, value)),
        }
    }

    pub fn bounded(&mut self, field: &str, value: Option<&Value>, min: f64, max: f64) -> Option<f64> {
        let parsed = self.optional_quantity(field, value)?;
        if parsed < min || parsed > max {
            self.push(
                field,
                IssueProblem::OutOfRange {
                    value: parsed,
                    min,
                    max,
                },
            );
        }
        Some(parsed)
    }

    /// Required share in `[0, 1]`. `"20%"` reads as `0.2`.
    pub fn fraction(&mut self, field: &str, value: Option<&Value>) -> f64 {
        let parsed = self.quantity(field, value);
        let parsed = match value {
            Some(Value::String(s)) if s.trim_end().ends_with('%') => parsed / 100.0,
            _ => parsed,
        };
        if parsed > 1.0 {
            self.push(
                field,
                IssueProblem::OutOfRange {
                    value: parsed,
                    min: 0.0,
                    max: 1.0,
                },
            );
        }
        parsed
    }

    pub fn frequency(&mut self, field: &str, value: Option<&str>) -> Frequency {
        match value.map(str::trim) {
            None | Some("") => {
                self.push(field, IssueProblem::Missing);
                Frequency::Annually
            }
            Some(raw) => match Frequency::from_str(raw) {
                Ok(frequency) => frequency,
                Err(_) => {
                    self.push(
                        field,
                        IssueProblem::UnknownFrequency {
                            value: raw.to_string(),
                        },
                    );
                    Frequency::Annually
                }
            },
        }
    }

    pub fn finish(self) -> Result<(), Vec<LineItemIssue>> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(self.issues)
        }
    }

    fn non_negative(&mut self, field: &str, value: &Value) -> f64 {
        match to_f64(value) {
            Ok(parsed) if parsed < 0.0 => {
                self.push(field, IssueProblem::Negative { value: parsed });
                0.0
            }
            Ok(parsed) => parsed,
            Err(problem) => {
                self.push(field, problem);
                0.0
            }
        }
    }
}

/// Accepts JSON numbers and numeric strings such as `"1,200"` or `"15%"`.
pub fn to_f64(value: &Value) -> Result<f64, IssueProblem> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let sanitized = s.trim().replace([',', '%', '_', '$'], "");
            if sanitized.is_empty() {
                return Err(IssueProblem::Missing);
            }
            sanitized.parse::<f64>().ok()
        }
        Value::Null => return Err(IssueProblem::Missing),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(IssueProblem::NotFinite),
        None => Err(IssueProblem::NotNumeric {
            value: value_label(value),
        }),
    }
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(to_f64(&json!(12.5)), Ok(12.5));
        assert_eq!(to_f64(&json!("1,200")), Ok(1_200.0));
        assert_eq!(to_f64(&json!(" 15% ")), Ok(15.0));
        assert_eq!(to_f64(&json!("$20")), Ok(20.0));
    }

    #[test]
    fn classifies_bad_values() {
        assert_eq!(
            to_f64(&json!("twelve")),
            Err(IssueProblem::NotNumeric {
                value: "twelve".to_string()
            })
        );
        assert_eq!(to_f64(&json!("NaN")), Err(IssueProblem::NotFinite));
        assert_eq!(to_f64(&json!("inf")), Err(IssueProblem::NotFinite));
        assert_eq!(to_f64(&json!(true)), Err(IssueProblem::NotNumeric { value: "true".to_string() }));
        assert_eq!(to_f64(&json!("")), Err(IssueProblem::Missing));
    }

    #[test]
    fn reader_collects_all_issues() {
        let mut reader = FieldReader::new("cups", LineItemKind::SingleUse);
        reader.quantity("casesPurchased", Some(&json!(-1)));
        reader.quantity("caseCost", None);
        reader.frequency("frequency", Some("fortnightly"));
        reader.bounded("returnRate", Some(&json!(140)), 0.0, 100.0);
        let issues = reader.finish().expect_err("four issues expected");
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["casesPurchased", "caseCost", "frequency", "returnRate"]);
    }

    #[test]
    fn percent_strings_read_as_fractions() {
        let mut reader = FieldReader::new("tumblers", LineItemKind::Reusable);
        assert_eq!(reader.fraction("annualRepurchasePercentage", Some(&json!("20%"))), 0.2);
        assert_eq!(reader.fraction("annualRepurchasePercentage", Some(&json!("0.35"))), 0.35);
        assert_eq!(reader.fraction("annualRepurchasePercentage", Some(&json!(1))), 1.0);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn fractions_above_one_are_out_of_range() {
        let mut reader = FieldReader::new("tumblers", LineItemKind::Reusable);
        reader.fraction("annualRepurchasePercentage", Some(&json!(3.0)));
        reader.fraction("annualRepurchasePercentage", Some(&json!("150%")));
        let issues = reader.finish().expect_err("two issues expected");
        assert_eq!(
            issues[0].problem,
            IssueProblem::OutOfRange {
                value: 3.0,
                min: 0.0,
                max: 1.0
            }
        );
        assert!(matches!(issues[1].problem, IssueProblem::OutOfRange { .. }));
    }

    #[test]
    fn empty_id_is_reported() {
        let reader = FieldReader::new("  ", LineItemKind::Labor);
        let issues = reader.finish().expect_err("id issue expected");
        assert_eq!(issues[0].field, "id");
        assert_eq!(issues[0].problem, IssueProblem::Missing);
    }
}
