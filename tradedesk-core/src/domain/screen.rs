//! A saved market-screening run.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A screening run: the criteria that were applied and the tickers
/// that matched. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenResult {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub filter_criteria: BTreeMap<String, CriterionValue>,
    #[serde(default)]
    pub results: ScreenMatches,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
}

/// The result payload. The backend nests the ticker list one level
/// down, so this mirrors that shape rather than flattening it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenMatches {
    #[serde(default)]
    pub tickers: Vec<String>,
}

/// A criterion value as the backend stores it: string, number, or
/// boolean, keyed by criterion name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CriterionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for CriterionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionValue::Bool(true) => f.write_str("Yes"),
            CriterionValue::Bool(false) => f.write_str("No"),
            CriterionValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            CriterionValue::Text(s) => f.write_str(s),
        }
    }
}

impl ScreenResult {
    pub fn match_count(&self) -> usize {
        self.results.tickers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_criteria() {
        let json = r#"{
            "id": 3,
            "date": "2024-05-02",
            "filter_criteria": {
                "min_volume": 500000,
                "above_sma200": true,
                "sector": "Technology",
                "max_pe": 25.5
            },
            "results": {"tickers": ["AAPL", "NVDA"]},
            "notes": "Screening with 2 results",
            "created_at": "2024-05-02 09:31:00"
        }"#;
        let screen: ScreenResult = serde_json::from_str(json).unwrap();
        assert_eq!(screen.match_count(), 2);
        assert_eq!(
            screen.filter_criteria["above_sma200"],
            CriterionValue::Bool(true)
        );
        assert_eq!(
            screen.filter_criteria["sector"],
            CriterionValue::Text("Technology".into())
        );
        assert_eq!(
            screen.filter_criteria["max_pe"],
            CriterionValue::Number(25.5)
        );
    }

    #[test]
    fn missing_criteria_and_results_default_to_empty() {
        let json = r#"{
            "id": 4,
            "date": "2024-05-03",
            "created_at": "2024-05-03 10:00:00"
        }"#;
        let screen: ScreenResult = serde_json::from_str(json).unwrap();
        assert!(screen.filter_criteria.is_empty());
        assert_eq!(screen.match_count(), 0);
        assert!(screen.notes.is_none());
    }

    #[test]
    fn display_forms() {
        assert_eq!(CriterionValue::Bool(true).to_string(), "Yes");
        assert_eq!(CriterionValue::Bool(false).to_string(), "No");
        assert_eq!(CriterionValue::Number(500000.0).to_string(), "500000");
        assert_eq!(CriterionValue::Number(25.5).to_string(), "25.5");
        assert_eq!(CriterionValue::Text("Tech".into()).to_string(), "Tech");
    }
}
