use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Achieved,
    Paused,
    Cancelled,
}

/// A validated savings goal. Built from a `GoalRequest` at the boundary,
/// so `target_amount > 0` and `current_amount >= 0` always hold here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: GoalStatus,
}

impl Goal {
    /// Over-funded goals are valid; the gap is floored at zero.
    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn is_funded(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contribution {
    pub amount: f64,
    pub contribution_date: NaiveDate,
}

/// Linear completion forecast derived from contribution history.
///
/// When `completable` is false the average pace is zero or negative and every
/// forecast field is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub average_monthly_contribution: f64,
    pub completable: bool,
    pub projected_months_to_complete: Option<u32>,
    pub projected_completion_date: Option<NaiveDate>,
    pub on_track: Option<bool>,
    /// Positive means the projection lands after the target date.
    pub months_behind_or_ahead: Option<i32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ContributionSuggestions {
    pub required: f64,
    pub comfortable: f64,
    pub aggressive: f64,
}

/// Everything the goals page shows for one goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalAnalysis {
    pub progress_percentage: f64,
    pub months_remaining: u32,
    pub required_monthly: f64,
    pub remaining_amount: f64,
    pub overdue: bool,
    pub status: GoalStatus,
    pub suggestions: ContributionSuggestions,
    pub projection: Option<Projection>,
}

/// A numeric value as typed into a form: either a JSON number or free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

/// UI-shaped range input; either bound may be missing, blank or garbage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRange {
    #[serde(default)]
    pub min: Option<RawNumber>,
    #[serde(default)]
    pub max: Option<RawNumber>,
}

impl RawRange {
    pub fn new(min: impl Into<Option<RawNumber>>, max: impl Into<Option<RawNumber>>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

/// A range filter in base units, as sent to the screener endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RangeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RangeFilter {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_status_serializes_lowercase() {
        let json = serde_json::to_string(&GoalStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let status: GoalStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, GoalStatus::Paused);
    }

    #[test]
    fn test_raw_number_accepts_number_or_text() {
        let n: RawNumber = serde_json::from_str("42.5").unwrap();
        assert_eq!(n, RawNumber::Number(42.5));
        let t: RawNumber = serde_json::from_str("\"1,200\"").unwrap();
        assert_eq!(t, RawNumber::Text("1,200".to_string()));
    }

    #[test]
    fn test_range_filter_omits_unset_bounds() {
        let filter = RangeFilter { min: Some(100.0), max: None };
        assert_eq!(serde_json::to_value(filter).unwrap(), serde_json::json!({ "min": 100.0 }));
        assert!(RangeFilter::default().is_empty());
    }

    #[test]
    fn test_remaining_amount_floors_at_zero() {
        let goal = Goal {
            name: None,
            target_amount: 1000.0,
            current_amount: 1500.0,
            target_date: None,
            status: GoalStatus::Achieved,
        };
        assert_eq!(goal.remaining_amount(), 0.0);
        assert!(goal.is_funded());
    }
}
