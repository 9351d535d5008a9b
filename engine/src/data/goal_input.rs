// Boundary decoding of goal requests into validated domain records
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use shared::models::{Contribution, Goal, GoalStatus};
use shared::ValidationError;

use crate::error::EngineError;

/// A goal as it arrives from the backend or a file: dates are still text and
/// nothing has been checked yet.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub current_amount: f64,
    pub target_amount: f64,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub contributions: Vec<ContributionRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContributionRequest {
    pub amount: f64,
    pub contribution_date: String,
}

pub fn parse_iso_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn finite(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFiniteAmount { field: field.to_string() })
    }
}

impl ContributionRequest {
    pub fn into_contribution(self) -> Result<Contribution, ValidationError> {
        Ok(Contribution {
            amount: finite("amount", self.amount)?,
            contribution_date: parse_iso_date("contribution_date", &self.contribution_date)?,
        })
    }
}

impl GoalRequest {
    pub fn from_json_str(contents: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Validates amounts and dates. A blank `target_date` means "no deadline".
    pub fn into_goal(self) -> Result<(Goal, Vec<Contribution>), ValidationError> {
        let target_amount = finite("target_amount", self.target_amount)?;
        let current_amount = finite("current_amount", self.current_amount)?;
        if target_amount <= 0.0 {
            return Err(ValidationError::NonPositiveTarget(target_amount));
        }
        if current_amount < 0.0 {
            return Err(ValidationError::NegativeCurrent(current_amount));
        }

        let target_date = match self.target_date.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(parse_iso_date("target_date", text)?),
            _ => None,
        };

        let contributions = self
            .contributions
            .into_iter()
            .map(ContributionRequest::into_contribution)
            .collect::<Result<Vec<_>, _>>()?;

        let goal = Goal {
            name: self.name,
            target_amount,
            current_amount,
            target_date,
            status: self.status,
        };
        Ok((goal, contributions))
    }
}
