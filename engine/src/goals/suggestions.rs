// Three-tier monthly contribution suggestions
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::ContributionSuggestions;

use super::schedule::required_monthly;

pub const DEFAULT_COMFORTABLE_RATIO: f64 = 0.8;
pub const DEFAULT_AGGRESSIVE_RATIO: f64 = 1.3;

/// Multipliers applied to the required pace. Must satisfy
/// `0 < comfortable_ratio < 1 < aggressive_ratio`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalPolicy {
    pub comfortable_ratio: f64,
    pub aggressive_ratio: f64,
}

impl Default for GoalPolicy {
    fn default() -> Self {
        GoalPolicy {
            comfortable_ratio: DEFAULT_COMFORTABLE_RATIO,
            aggressive_ratio: DEFAULT_AGGRESSIVE_RATIO,
        }
    }
}

impl GoalPolicy {
    pub fn is_ordered(&self) -> bool {
        self.comfortable_ratio > 0.0 && self.comfortable_ratio < 1.0 && self.aggressive_ratio > 1.0
            && self.aggressive_ratio.is_finite()
    }
}

/// Rounds to two decimals (paisa).
pub fn round_to_paisa(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn suggest_monthly_contributions(
    target: f64,
    current: f64,
    target_date: Option<NaiveDate>,
    today: NaiveDate,
    policy: &GoalPolicy,
) -> ContributionSuggestions {
    let required = required_monthly(current, target, target_date, today);
    let exact = ContributionSuggestions {
        required,
        comfortable: required * policy.comfortable_ratio,
        aggressive: required * policy.aggressive_ratio,
    };
    let rounded = ContributionSuggestions {
        required: round_to_paisa(exact.required),
        comfortable: round_to_paisa(exact.comfortable),
        aggressive: round_to_paisa(exact.aggressive),
    };
    // Paisa rounding can merge tiers for sub-rupee paces; keep them distinct.
    if required > 0.0 && !tiers_ordered(&rounded) {
        return exact;
    }
    rounded
}

fn tiers_ordered(s: &ContributionSuggestions) -> bool {
    s.comfortable > 0.0 && s.comfortable < s.required && s.required < s.aggressive
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_tiers() {
        let s = suggest_monthly_contributions(
            1_000_000.0,
            200_000.0,
            Some(date(2027, 8, 16)),
            date(2026, 10, 16),
            &GoalPolicy::default(),
        );
        assert_eq!(s.required, 80_000.0);
        assert_eq!(s.comfortable, 64_000.0);
        assert_eq!(s.aggressive, 104_000.0);
        assert!(s.comfortable > 0.0 && s.comfortable < s.required && s.required < s.aggressive);
    }

    #[test]
    fn test_rounding_to_paisa() {
        // 100 over 3 months = 33.333...
        let s = suggest_monthly_contributions(
            100.0,
            0.0,
            Some(date(2027, 1, 16)),
            date(2026, 10, 16),
            &GoalPolicy::default(),
        );
        assert_eq!(s.required, 33.33);
        assert_eq!(s.comfortable, 26.67);
        assert_eq!(s.aggressive, 43.33);
    }

    #[test]
    fn test_tiny_pace_keeps_tiers_distinct() {
        // 0.03 over 3 months: every tier would round to 0.01
        let s = suggest_monthly_contributions(
            100.03,
            100.0,
            Some(date(2027, 1, 16)),
            date(2026, 10, 16),
            &GoalPolicy::default(),
        );
        assert!(s.required > 0.0);
        assert!(tiers_ordered(&s));
        assert!((s.required - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_met_goal_suggests_nothing() {
        let s = suggest_monthly_contributions(500.0, 900.0, None, date(2026, 10, 16), &GoalPolicy::default());
        assert_eq!(s, ContributionSuggestions { required: 0.0, comfortable: 0.0, aggressive: 0.0 });
    }

    #[test]
    fn test_policy_ordering() {
        assert!(GoalPolicy::default().is_ordered());
        assert!(!GoalPolicy { comfortable_ratio: 1.2, aggressive_ratio: 1.3 }.is_ordered());
        assert!(!GoalPolicy { comfortable_ratio: 0.0, aggressive_ratio: 1.3 }.is_ordered());
        assert!(!GoalPolicy { comfortable_ratio: 0.8, aggressive_ratio: 0.9 }.is_ordered());
    }
}
