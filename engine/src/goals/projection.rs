// Linear completion projection from contribution history
use chrono::NaiveDate;
use shared::models::{Contribution, Projection};
use tracing::debug;

use super::schedule::{add_months, calendar_month_diff};

/// Total contributed divided by the number of calendar months the history
/// spans, first to last inclusive. Same-month histories divide by 1.
pub fn average_monthly_contribution(contributions: &[Contribution]) -> f64 {
    let first = contributions.iter().map(|c| c.contribution_date).min();
    let last = contributions.iter().map(|c| c.contribution_date).max();
    let (Some(first), Some(last)) = (first, last) else {
        return 0.0;
    };
    let span = (calendar_month_diff(first, last) + 1).max(1);
    let total: f64 = contributions.iter().map(|c| c.amount).sum();
    total / span as f64
}

pub fn project_completion(
    contributions: &[Contribution],
    target: f64,
    current: f64,
    target_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Projection {
    let average = average_monthly_contribution(contributions);

    let months = if current >= target {
        Some(0)
    } else if average > 0.0 {
        // Float-to-int casts saturate, so absurd gaps cap at u32::MAX.
        Some(((target - current) / average).ceil() as u32)
    } else {
        None
    };

    let Some(months) = months else {
        debug!(average, "Contribution pace is not positive, goal cannot be projected");
        return Projection {
            average_monthly_contribution: average,
            completable: false,
            projected_months_to_complete: None,
            projected_completion_date: None,
            on_track: None,
            months_behind_or_ahead: None,
        };
    };

    let completion = add_months(today, months);
    let (on_track, months_behind_or_ahead) = match target_date {
        Some(deadline) => (
            Some(completion <= deadline),
            Some(calendar_month_diff(deadline, completion)),
        ),
        None => (None, None),
    };

    Projection {
        average_monthly_contribution: average,
        completable: true,
        projected_months_to_complete: Some(months),
        projected_completion_date: Some(completion),
        on_track,
        months_behind_or_ahead,
    }
}
