// Financial goal calculator
pub mod progress;
pub mod projection;
pub mod schedule;
pub mod suggestions;

use chrono::NaiveDate;
use shared::models::{Contribution, Goal, GoalAnalysis};

pub use progress::progress_percentage;
pub use projection::{average_monthly_contribution, project_completion};
pub use schedule::{months_remaining, required_monthly};
pub use suggestions::{suggest_monthly_contributions, GoalPolicy};

/// Builds the goals-page view of one goal. `projection` is `None` when there
/// is no contribution history to extrapolate from.
pub fn analyze_goal(
    goal: &Goal,
    contributions: &[Contribution],
    today: NaiveDate,
    policy: &GoalPolicy,
) -> GoalAnalysis {
    let target = goal.target_amount;
    let current = goal.current_amount;

    let projection = if contributions.is_empty() {
        None
    } else {
        Some(project_completion(contributions, target, current, goal.target_date, today))
    };

    GoalAnalysis {
        progress_percentage: progress_percentage(current, target),
        months_remaining: goal.target_date.map_or(0, |date| months_remaining(date, today)),
        required_monthly: required_monthly(current, target, goal.target_date, today),
        remaining_amount: goal.remaining_amount(),
        overdue: !goal.is_funded() && goal.target_date.is_some_and(|date| date < today),
        status: goal.status,
        suggestions: suggest_monthly_contributions(target, current, goal.target_date, today, policy),
        projection,
    }
}
