// Calendar-month arithmetic for goal deadlines
use chrono::{Datelike, Months, NaiveDate};

/// `date + months`, clamped to the end of shorter months (Jan 31 + 1 = Feb 28).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Signed difference in calendar months, ignoring the day of month.
pub fn calendar_month_diff(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// Whole months left until `target_date`: the largest `n` with
/// `today + n months <= target_date`. Past deadlines give 0.
pub fn months_remaining(target_date: NaiveDate, today: NaiveDate) -> u32 {
    if target_date <= today {
        return 0;
    }
    let mut months = calendar_month_diff(today, target_date).max(0) as u32;
    while months > 0 && add_months(today, months) > target_date {
        months -= 1;
    }
    months
}

/// Monthly amount needed to close the gap by `target_date`.
///
/// Without a deadline, or with less than a month left, the whole gap is due
/// now. A funded goal needs nothing.
pub fn required_monthly(current: f64, target: f64, target_date: Option<NaiveDate>, today: NaiveDate) -> f64 {
    if current >= target {
        return 0.0;
    }
    let gap = target - current;
    match target_date.map(|date| months_remaining(date, today)) {
        Some(months) if months > 0 => gap / months as f64,
        _ => gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_months_remaining_exact() {
        assert_eq!(months_remaining(date(2027, 8, 16), date(2026, 10, 16)), 10);
    }

    #[test]
    fn test_months_remaining_partial_month_not_counted() {
        assert_eq!(months_remaining(date(2026, 11, 15), date(2026, 10, 16)), 0);
        assert_eq!(months_remaining(date(2027, 1, 10), date(2026, 10, 16)), 2);
    }

    #[test]
    fn test_months_remaining_end_of_month() {
        assert_eq!(months_remaining(date(2027, 2, 28), date(2027, 1, 31)), 1);
    }

    #[test]
    fn test_months_remaining_past_date_is_zero() {
        assert_eq!(months_remaining(date(2025, 1, 1), date(2026, 10, 16)), 0);
        assert_eq!(months_remaining(date(2026, 10, 16), date(2026, 10, 16)), 0);
    }

    #[test]
    fn test_required_monthly_without_deadline() {
        let today = date(2026, 10, 16);
        assert_eq!(required_monthly(200_000.0, 1_000_000.0, None, today), 800_000.0);
    }

    #[test]
    fn test_required_monthly_spreads_gap() {
        let today = date(2026, 10, 16);
        let deadline = Some(date(2027, 8, 16));
        assert_eq!(required_monthly(200_000.0, 1_000_000.0, deadline, today), 80_000.0);
    }

    #[test]
    fn test_required_monthly_due_now_when_overdue() {
        let today = date(2026, 10, 16);
        let deadline = Some(date(2026, 1, 1));
        assert_eq!(required_monthly(100.0, 600.0, deadline, today), 500.0);
    }

    #[test]
    fn test_required_monthly_met_goal_is_zero() {
        let today = date(2026, 10, 16);
        let deadline = Some(date(2027, 6, 1));
        assert_eq!(required_monthly(5_000.0, 5_000.0, deadline, today), 0.0);
        assert_eq!(required_monthly(7_000.0, 5_000.0, None, today), 0.0);
    }

    #[test]
    fn test_calendar_month_diff_signed() {
        assert_eq!(calendar_month_diff(date(2026, 10, 16), date(2027, 8, 1)), 10);
        assert_eq!(calendar_month_diff(date(2027, 8, 1), date(2026, 10, 16)), -10);
    }
}
