// Goal progress percentage

/// Share of the target already saved, clamped to `[0, 100]` for display.
/// A non-positive target yields 0 instead of dividing by it.
pub fn progress_percentage(current: f64, target: f64) -> f64 {
    if target <= 0.0 || target.is_nan() {
        return 0.0;
    }
    let pct = current / target * 100.0;
    if pct.is_nan() {
        0.0
    } else {
        pct.clamp(0.0, 100.0)
    }
}
