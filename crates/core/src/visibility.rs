//! Visibility-window predicate for scheduled content.
//!
//! A banner is eligible for display iff it is active and `now` falls within
//! its optional `[start, end]` window; an unset bound is open.

use chrono::{DateTime, Utc};

/// Whether a banner with the given flags/window is currently visible.
#[must_use]
pub fn banner_visible(
    is_active: bool,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if !is_active {
        return false;
    }
    let started = start.is_none_or(|s| s <= now);
    let not_ended = end.is_none_or(|e| e >= now);
    started && not_ended
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_unbounded_active_banner_always_visible() {
        assert!(banner_visible(true, None, None, now()));
    }

    #[test]
    fn test_inactive_banner_never_visible() {
        assert!(!banner_visible(false, None, None, now()));
    }

    #[test]
    fn test_future_start_not_visible() {
        let t = now();
        assert!(!banner_visible(true, Some(t + Duration::hours(1)), None, t));
    }

    #[test]
    fn test_past_end_not_visible() {
        let t = now();
        assert!(!banner_visible(true, None, Some(t - Duration::hours(1)), t));
    }

    #[test]
    fn test_inside_window_visible() {
        let t = now();
        assert!(banner_visible(
            true,
            Some(t - Duration::days(1)),
            Some(t + Duration::days(1)),
            t
        ));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let t = now();
        assert!(banner_visible(true, Some(t), Some(t), t));
    }
}
