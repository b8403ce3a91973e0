//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a UTC timestamp as a human-readable date, e.g. "14 Mar 2026".
///
/// Usage in templates: `{{ order.placed_at|date }}`
#[askama::filter_fn]
pub fn date(
    value: &chrono::DateTime<chrono::Utc>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(value.format("%d %b %Y").to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    #[test]
    fn test_date_format() {
        let ts = chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        assert_eq!(ts.format("%d %b %Y").to_string(), "14 Mar 2026");
    }
}
