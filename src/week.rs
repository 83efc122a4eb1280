use chrono::{Datelike, Duration, Local, NaiveDate};

/// The Monday strictly after `today`. Submissions always target the coming
/// week, so a Monday "today" still maps seven days out.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rota_libs::week::next_monday;
///
/// // 2024-03-04 is a Monday.
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// assert_eq!(next_monday(monday), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
///
/// let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
/// assert_eq!(next_monday(wednesday), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// ```
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - i64::from(today.weekday().num_days_from_monday());
    today + Duration::days(days_ahead)
}

/// The upcoming week plus the three weeks before it, newest first. This is
/// the admin view's selectable history.
pub fn monday_history(today: NaiveDate) -> [NaiveDate; 4] {
    let next = next_monday(today);
    [
        next,
        next - Duration::days(7),
        next - Duration::days(14),
        next - Duration::days(21),
    ]
}

/// Week key string, `YYYY-MM-DD`.
pub fn format_week(week_start: NaiveDate) -> String {
    week_start.format("%Y-%m-%d").to_string()
}

/// Convenience wrapper over the local wall clock. Everything downstream
/// takes the week as an explicit parameter so tests can inject dates.
pub fn upcoming_week() -> NaiveDate {
    next_monday(Local::now().date_naive())
}
