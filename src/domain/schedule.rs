//! Rent due-date projection.

use chrono::{Datelike, Months, NaiveDate};

/// Next occurrence of a monthly due day on or after `reference`.
///
/// The day is placed in the reference month; if that lands before the
/// reference date it moves to the following month. Days past the end of a
/// month clamp to its last day, so a due day of 31 falls on Feb 28/29.
pub fn next_due_date(due_day: u32, reference: NaiveDate) -> NaiveDate {
    let candidate = day_in_month(reference.year(), reference.month(), due_day);
    if candidate >= reference {
        return candidate;
    }

    let next_month = reference
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .unwrap_or(reference);
    day_in_month(next_month.year(), next_month.month(), due_day)
}

fn day_in_month(year: i32, month: u32, day: u32) -> NaiveDate {
    let last = days_in_month(year, month);
    let day = day.clamp(1, last);
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_later_this_month() {
        assert_eq!(next_due_date(15, date(2024, 3, 10)), date(2024, 3, 15));
    }

    #[test]
    fn test_due_today_is_not_rolled() {
        assert_eq!(next_due_date(10, date(2024, 3, 10)), date(2024, 3, 10));
    }

    #[test]
    fn test_due_passed_rolls_to_next_month() {
        assert_eq!(next_due_date(5, date(2024, 3, 10)), date(2024, 4, 5));
        assert_eq!(next_due_date(5, date(2024, 12, 20)), date(2025, 1, 5));
    }

    #[test]
    fn test_short_months_clamp() {
        assert_eq!(next_due_date(31, date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(next_due_date(31, date(2023, 2, 10)), date(2023, 2, 28));
        assert_eq!(next_due_date(31, date(2024, 4, 30)), date(2024, 4, 30));
        assert_eq!(next_due_date(30, date(2024, 1, 31)), date(2024, 2, 29));
    }
}
