//! Month-count to calendar date conversion

use chrono::{Datelike, Months, NaiveDate, Utc};

/// Current date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Date `months` calendar months after `from`.
///
/// Day-of-month overflow clamps to the last day of the target month
/// (Jan 31 + 1 month = Feb 28/29). Saturates at `NaiveDate::MAX`.
pub fn completion_date(months: u32, from: NaiveDate) -> NaiveDate {
    from.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Completion date counted from today
pub fn completion_date_from_today(months: u32) -> NaiveDate {
    completion_date(months, today())
}

/// Whole calendar months from `from` to `to`; negative when `to` is earlier.
///
/// A month only counts once its day-of-month has been reached, so
/// Jan 15 -> Feb 14 is 0 months and Jan 15 -> Feb 15 is 1.
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = (i64::from(to.year()) - i64::from(from.year())) * 12
        + (i64::from(to.month()) - i64::from(from.month()));

    if months > 0 && to.day() < from.day() {
        months -= 1;
    } else if months < 0 && to.day() > from.day() {
        months += 1;
    }

    months
}
