use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::extractor::DatePair;

/// Workday count for an ordered pair of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdaySpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub workdays: u32,
    /// True when inclusive counting was requested and the end date was a weekday.
    pub inclusive: bool,
}

/// Returns true for Monday–Friday, false for Saturday/Sunday.
pub fn is_workday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count workdays between `start` and `end` without walking each day.
///
/// Full weeks contribute five workdays each; the remaining `total % 7` days
/// are corrected for whichever weekend days the start and end touch.
/// Callers must pass `start <= end`.
pub fn workdays_between(start: NaiveDate, end: NaiveDate, inclusive: bool) -> u32 {
    count(start, end, inclusive).0
}

/// Compute the workday span for an ordered pair.
pub fn span(pair: DatePair, inclusive: bool) -> WorkdaySpan {
    let (workdays, counted_end) = count(pair.start, pair.end, inclusive);
    WorkdaySpan {
        start: pair.start,
        end: pair.end,
        workdays,
        inclusive: counted_end,
    }
}

/// Returns the workday count and whether the end date was counted.
fn count(start: NaiveDate, end: NaiveDate, inclusive: bool) -> (u32, bool) {
    let total_days = i64::from(end.num_days_from_ce() - start.num_days_from_ce());
    let full_weeks = total_days / 7;
    let remainder = total_days % 7;
    let mut workdays = total_days - 2 * full_weeks;

    // Monday = 1 ... Sunday = 7
    let weekday_start = i64::from(start.weekday().number_from_monday());
    // reach % 7 is the end date's weekday with Sunday as 0
    let reach = weekday_start + remainder;

    let counted_end = inclusive && (1..=5).contains(&(reach % 7));
    if counted_end {
        workdays += 1;
    }

    if remainder > 0 {
        if reach % 7 == 0 {
            workdays -= 2;
        }
        if reach % 7 == 6 {
            workdays -= 1;
        }
        if weekday_start == 6 {
            workdays -= 2;
        }
        if weekday_start == 7 {
            workdays -= 1;
        }
        if weekday_start < 6 && reach > 7 {
            workdays -= 2;
        }
    }

    (u32::try_from(workdays.max(0)).unwrap_or(u32::MAX), counted_end)
}
