use std::fmt;

use tracing::debug;

use crate::calendar::{self, WorkdaySpan};
use crate::error::ExtractError;
use crate::extractor;
use crate::query;

/// Display format for dates in answers, e.g. `Jan 31, 2000`.
const DATE_FORMAT: &str = "%b %d, %Y";

/// Extract both dates from `text` and count the workdays between them.
pub fn evaluate(text: &str) -> Result<WorkdaySpan, ExtractError> {
    let pair = extractor::extract(text)?;
    Ok(calendar::span(pair, query::is_inclusive(text)))
}

/// Answer a query with a sentence, or `None` when it has no answer.
pub fn answer(text: &str) -> Option<String> {
    match evaluate(text) {
        Ok(span) => Some(span.sentence()),
        Err(e) => {
            debug!("no answer for {text:?}: {e}");
            None
        }
    }
}

impl WorkdaySpan {
    /// Render as e.g. "There are 4 workdays between Jan 06, 2025 and Jan 10, 2025."
    pub fn sentence(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WorkdaySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (verb, noun) = if self.workdays == 1 {
            ("is", "workday")
        } else {
            ("are", "workdays")
        };
        write!(
            f,
            "There {verb} {} {noun} between {} and {}",
            self.workdays,
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT),
        )?;
        if self.inclusive {
            f.write_str(", inclusive")?;
        }
        f.write_str(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn answer_leap_year_query() {
        assert_eq!(
            answer("workdays between 01/31/2000 01/31/2001").as_deref(),
            Some("There are 262 workdays between Jan 31, 2000 and Jan 31, 2001.")
        );
    }

    #[test]
    fn answer_inclusive_query() {
        assert_eq!(
            answer("workdays between 01/31/2000 01/31/2001 inclusive").as_deref(),
            Some("There are 263 workdays between Jan 31, 2000 and Jan 31, 2001, inclusive.")
        );
    }

    #[test]
    fn answer_singular() {
        // Fri Jan 10 to Mon Jan 13, 2025
        assert_eq!(
            answer("business days between Jan 13, 2025 and Jan 10, 2025").as_deref(),
            Some("There is 1 workday between Jan 10, 2025 and Jan 13, 2025.")
        );
    }

    #[test]
    fn answer_same_day() {
        // Feb 1, 2020 is a Saturday
        assert_eq!(
            answer("workdays between Feb 1, 2020 and Feb 1, 2020").as_deref(),
            Some("There are 0 workdays between Feb 01, 2020 and Feb 01, 2020.")
        );
        assert_eq!(
            answer("workdays between Feb 1, 2020 and Feb 1, 2020 inclusive").as_deref(),
            Some("There are 0 workdays between Feb 01, 2020 and Feb 01, 2020.")
        );
    }

    #[test]
    fn answer_inclusive_weekend_end_drops_qualifier() {
        // Fri Jan 10 to Sun Jan 12, 2025
        assert_eq!(
            answer("working days 1/10/2025 1/12/2025 inclusive").as_deref(),
            Some("There are 0 workdays between Jan 10, 2025 and Jan 12, 2025.")
        );
    }

    #[test]
    fn answer_none_without_two_dates() {
        assert_eq!(answer("workdays between 01/31/2000"), None);
        assert_eq!(answer("workdays between 1/1/2000 1/2/2000 1/3/2000"), None);
        assert_eq!(answer("workdays between 02/30/2020 03/01/2020"), None);
    }

    #[test]
    fn evaluate_returns_structured_span() {
        let span = evaluate("work days between 13/01/2020 05/02/2020").unwrap();
        assert_eq!(span.start, date(2020, 1, 13));
        assert_eq!(span.end, date(2020, 2, 5));
        // Mon Jan 13 to Wed Feb 5: 23 days, 3 weeks + 2
        assert_eq!(span.workdays, 17);
        assert!(!span.inclusive);
    }

    #[test]
    fn evaluate_reports_error_kind() {
        assert_eq!(
            evaluate("no dates here"),
            Err(ExtractError::NoDatesFound { found: 0 })
        );
    }

    #[test]
    fn span_serializes_to_json() {
        let span = evaluate("1/6/2025 1/10/2025 inclusive").unwrap();
        let json = serde_json::to_value(span).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "start": "2025-01-06",
                "end": "2025-01-10",
                "workdays": 5,
                "inclusive": true,
            })
        );
    }
}
