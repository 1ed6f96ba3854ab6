use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExtractError;

/// Any date-shaped substring: numeric triples separated by `/`, `-` or `.`,
/// or "Month Day[,] Year" with an abbreviated or full month name.
static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:\d{1,2}/\d{1,2}/\d{2,4}|\d{1,2}-\d{1,2}-\d{2,4}|\d{1,2}\.\d{1,2}\.\d{2,4}|(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\s+\d{1,2},?\s+\d{2,4})\b",
    )
    .expect("date token pattern is valid")
});

static TEXTUAL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})(,?)\s+(\d+)$").expect("textual date pattern is valid")
});

const MONTHS: [(&str, &str); 12] = [
    ("jan", "january"),
    ("feb", "february"),
    ("mar", "march"),
    ("apr", "april"),
    ("may", "may"),
    ("jun", "june"),
    ("jul", "july"),
    ("aug", "august"),
    ("sep", "september"),
    ("oct", "october"),
    ("nov", "november"),
    ("dec", "december"),
];

/// Separator of a numeric date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Slash,
    Dash,
    Dot,
}

impl Separator {
    fn as_char(self) -> char {
        match self {
            Separator::Slash => '/',
            Separator::Dash => '-',
            Separator::Dot => '.',
        }
    }
}

/// Month spelling accepted by a textual format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthName {
    Abbreviated,
    Full,
}

/// One candidate interpretation of a date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `M/D/Y`, `M-D-Y`, `M.D.Y`
    MonthFirst(Separator),
    /// `D/M/Y`, `D-M-Y`, `D.M.Y`
    DayFirst(Separator),
    /// `Month D, Y` or `Month D Y`
    Textual { month: MonthName, comma: bool },
}

/// Formats in the order they are tried against each token.
pub static TRIAL_ORDER: [DateFormat; 10] = [
    DateFormat::MonthFirst(Separator::Slash),
    DateFormat::MonthFirst(Separator::Dash),
    DateFormat::MonthFirst(Separator::Dot),
    DateFormat::DayFirst(Separator::Slash),
    DateFormat::DayFirst(Separator::Dash),
    DateFormat::DayFirst(Separator::Dot),
    DateFormat::Textual { month: MonthName::Abbreviated, comma: true },
    DateFormat::Textual { month: MonthName::Abbreviated, comma: false },
    DateFormat::Textual { month: MonthName::Full, comma: true },
    DateFormat::Textual { month: MonthName::Full, comma: false },
];

impl DateFormat {
    pub fn is_month_first(self) -> bool {
        matches!(self, DateFormat::MonthFirst(_))
    }

    pub fn is_day_first(self) -> bool {
        matches!(self, DateFormat::DayFirst(_))
    }

    /// Parse `token` under this format, or `None` if it does not fit or names
    /// an impossible date.
    pub fn parse(self, token: &str) -> Option<NaiveDate> {
        match self {
            DateFormat::MonthFirst(sep) => {
                let (month, day, year) = split_numeric(token, sep)?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateFormat::DayFirst(sep) => {
                let (day, month, year) = split_numeric(token, sep)?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateFormat::Textual { month, comma } => {
                let caps = TEXTUAL_DATE.captures(token.trim())?;
                if caps[3].is_empty() == comma {
                    return None;
                }
                let month = month_number(&caps[1], month)?;
                let day = caps[2].parse().ok()?;
                let year = parse_year(&caps[4])?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
        }
    }
}

/// Split `a<sep>b<sep>year` into its two leading fields and the expanded year.
fn split_numeric(token: &str, sep: Separator) -> Option<(u32, u32, i32)> {
    let mut parts = token.trim().split(sep.as_char());
    let first = parts.next()?;
    let second = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() || !is_digits(first) || !is_digits(second) {
        return None;
    }
    Some((first.parse().ok()?, second.parse().ok()?, parse_year(year)?))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Four digits are taken literally; two digits pivot at 69
/// (`00`-`68` become 20xx, `69`-`99` become 19xx). Other widths are rejected.
fn parse_year(s: &str) -> Option<i32> {
    if !is_digits(s) {
        return None;
    }
    let value: i32 = s.parse().ok()?;
    match s.len() {
        4 => Some(value),
        2 if value < 69 => Some(2000 + value),
        2 => Some(1900 + value),
        _ => None,
    }
}

fn month_number(name: &str, spelling: MonthName) -> Option<u32> {
    let position = MONTHS.iter().position(|(abbr, full)| match spelling {
        MonthName::Abbreviated => name.eq_ignore_ascii_case(abbr),
        MonthName::Full => name.eq_ignore_ascii_case(full),
    })?;
    u32::try_from(position + 1).ok()
}

/// Two dates ordered chronologically (`start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePair {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DatePair {
    /// Order two dates, earlier first. Equal dates form a zero-length span.
    pub fn ordered(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }
}

/// Find the first format in `formats` that parses `token`.
fn parse_token<'a>(
    token: &str,
    formats: impl IntoIterator<Item = &'a DateFormat>,
) -> Option<(DateFormat, NaiveDate)> {
    formats
        .into_iter()
        .find_map(|format| format.parse(token).map(|date| (*format, date)))
}

/// Extract exactly two dates from free text and order them.
///
/// Numeric dates in one query share a single day/month convention: if
/// either token only parses day-first, both are reparsed with the
/// month-first formats removed.
pub fn extract(text: &str) -> Result<DatePair, ExtractError> {
    let tokens: Vec<&str> = DATE_TOKEN.find_iter(text).map(|m| m.as_str()).collect();
    let [first, second] = tokens.as_slice() else {
        debug!("found {} date token(s) in {text:?}", tokens.len());
        return Err(ExtractError::NoDatesFound {
            found: tokens.len(),
        });
    };

    let mut parsed = [parse_token(first, &TRIAL_ORDER), parse_token(second, &TRIAL_ORDER)];
    if parsed.iter().flatten().any(|(format, _)| format.is_day_first()) {
        debug!("day-first date in {text:?}, reparsing both tokens day-first");
        let day_first = || TRIAL_ORDER.iter().filter(|f| !f.is_month_first());
        parsed = [parse_token(first, day_first()), parse_token(second, day_first())];
    }

    match parsed {
        [Some((_, a)), Some((_, b))] => Ok(DatePair::ordered(a, b)),
        _ => Err(ExtractError::IncompleteParse {
            parsed: parsed.iter().flatten().count(),
        }),
    }
}
