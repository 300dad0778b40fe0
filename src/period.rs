//! Period-key resolution.
//!
//! The store treats period keys as opaque equal-by-value strings; computing
//! "this month", "next month", or validating a user-given token is a pure
//! function living here, callable wherever a command needs a default or a
//! checked key.

use chrono::{Datelike, NaiveDate};

/// How period keys are rendered and recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PeriodStyle {
    /// `MM/YY` tokens, e.g. `06/24`.
    #[default]
    MonthYear,
    /// English month names, e.g. `June`. Month names in other supported
    /// languages are accepted on input and mapped onto the English name.
    MonthName,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Lower-case month-name synonyms accepted on input (English and Portuguese,
// with the accent-less spelling of março).
const MONTH_SYNONYMS: [(&str, u32); 25] = [
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("janeiro", 1),
    ("fevereiro", 2),
    ("março", 3),
    ("marco", 3),
    ("abril", 4),
    ("maio", 5),
    ("junho", 6),
    ("julho", 7),
    ("agosto", 8),
    ("setembro", 9),
    ("outubro", 10),
    ("novembro", 11),
    ("dezembro", 12),
];

/// Period key for the month `today` falls in.
pub fn current_period(style: PeriodStyle, today: NaiveDate) -> String {
    period_key(style, today.month(), today.year())
}

/// Period key for the month after `today` — the default period suggestions
/// are collected under.
pub fn next_period(style: PeriodStyle, today: NaiveDate) -> String {
    let (month, year) = if today.month() == 12 {
        (1, today.year() + 1)
    } else {
        (today.month() + 1, today.year())
    };
    period_key(style, month, year)
}

/// Validates a user-supplied period token, returning the canonical key.
/// `MM/YY` tokens keep their text (month range checked); month names match
/// case-insensitively in any supported language and canonicalize to the
/// English name. Anything else is rejected.
pub fn resolve(style: PeriodStyle, token: &str) -> Option<String> {
    let trimmed = token.trim();
    match style {
        PeriodStyle::MonthYear => {
            if !regex!(r"^\d{2}/\d{2}$").is_match(trimmed) {
                return None;
            }
            let month: u32 = trimmed[..2].parse().ok()?;
            if !(1..=12).contains(&month) {
                return None;
            }
            Some(trimmed.to_owned())
        }
        PeriodStyle::MonthName => {
            let lowered = trimmed.to_lowercase();
            let month = MONTH_SYNONYMS
                .iter()
                .find(|(name, _)| *name == lowered)
                .map(|&(_, month)| month)?;
            Some(month_name(month))
        }
    }
}

fn period_key(style: PeriodStyle, month: u32, year: i32) -> String {
    match style {
        PeriodStyle::MonthYear => format!("{:02}/{:02}", month, year.rem_euclid(100)),
        PeriodStyle::MonthName => month_name(month),
    }
}

fn month_name(month: u32) -> String {
    MONTH_NAMES[(month - 1) as usize].to_owned()
}
