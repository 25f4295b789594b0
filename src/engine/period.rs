// ==========================================
// Ministry Performance Tracking - Period Key Resolver
// ==========================================
// Responsibility: the ONLY place period identifier strings are parsed,
// formatted, and looked up. Producers key their maps inconsistently
// ("q1" vs "q1-2016" vs "year-2016"); every caller resolves cells
// through the fallback ladder implemented here.
// ==========================================
// Fiscal years follow the Ethiopian calendar, offset from the Gregorian
// year by 8 before the new-year cutoff and 7 after it.
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use std::fmt;

use crate::domain::measurement::PeriodMap;
use crate::engine::ratio::as_number;

// ==========================================
// PeriodKey - typed period identifier
// ==========================================
/// Fully-qualified period: a fiscal year, or a quarter of a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    Year { fiscal_year: i32 },
    Quarter { quarter: u8, fiscal_year: i32 },
}

impl PeriodKey {
    pub fn year(fiscal_year: i32) -> Self {
        PeriodKey::Year { fiscal_year }
    }

    /// Quarter constructor; `quarter` outside 1..=4 yields None
    pub fn quarter(quarter: u8, fiscal_year: i32) -> Option<Self> {
        if (1..=4).contains(&quarter) {
            Some(PeriodKey::Quarter { quarter, fiscal_year })
        } else {
            None
        }
    }

    /// Canonical storage key ("year-2016", "q1-2016")
    pub fn storage_key(&self) -> String {
        self.to_string()
    }

    pub fn fiscal_year(&self) -> i32 {
        match self {
            PeriodKey::Year { fiscal_year } => *fiscal_year,
            PeriodKey::Quarter { fiscal_year, .. } => *fiscal_year,
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Year { fiscal_year } => write!(f, "year-{}", fiscal_year),
            PeriodKey::Quarter { quarter, fiscal_year } => {
                write!(f, "q{}-{}", quarter, fiscal_year)
            }
        }
    }
}

// ==========================================
// RawPeriodKey - parsed form of a producer key
// ==========================================
// Producer keys may omit the fiscal year ("q1", "year"); the resolver
// ladder supplies the missing year from the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPeriodKey {
    Year { fiscal_year: Option<i32> },
    Quarter { quarter: u8, fiscal_year: Option<i32> },
}

/// Parse a raw period key string (case-insensitive, surrounding
/// whitespace ignored). Unrecognized shapes yield None.
///
/// Accepted: "year", "year-<Y>", "q<1-4>", "q<1-4>-<Y>"
pub fn parse_period_key(raw: &str) -> Option<RawPeriodKey> {
    let key = raw.trim().to_ascii_lowercase();
    let (stem, year) = match key.split_once('-') {
        Some((stem, suffix)) => {
            let year: i32 = suffix.parse().ok()?;
            (stem.to_string(), Some(year))
        }
        None => (key.clone(), None),
    };

    if stem == "year" {
        return Some(RawPeriodKey::Year { fiscal_year: year });
    }
    if let Some(digits) = stem.strip_prefix('q') {
        let quarter: u8 = digits.parse().ok()?;
        if (1..=4).contains(&quarter) {
            return Some(RawPeriodKey::Quarter { quarter, fiscal_year: year });
        }
    }
    None
}

// ==========================================
// FiscalYearWindow
// ==========================================
/// The two-fiscal-year reporting window: the current Ethiopian fiscal
/// year and the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalYearWindow {
    pub current: i32,
    pub previous: i32,
}

impl FiscalYearWindow {
    pub fn new(current: i32) -> Self {
        Self { current, previous: current - 1 }
    }

    /// Window for a given Gregorian date
    pub fn for_gregorian_date(date: NaiveDate) -> Self {
        Self::new(fiscal_year_for(date))
    }

    /// Window for today (local clock)
    pub fn today() -> Self {
        Self::for_gregorian_date(chrono::Local::now().date_naive())
    }

    /// The window's fiscal years, current first
    pub fn years(&self) -> [i32; 2] {
        [self.current, self.previous]
    }

    /// The window's standard period keys: year + q1..q4 for each fiscal
    /// year, current year first. Used for ratio pre-computation.
    pub fn period_keys(&self) -> Vec<PeriodKey> {
        let mut keys = Vec::with_capacity(10);
        for fiscal_year in self.years() {
            keys.push(PeriodKey::year(fiscal_year));
            for quarter in 1..=4u8 {
                keys.push(PeriodKey::Quarter { quarter, fiscal_year });
            }
        }
        keys
    }
}

/// Ethiopian fiscal year for a Gregorian date.
///
/// Before the new-year cutoff the fiscal year is `gregorian - 8`, after
/// it `gregorian - 7`. Within Gregorian month 9 the cutoff day is 11,
/// or 12 when the running Gregorian year is a leap year; the cutoff day
/// itself still maps to `gregorian - 8`.
//
// TODO: confirm with the calendar owner whether the cutoff day should be
// driven by the Ethiopian leap cycle rather than the Gregorian leap flag.
pub fn fiscal_year_for(date: NaiveDate) -> i32 {
    let year = date.year();
    match date.month().cmp(&9) {
        std::cmp::Ordering::Less => year - 8,
        std::cmp::Ordering::Greater => year - 7,
        std::cmp::Ordering::Equal => {
            let cutoff_day = if is_gregorian_leap_year(year) { 12 } else { 11 };
            if date.day() <= cutoff_day {
                year - 8
            } else {
                year - 7
            }
        }
    }
}

fn is_gregorian_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

// ==========================================
// Fallback ladder
// ==========================================

/// Resolve a period cell from a map, walking the fallback ladder:
///
/// 1. exact key match (case-insensitive)
/// 2. quarter key with year suffix -> bare quarter
/// 3. bare quarter -> current-year suffix, then previous-year suffix
/// 4. bare "year" -> "year-<current>", then "year-<previous>"
/// 5. "year-<Y>" -> bare "year"
///
/// No rung matching yields None - an absent cell, not an error.
pub fn resolve<'a>(
    map: &'a PeriodMap,
    raw_key: &str,
    window: &FiscalYearWindow,
) -> Option<&'a Value> {
    // Rung 1: exact, case-insensitive
    if let Some(value) = get_ci(map, raw_key) {
        return Some(value);
    }

    match parse_period_key(raw_key)? {
        RawPeriodKey::Quarter { quarter, fiscal_year: Some(_) } => {
            // Rung 2: drop the year suffix
            get_ci(map, &format!("q{}", quarter))
        }
        RawPeriodKey::Quarter { quarter, fiscal_year: None } => {
            // Rung 3: supply current, then previous year
            get_ci(map, &format!("q{}-{}", quarter, window.current))
                .or_else(|| get_ci(map, &format!("q{}-{}", quarter, window.previous)))
        }
        RawPeriodKey::Year { fiscal_year: None } => {
            // Rung 4: supply current, then previous year
            get_ci(map, &format!("year-{}", window.current))
                .or_else(|| get_ci(map, &format!("year-{}", window.previous)))
        }
        RawPeriodKey::Year { fiscal_year: Some(_) } => {
            // Rung 5: fall back to the bare year key
            get_ci(map, "year")
        }
    }
}

/// Resolve and coerce to a number in one step
pub fn resolve_number(map: &PeriodMap, raw_key: &str, window: &FiscalYearWindow) -> Option<f64> {
    resolve(map, raw_key, window).and_then(as_number)
}

/// Case-insensitive map lookup. Keys are lowercased when records enter
/// the engine, so the direct hit covers the hot path; the scan covers
/// maps built by outside callers.
fn get_ci<'a>(map: &'a PeriodMap, key: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }
    let lowered = key.trim().to_ascii_lowercase();
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(&lowered))
        .map(|(_, v)| v)
}
