//! State Pension age models.
//!
//! This module contains the [`SpaRule`] rule variants that make up a State
//! Pension age timetable and the [`SpaResult`] produced by resolving one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a State Pension age timetable.
///
/// Each rule covers an inclusive range of dates of birth and resolves in one
/// of three ways.
///
/// # Example
///
/// ```
/// use pension_engine::models::{SpaRule, SpaSource};
/// use chrono::NaiveDate;
///
/// let rule = SpaRule::Offset {
///     start: NaiveDate::from_ymd_opt(1960, 4, 6).unwrap(),
///     end: NaiveDate::from_ymd_opt(1960, 5, 5).unwrap(),
///     years: 66,
///     months: 1,
/// };
/// assert!(rule.contains(NaiveDate::from_ymd_opt(1960, 4, 20).unwrap()));
/// assert_eq!(rule.source(), SpaSource::Offset);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpaRule {
    /// Everyone born in the range reaches State Pension age on one date.
    Fixed {
        /// First date of birth covered (inclusive).
        start: NaiveDate,
        /// Last date of birth covered (inclusive).
        end: NaiveDate,
        /// The State Pension age date.
        spa_date: NaiveDate,
    },
    /// State Pension age is a number of years and months after birth.
    Offset {
        /// First date of birth covered (inclusive).
        start: NaiveDate,
        /// Last date of birth covered (inclusive).
        end: NaiveDate,
        /// Whole years added to the date of birth.
        years: u32,
        /// Additional months added to the date of birth.
        months: u32,
    },
    /// State Pension age is reached on a birthday.
    Birthday {
        /// First date of birth covered (inclusive).
        start: NaiveDate,
        /// Last date of birth covered (inclusive).
        end: NaiveDate,
        /// The age in years.
        years: u32,
    },
}

impl SpaRule {
    /// First date of birth covered.
    pub fn start(&self) -> NaiveDate {
        match self {
            SpaRule::Fixed { start, .. }
            | SpaRule::Offset { start, .. }
            | SpaRule::Birthday { start, .. } => *start,
        }
    }

    /// Last date of birth covered.
    pub fn end(&self) -> NaiveDate {
        match self {
            SpaRule::Fixed { end, .. } | SpaRule::Offset { end, .. } | SpaRule::Birthday { end, .. } => {
                *end
            }
        }
    }

    /// Whether `dob` falls in this rule's inclusive range.
    pub fn contains(&self, dob: NaiveDate) -> bool {
        self.start() <= dob && dob <= self.end()
    }

    /// Which variant this rule is.
    pub fn source(&self) -> SpaSource {
        match self {
            SpaRule::Fixed { .. } => SpaSource::Fixed,
            SpaRule::Offset { .. } => SpaSource::Offset,
            SpaRule::Birthday { .. } => SpaSource::Birthday,
        }
    }
}

/// The kind of rule that produced a [`SpaResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaSource {
    /// A fixed date from the timetable.
    Fixed,
    /// An age of years plus months.
    Offset,
    /// A birthday.
    Birthday,
}

/// A resolved State Pension age.
///
/// For [`SpaSource::Fixed`] results the age fields are zero: fixed timetable
/// rows give a date, not an age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaResult {
    /// The date State Pension age is reached.
    pub spa_date: NaiveDate,
    /// Age in whole years.
    pub spa_age_years: u32,
    /// Additional months on top of `spa_age_years`.
    pub spa_age_months: u32,
    /// The rule variant used.
    pub source: SpaSource,
}
