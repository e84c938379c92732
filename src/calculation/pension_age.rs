//! State Pension age resolution.
//!
//! This module maps a date of birth onto the State Pension age timetable and
//! returns the date State Pension age is reached.

use std::sync::LazyLock;

use chrono::{Months, NaiveDate};

use crate::config::SpaTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{SpaResult, SpaRule, SpaSource};

static GOV_UK_TABLE: LazyLock<SpaTable> = LazyLock::new(SpaTable::gov_uk);

/// Calculates State Pension age from a `YYYY-MM-DD` date of birth using the
/// GOV.UK timetable.
///
/// # Errors
///
/// * `MalformedInput` - `dob` is not a real date written as `YYYY-MM-DD`
/// * `InternalInvariant` - no timetable rule covers `dob`
///
/// # Example
///
/// ```
/// use pension_engine::calculation::calculate_state_pension_age;
/// use pension_engine::models::SpaSource;
/// use chrono::NaiveDate;
///
/// let result = calculate_state_pension_age("1960-04-06").unwrap();
/// assert_eq!(result.spa_date, NaiveDate::from_ymd_opt(2026, 5, 6).unwrap());
/// assert_eq!((result.spa_age_years, result.spa_age_months), (66, 1));
/// assert_eq!(result.source, SpaSource::Offset);
/// ```
pub fn calculate_state_pension_age(dob: &str) -> EngineResult<SpaResult> {
    calculate_state_pension_age_with(dob, &GOV_UK_TABLE)
}

/// Calculates State Pension age against a given timetable.
///
/// The first rule whose range contains the date of birth decides the
/// result. Fixed rules return their date with a zero age; offset and
/// birthday rules add the age to the date of birth, clamping the day to the
/// end of a shorter target month.
pub fn calculate_state_pension_age_with(dob: &str, table: &SpaTable) -> EngineResult<SpaResult> {
    let date = parse_iso_date(dob)?;

    let rule = table.find(date).ok_or_else(|| EngineError::InternalInvariant {
        message: format!("no State Pension age rule covers date of birth {date}"),
    })?;

    match *rule {
        SpaRule::Fixed { spa_date, .. } => Ok(SpaResult {
            spa_date,
            spa_age_years: 0,
            spa_age_months: 0,
            source: SpaSource::Fixed,
        }),
        SpaRule::Offset { years, months, .. } => Ok(SpaResult {
            spa_date: add_years_months_clamped(date, years, months)?,
            spa_age_years: years,
            spa_age_months: months,
            source: SpaSource::Offset,
        }),
        SpaRule::Birthday { years, .. } => Ok(SpaResult {
            spa_date: add_years_months_clamped(date, years, 0)?,
            spa_age_years: years,
            spa_age_months: 0,
            source: SpaSource::Birthday,
        }),
    }
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// chrono's `%Y-%m-%d` also accepts unpadded fields and signed years, so the
/// shape is checked first.
fn parse_iso_date(value: &str) -> EngineResult<NaiveDate> {
    let malformed = |message: &str| EngineError::malformed("dob", value, message);

    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(malformed("date of birth must be in YYYY-MM-DD format"));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| malformed("date of birth is not a real calendar date"))
}

fn add_years_months_clamped(dob: NaiveDate, years: u32, months: u32) -> EngineResult<NaiveDate> {
    years
        .checked_mul(12)
        .and_then(|total| total.checked_add(months))
        .and_then(|total| dob.checked_add_months(Months::new(total)))
        .ok_or_else(|| EngineError::InternalInvariant {
            message: format!("{dob} plus {years} years {months} months leaves the supported calendar"),
        })
}
