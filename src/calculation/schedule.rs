//! Payment schedule generation.
//!
//! This module builds the sequence of State Pension payments for an NI code
//! over a range of calendar years. Each due date comes from the DWP payment
//! grid; each paid date is that due date moved back over weekends and
//! holidays.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::config::GridConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CycleLength, HolidayMap, NiCode, Payment, PensionResult};

use super::adjustment::adjust_for_non_working_days;
use super::anchor::{first_due_on_or_after, resolve_anchor};

/// The widest year range a single schedule may cover, counting both ends.
pub const MAX_YEAR_SPAN: i64 = 200;

/// Generates a payment schedule from raw caller input.
///
/// The cycle length is checked before the NI code, so a request with both
/// wrong reports the cycle. Uses the standard DWP grid anchors.
///
/// # Arguments
///
/// * `ni_code` - Two digits and a letter A-D, e.g. `"29B"` (case-insensitive)
/// * `start_year` - First calendar year to include
/// * `end_year` - Last calendar year to include; before `start_year` gives no payments
/// * `cycle_days` - One of 7, 14, 28 or 91
/// * `holidays` - Non-working dates to move payments off
///
/// # Errors
///
/// * `InvalidConfiguration` - `cycle_days` is not a DWP cycle
/// * `MalformedInput` - the NI code is malformed, a year is outside the supported calendar,
///   or the range covers more than [`MAX_YEAR_SPAN`] years
///
/// # Example
///
/// ```
/// use pension_engine::calculation::generate_payments;
/// use pension_engine::models::HolidayMap;
/// use chrono::{NaiveDate, Weekday};
///
/// let result = generate_payments("29B", 2024, 2026, 28, &HolidayMap::new()).unwrap();
///
/// assert_eq!(result.normal_day, Weekday::Tue);
/// assert_eq!(result.payments[0].paid, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
/// ```
pub fn generate_payments(
    ni_code: &str,
    start_year: i32,
    end_year: i32,
    cycle_days: u32,
    holidays: &HolidayMap,
) -> EngineResult<PensionResult> {
    let cycle = CycleLength::try_from(cycle_days)?;
    let ni: NiCode = ni_code.parse()?;
    generate_schedule(&ni, cycle, start_year..=end_year, holidays, &GridConfig::default())
}

/// Generates a payment schedule on a given grid.
///
/// Due dates are every `cycle` days on the code's grid, from the first grid
/// date on or after 1 January of the first year up to 31 December of the
/// last. Paid dates may fall in the year before the range; they are kept.
///
/// # Errors
///
/// Returns `MalformedInput` when a year of a non-empty range has no 1 January
/// or 31 December in chrono's calendar, or when the range covers more than
/// [`MAX_YEAR_SPAN`] years.
pub fn generate_schedule(
    ni: &NiCode,
    cycle: CycleLength,
    years: RangeInclusive<i32>,
    holidays: &HolidayMap,
    grid: &GridConfig,
) -> EngineResult<PensionResult> {
    let anchor = resolve_anchor(ni, cycle, grid)?;
    let mut result = PensionResult {
        ni: *ni,
        normal_day: anchor.weekday(),
        cycle_days: cycle.days(),
        payments: Vec::new(),
    };

    if years.is_empty() {
        debug!(ni = %ni, start_year = years.start(), end_year = years.end(), "Empty year range");
        return Ok(result);
    }

    let first_day = year_boundary(*years.start(), 1, 1, "start_year")?;
    let last_day = year_boundary(*years.end(), 12, 31, "end_year")?;

    let span = i64::from(*years.end()) - i64::from(*years.start()) + 1;
    if span > MAX_YEAR_SPAN {
        return Err(EngineError::malformed(
            "end_year",
            years.end().to_string(),
            format!("range covers {span} years, at most {MAX_YEAR_SPAN} are allowed"),
        ));
    }

    let mut due = first_due_on_or_after(anchor, first_day, cycle)?;
    while due <= last_day {
        let adjusted = adjust_for_non_working_days(due, holidays)?;
        result.payments.push(Payment {
            due,
            paid: adjusted.date,
            early: adjusted.was_adjusted,
            holidays: adjusted.holidays,
        });

        due = match due.checked_add_days(Days::new(u64::from(cycle.days()))) {
            Some(next) => next,
            None => break,
        };
    }

    debug!(
        ni = %ni,
        cycle_days = cycle.days(),
        anchor = %anchor,
        payments = result.payments.len(),
        early = result.early_payments().count(),
        "Generated payment schedule"
    );

    Ok(result)
}

fn year_boundary(year: i32, month: u32, day: u32, field: &str) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        EngineError::malformed(field, year.to_string(), "year is outside the supported calendar")
    })
}
