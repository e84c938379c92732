//! Payment grid anchor resolution.
//!
//! This module maps an NI code onto a concrete reference payment date on the
//! DWP grid and aligns that grid to the start of a requested year.
//!
//! On the weekly, four-weekly and 13-weekly grids a code's reference date is
//! the base anchor plus its row difference in days plus its letter difference
//! in weeks. The row difference is applied as raw days, never multiplied by
//! seven: 29B lands on the Tuesday a week after 00A's Monday.
//!
//! On the fortnightly grid the letter is ignored. The last digit picks week 1
//! (even) or week 2 (odd), and the row picks the weekday within that week.

use chrono::{Datelike, Days, NaiveDate, TimeDelta, Weekday};

use crate::config::GridConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CycleLength, NiCode};

/// Days to add to the base anchor to reach `ni`'s reference date on the
/// 7/28/91-day grid.
///
/// # Example
///
/// ```
/// use pension_engine::calculation::ni_offset_days;
/// use pension_engine::models::NiCode;
///
/// let base: NiCode = "00A".parse().unwrap();
/// let target: NiCode = "29B".parse().unwrap();
/// // one row (Tuesday) plus one letter column (a week)
/// assert_eq!(ni_offset_days(&target, &base), 8);
/// ```
pub fn ni_offset_days(ni: &NiCode, base: &NiCode) -> i64 {
    let row_offset = i64::from(ni.row()) - i64::from(base.row());
    let column_offset = (i64::from(ni.letter_index()) - i64::from(base.letter_index())) * 7;
    row_offset + column_offset
}

/// Reference payment date for `ni` on the fortnightly grid.
pub fn fortnightly_anchor(ni: &NiCode, grid: &GridConfig) -> EngineResult<NaiveDate> {
    let week_anchor = if ni.last_digit() % 2 == 0 {
        grid.fortnight_week_1
    } else {
        grid.fortnight_week_2
    };
    shift_days(week_anchor, i64::from(ni.row()))
}

/// Reference payment date for `ni` on the grid used by `cycle`.
///
/// # Example
///
/// ```
/// use pension_engine::calculation::resolve_anchor;
/// use pension_engine::config::GridConfig;
/// use pension_engine::models::{CycleLength, NiCode};
/// use chrono::NaiveDate;
///
/// let ni: NiCode = "29B".parse().unwrap();
/// let grid = GridConfig::default();
///
/// assert_eq!(
///     resolve_anchor(&ni, CycleLength::FourWeekly, &grid).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 6).unwrap()
/// );
/// assert_eq!(
///     resolve_anchor(&ni, CycleLength::Fortnightly, &grid).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap()
/// );
/// ```
pub fn resolve_anchor(ni: &NiCode, cycle: CycleLength, grid: &GridConfig) -> EngineResult<NaiveDate> {
    if cycle.is_fortnightly() {
        fortnightly_anchor(ni, grid)
    } else {
        shift_days(grid.base_date, ni_offset_days(ni, &grid.base_ni))
    }
}

/// The weekday `ni` is normally paid on for `cycle`, before holiday adjustment.
pub fn normal_payment_day(ni: &NiCode, cycle: CycleLength, grid: &GridConfig) -> EngineResult<Weekday> {
    Ok(resolve_anchor(ni, cycle, grid)?.weekday())
}

/// First grid date on or after `boundary`.
///
/// Returns the earliest date `d >= boundary` with `d - anchor` a whole
/// number of cycles, wherever the anchor sits relative to the boundary.
///
/// # Example
///
/// ```
/// use pension_engine::calculation::first_due_on_or_after;
/// use pension_engine::models::CycleLength;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
/// let boundary = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(
///     first_due_on_or_after(anchor, boundary, CycleLength::FourWeekly).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()
/// );
/// ```
pub fn first_due_on_or_after(
    anchor: NaiveDate,
    boundary: NaiveDate,
    cycle: CycleLength,
) -> EngineResult<NaiveDate> {
    let distance = (anchor - boundary).num_days();
    let into_cycle = distance.rem_euclid(i64::from(cycle.days()));
    boundary
        .checked_add_days(Days::new(into_cycle as u64))
        .ok_or_else(|| out_of_range(boundary, into_cycle))
}

/// Moves `date` by a signed number of days.
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> EngineResult<NaiveDate> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| out_of_range(date, days))
}

fn out_of_range(date: NaiveDate, days: i64) -> EngineError {
    EngineError::InternalInvariant {
        message: format!("moving {date} by {days} days leaves the supported calendar"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn ni(code: &str) -> NiCode {
        code.parse().unwrap()
    }

    #[test]
    fn test_base_code_has_zero_offset() {
        assert_eq!(ni_offset_days(&ni("00A"), &ni("00A")), 0);
        assert_eq!(ni_offset_days(&ni("19A"), &ni("00A")), 0);
    }

    #[test]
    fn test_offset_rows_are_days_and_letters_are_weeks() {
        let base = ni("00A");
        assert_eq!(ni_offset_days(&ni("20A"), &base), 1);
        assert_eq!(ni_offset_days(&ni("99A"), &base), 4);
        assert_eq!(ni_offset_days(&ni("00B"), &base), 7);
        assert_eq!(ni_offset_days(&ni("84D"), &base), 25);
    }

    #[test]
    fn test_offset_relative_to_non_origin_base() {
        assert_eq!(ni_offset_days(&ni("00A"), &ni("84D")), -25);
    }

    #[test]
    fn test_weekly_grid_weekdays_follow_rows() {
        let grid = GridConfig::dwp();
        let expected = [
            ("05C", Weekday::Mon),
            ("29B", Weekday::Tue),
            ("45A", Weekday::Wed),
            ("70D", Weekday::Thu),
            ("84D", Weekday::Fri),
        ];
        for (code, weekday) in expected {
            for cycle in [CycleLength::Weekly, CycleLength::FourWeekly, CycleLength::ThirteenWeekly] {
                assert_eq!(normal_payment_day(&ni(code), cycle, &grid).unwrap(), weekday, "{code} {cycle}");
            }
        }
    }

    #[test]
    fn test_fortnightly_anchor_uses_last_digit_parity() {
        let grid = GridConfig::dwp();
        // even last digit: week 1
        assert_eq!(fortnightly_anchor(&ni("28A"), &grid).unwrap(), make_date("2026-01-06"));
        // odd last digit: week 2
        assert_eq!(fortnightly_anchor(&ni("29A"), &grid).unwrap(), make_date("2026-01-13"));
        assert_eq!(fortnightly_anchor(&ni("99D"), &grid).unwrap(), make_date("2026-01-16"));
        assert_eq!(fortnightly_anchor(&ni("00C"), &grid).unwrap(), make_date("2026-01-05"));
    }

    #[test]
    fn test_fortnightly_anchor_ignores_letter() {
        let grid = GridConfig::dwp();
        let anchors: Vec<NaiveDate> = ["29A", "29B", "29C", "29D"]
            .iter()
            .map(|code| resolve_anchor(&ni(code), CycleLength::Fortnightly, &grid).unwrap())
            .collect();
        assert!(anchors.iter().all(|d| *d == anchors[0]));
    }

    #[test]
    fn test_first_due_when_anchor_after_boundary() {
        let due = first_due_on_or_after(
            make_date("2026-01-23"),
            make_date("2024-01-01"),
            CycleLength::FourWeekly,
        )
        .unwrap();
        assert_eq!(due, make_date("2024-01-26"));
    }

    #[test]
    fn test_first_due_when_anchor_before_boundary() {
        let due = first_due_on_or_after(
            make_date("2025-12-29"),
            make_date("2030-01-01"),
            CycleLength::Weekly,
        )
        .unwrap();
        // 2029-12-31 is a Monday; next Monday on or after the boundary
        assert_eq!(due, make_date("2030-01-07"));
    }

    #[test]
    fn test_first_due_on_boundary_is_kept() {
        let boundary = make_date("2024-01-01");
        let due = first_due_on_or_after(boundary, boundary, CycleLength::ThirteenWeekly).unwrap();
        assert_eq!(due, boundary);
    }

    #[test]
    fn test_first_due_is_on_grid_and_within_one_cycle() {
        let anchor = make_date("2026-01-06");
        for cycle in CycleLength::ALL {
            for year in [1990, 2024, 2026, 2050] {
                let boundary = make_date(&format!("{year}-01-01"));
                let due = first_due_on_or_after(anchor, boundary, cycle).unwrap();
                let days = i64::from(cycle.days());
                assert!(due >= boundary);
                assert!((due - boundary).num_days() < days);
                assert_eq!((due - anchor).num_days().rem_euclid(days), 0);
            }
        }
    }

    #[test]
    fn test_shift_days_reports_overflow() {
        assert!(matches!(
            shift_days(NaiveDate::MAX, 1),
            Err(EngineError::InternalInvariant { .. })
        ));
        assert_eq!(shift_days(make_date("2026-01-01"), -1).unwrap(), make_date("2025-12-31"));
    }
}
