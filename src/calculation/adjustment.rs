//! Non-working day detection and payment date adjustment.
//!
//! This module provides utilities for classifying a date as a working day,
//! weekend or holiday, and for moving a payment date back to the nearest
//! preceding working day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::HolidayMap;

/// Represents the kind of day for payment purposes.
///
/// A holiday that falls on a weekend is classified as [`DayKind::Holiday`] so
/// that its name is still recorded when a payment is moved over it.
///
/// # Example
///
/// ```
/// use pension_engine::calculation::DayKind;
///
/// let kind = DayKind::Weekend;
/// assert_eq!(format!("{}", kind), "Weekend");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Monday through Friday and not a holiday.
    Working,
    /// Saturday or Sunday.
    Weekend,
    /// A date present in the holiday map.
    Holiday,
}

impl std::fmt::Display for DayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayKind::Working => write!(f, "Working"),
            DayKind::Weekend => write!(f, "Weekend"),
            DayKind::Holiday => write!(f, "Holiday"),
        }
    }
}

/// Determines the day kind for a given date.
///
/// # Example
///
/// ```
/// use pension_engine::calculation::{classify_day, DayKind};
/// use pension_engine::models::HolidayMap;
/// use chrono::NaiveDate;
///
/// let mut holidays = HolidayMap::new();
/// holidays.insert(NaiveDate::from_ymd_opt(2026, 4, 3).unwrap(), "Good Friday");
///
/// // 2026-04-03 is a Friday holiday
/// assert_eq!(classify_day(NaiveDate::from_ymd_opt(2026, 4, 3).unwrap(), &holidays), DayKind::Holiday);
/// // 2026-04-04 is a Saturday
/// assert_eq!(classify_day(NaiveDate::from_ymd_opt(2026, 4, 4).unwrap(), &holidays), DayKind::Weekend);
/// // 2026-04-02 is a Thursday
/// assert_eq!(classify_day(NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(), &holidays), DayKind::Working);
/// ```
pub fn classify_day(date: NaiveDate, holidays: &HolidayMap) -> DayKind {
    if holidays.is_holiday(date) {
        return DayKind::Holiday;
    }
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayKind::Weekend,
        _ => DayKind::Working,
    }
}

/// The outcome of moving a date off non-working days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    /// The first working day on or before the requested date.
    pub date: NaiveDate,
    /// True when `date` differs from the requested date.
    pub was_adjusted: bool,
    /// Holiday names walked over, nearest to the requested date first.
    pub holidays: Vec<String>,
}

/// States of the backward walk.
enum Walk {
    Scanning(NaiveDate),
    Settled(NaiveDate),
}

/// Moves `date` back to the nearest working day.
///
/// Steps back one day at a time while the current date is a weekend or a
/// holiday, recording each holiday name on the way. Weekends contribute no
/// name. A working day is returned unchanged.
///
/// The walk ends for any finite holiday map: at most two days in seven are
/// weekend days, so a bare weekday is always reached.
///
/// # Errors
///
/// Returns `InternalInvariant` if the walk would leave chrono's calendar range.
///
/// # Example
///
/// ```
/// use pension_engine::calculation::adjust_for_non_working_days;
/// use pension_engine::models::HolidayMap;
/// use chrono::NaiveDate;
///
/// let mut holidays = HolidayMap::new();
/// holidays.insert(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), "New Year (substitute)");
///
/// // Monday holiday, then back over the weekend to Friday
/// let adjusted = adjust_for_non_working_days(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), &holidays).unwrap();
/// assert_eq!(adjusted.date, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
/// assert!(adjusted.was_adjusted);
/// assert_eq!(adjusted.holidays, vec!["New Year (substitute)".to_string()]);
/// ```
pub fn adjust_for_non_working_days(date: NaiveDate, holidays: &HolidayMap) -> EngineResult<Adjustment> {
    let mut names = Vec::new();
    let mut state = Walk::Scanning(date);

    let settled = loop {
        match state {
            Walk::Scanning(current) => {
                state = match classify_day(current, holidays) {
                    DayKind::Working => Walk::Settled(current),
                    DayKind::Weekend => Walk::Scanning(previous_day(current)?),
                    DayKind::Holiday => {
                        if let Some(name) = holidays.name(current) {
                            names.push(name.to_string());
                        }
                        Walk::Scanning(previous_day(current)?)
                    }
                };
            }
            Walk::Settled(current) => break current,
        }
    };

    Ok(Adjustment {
        date: settled,
        was_adjusted: settled != date,
        holidays: names,
    })
}

fn previous_day(date: NaiveDate) -> EngineResult<NaiveDate> {
    date.pred_opt().ok_or_else(|| EngineError::InternalInvariant {
        message: format!("no working day found on or before {date}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn holidays(entries: &[(&str, &str)]) -> HolidayMap {
        entries
            .iter()
            .map(|(date, name)| (make_date(date), name.to_string()))
            .collect()
    }

    fn christmas_2026() -> HolidayMap {
        holidays(&[
            ("2026-12-25", "Christmas Day"),
            ("2026-12-28", "Boxing Day (substitute day)"),
        ])
    }

    // ==========================================================================
    // classify_day
    // ==========================================================================

    #[test]
    fn test_classify_weekdays_as_working() {
        let none = HolidayMap::new();
        // 2026-01-12 Monday through 2026-01-16 Friday
        for day in 12..=16 {
            let date = make_date(&format!("2026-01-{day}"));
            assert_eq!(classify_day(date, &none), DayKind::Working, "{date}");
        }
    }

    #[test]
    fn test_classify_weekend() {
        let none = HolidayMap::new();
        assert_eq!(classify_day(make_date("2026-01-17"), &none), DayKind::Weekend);
        assert_eq!(classify_day(make_date("2026-01-18"), &none), DayKind::Weekend);
    }

    #[test]
    fn test_holiday_on_weekend_classifies_as_holiday() {
        let map = holidays(&[("2026-12-26", "Boxing Day")]);
        assert_eq!(classify_day(make_date("2026-12-26"), &map), DayKind::Holiday);
    }

    #[test]
    fn test_day_kind_display() {
        assert_eq!(DayKind::Working.to_string(), "Working");
        assert_eq!(DayKind::Holiday.to_string(), "Holiday");
    }

    // ==========================================================================
    // adjust_for_non_working_days
    // ==========================================================================

    #[test]
    fn test_working_day_is_unchanged() {
        let adjusted = adjust_for_non_working_days(make_date("2026-01-13"), &HolidayMap::new()).unwrap();
        assert_eq!(adjusted.date, make_date("2026-01-13"));
        assert!(!adjusted.was_adjusted);
        assert!(adjusted.holidays.is_empty());
    }

    #[test]
    fn test_saturday_moves_to_friday_without_names() {
        let adjusted = adjust_for_non_working_days(make_date("2026-01-17"), &HolidayMap::new()).unwrap();
        assert_eq!(adjusted.date, make_date("2026-01-16"));
        assert!(adjusted.was_adjusted);
        assert!(adjusted.holidays.is_empty());
    }

    #[test]
    fn test_sunday_moves_to_friday() {
        let adjusted = adjust_for_non_working_days(make_date("2026-01-18"), &HolidayMap::new()).unwrap();
        assert_eq!(adjusted.date, make_date("2026-01-16"));
    }

    #[test]
    fn test_good_friday_moves_to_thursday() {
        let map = holidays(&[("2026-04-03", "Good Friday"), ("2026-04-06", "Easter Monday")]);
        let adjusted = adjust_for_non_working_days(make_date("2026-04-03"), &map).unwrap();
        assert_eq!(adjusted.date, make_date("2026-04-02"));
        assert_eq!(adjusted.holidays, vec!["Good Friday".to_string()]);
    }

    #[test]
    fn test_easter_monday_walks_over_weekend_and_good_friday() {
        let map = holidays(&[("2026-04-03", "Good Friday"), ("2026-04-06", "Easter Monday")]);
        let adjusted = adjust_for_non_working_days(make_date("2026-04-06"), &map).unwrap();
        assert_eq!(adjusted.date, make_date("2026-04-02"));
        assert_eq!(
            adjusted.holidays,
            vec!["Easter Monday".to_string(), "Good Friday".to_string()]
        );
    }

    #[test]
    fn test_christmas_cluster_collects_names_nearest_first() {
        let adjusted = adjust_for_non_working_days(make_date("2026-12-28"), &christmas_2026()).unwrap();
        // Mon 28 (substitute) -> Sun 27 -> Sat 26 -> Fri 25 (Christmas) -> Thu 24
        assert_eq!(adjusted.date, make_date("2026-12-24"));
        assert_eq!(
            adjusted.holidays,
            vec![
                "Boxing Day (substitute day)".to_string(),
                "Christmas Day".to_string()
            ]
        );
    }

    #[test]
    fn test_weekend_holiday_name_is_recorded() {
        let map = holidays(&[("2026-12-26", "Boxing Day")]);
        let adjusted = adjust_for_non_working_days(make_date("2026-12-27"), &map).unwrap();
        assert_eq!(adjusted.date, make_date("2026-12-25"));
        assert_eq!(adjusted.holidays, vec!["Boxing Day".to_string()]);
    }

    #[test]
    fn test_adjustment_can_cross_year_boundary() {
        let map = holidays(&[("2027-01-01", "New Year's Day")]);
        // 2027-01-01 is a Friday
        let adjusted = adjust_for_non_working_days(make_date("2027-01-01"), &map).unwrap();
        assert_eq!(adjusted.date, make_date("2026-12-31"));
    }

    #[test]
    fn test_long_holiday_run_terminates() {
        let mut map = HolidayMap::new();
        let mut date = make_date("2026-08-31");
        for _ in 0..30 {
            map.insert(date, "Closure");
            date = date.pred_opt().unwrap();
        }
        let adjusted = adjust_for_non_working_days(make_date("2026-08-31"), &map).unwrap();
        assert!(adjusted.date < make_date("2026-08-02"));
        assert_eq!(classify_day(adjusted.date, &map), DayKind::Working);
        assert_eq!(adjusted.holidays.len(), 30);
    }

    #[test]
    fn test_walk_past_calendar_start_is_invariant_error() {
        let map = holidays(&[(&NaiveDate::MIN.to_string(), "Epoch")]);
        let result = adjust_for_non_working_days(NaiveDate::MIN, &map);
        assert!(matches!(result, Err(EngineError::InternalInvariant { .. })));
    }
}
