//! Configuration types for the pension engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the built-in DWP grid
//! anchors used when no configuration directory is supplied.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{HolidayMap, NiCode, SpaRule};

use super::timetable::SpaTable;

/// Anchor dates for the DWP payment grids.
///
/// `base_date` is a verified real payment date for `base_ni` on the
/// 7/28/91-day grid; every other code is a fixed offset from it. The
/// fortnightly grid has its own pair of week anchors. A change to DWP's grid
/// means updating these dates and re-verifying the known payment dates in
/// the test suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Known payment date for `base_ni`.
    pub base_date: NaiveDate,
    /// The NI code whose payment date is `base_date`.
    pub base_ni: NiCode,
    /// Monday of fortnightly week 1 (even last digit).
    pub fortnight_week_1: NaiveDate,
    /// Monday of fortnightly week 2 (odd last digit).
    pub fortnight_week_2: NaiveDate,
}

impl GridConfig {
    /// The verified DWP anchors.
    ///
    /// - `00A` is paid on Monday 29 December 2025.
    /// - Fortnightly week 1 starts Monday 5 January 2026, week 2 Monday 12 January 2026.
    pub fn dwp() -> Self {
        Self {
            base_date: ymd(2025, 12, 29),
            base_ni: NiCode::new(0, 'A').expect("Valid NI code"),
            fortnight_week_1: ymd(2026, 1, 5),
            fortnight_week_2: ymd(2026, 1, 12),
        }
    }

    /// Checks every anchor is a Monday and the fortnightly anchors sit in
    /// alternate weeks.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, date) in [
            ("base_date", self.base_date),
            ("fortnight_week_1", self.fortnight_week_1),
            ("fortnight_week_2", self.fortnight_week_2),
        ] {
            if date.weekday() != Weekday::Mon {
                return Err(EngineError::InvalidConfiguration {
                    message: format!("{name} {date} is a {:?}, expected a Monday", date.weekday()),
                });
            }
        }

        let gap = (self.fortnight_week_2 - self.fortnight_week_1).num_days();
        if gap.rem_euclid(14) != 7 {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "fortnightly anchors {} and {} must be in alternate weeks",
                    self.fortnight_week_1, self.fortnight_week_2
                ),
            });
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::dwp()
    }
}

/// Builds a date that is known to be valid at compile time.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Valid calendar date")
}

/// State Pension age timetable file structure (`spa_timetable.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct SpaTimetableFile {
    /// Where the timetable was published.
    pub source: String,
    /// Rules ordered by date of birth.
    pub rules: Vec<SpaRule>,
}

/// A bundled holiday file (`holidays/*.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayFile {
    /// The division the holidays apply to (e.g. "england-and-wales").
    pub division: String,
    /// Map of date to holiday name.
    pub holidays: HolidayMap,
}

/// The complete engine configuration.
///
/// This struct aggregates the grid anchors, the State Pension age timetable
/// and any bundled holidays.
#[derive(Debug, Clone, Default)]
pub struct DwpConfig {
    grid: GridConfig,
    spa_table: SpaTable,
    holidays: HolidayMap,
    divisions: Vec<String>,
}

impl DwpConfig {
    /// Creates a new DwpConfig from its component parts.
    pub fn new(grid: GridConfig, spa_table: SpaTable, holiday_files: Vec<HolidayFile>) -> Self {
        let mut sorted = holiday_files;
        sorted.sort_by(|a, b| a.division.cmp(&b.division));

        let mut holidays = HolidayMap::new();
        for file in &sorted {
            holidays.extend_from(&file.holidays);
        }

        Self {
            grid,
            spa_table,
            holidays,
            divisions: sorted.into_iter().map(|f| f.division).collect(),
        }
    }

    /// Returns the grid anchors.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Returns the State Pension age timetable.
    pub fn spa_table(&self) -> &SpaTable {
        &self.spa_table
    }

    /// Returns all bundled holidays merged into one map.
    pub fn holidays(&self) -> &HolidayMap {
        &self.holidays
    }

    /// Returns the divisions holidays were loaded for, sorted.
    pub fn divisions(&self) -> &[String] {
        &self.divisions
    }
}
