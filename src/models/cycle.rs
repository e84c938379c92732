//! Payment cycle lengths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The interval between scheduled State Pension payments.
///
/// Only the four intervals DWP pays on are representable; any other day
/// count is rejected with `InvalidConfiguration`.
///
/// # Example
///
/// ```
/// use pension_engine::models::CycleLength;
///
/// let cycle = CycleLength::try_from(28).unwrap();
/// assert_eq!(cycle, CycleLength::FourWeekly);
/// assert_eq!(cycle.days(), 28);
/// assert!(CycleLength::try_from(30).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CycleLength {
    /// Every 7 days.
    Weekly,
    /// Every 14 days, on the fortnightly grid.
    Fortnightly,
    /// Every 28 days. The usual State Pension cycle.
    #[default]
    FourWeekly,
    /// Every 91 days.
    ThirteenWeekly,
}

impl CycleLength {
    /// All supported cycles, shortest first.
    pub const ALL: [CycleLength; 4] = [
        CycleLength::Weekly,
        CycleLength::Fortnightly,
        CycleLength::FourWeekly,
        CycleLength::ThirteenWeekly,
    ];

    /// Number of days between payments.
    pub fn days(self) -> u32 {
        match self {
            CycleLength::Weekly => 7,
            CycleLength::Fortnightly => 14,
            CycleLength::FourWeekly => 28,
            CycleLength::ThirteenWeekly => 91,
        }
    }

    /// Whether this cycle uses the fortnightly week-1/week-2 anchors.
    pub fn is_fortnightly(self) -> bool {
        self == CycleLength::Fortnightly
    }
}

impl TryFrom<u32> for CycleLength {
    type Error = EngineError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(CycleLength::Weekly),
            14 => Ok(CycleLength::Fortnightly),
            28 => Ok(CycleLength::FourWeekly),
            91 => Ok(CycleLength::ThirteenWeekly),
            other => Err(EngineError::InvalidConfiguration {
                message: format!("cycle length {other} days is not one of 7, 14, 28, 91"),
            }),
        }
    }
}

impl From<CycleLength> for u32 {
    fn from(cycle: CycleLength) -> Self {
        cycle.days()
    }
}

impl fmt::Display for CycleLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.days())
    }
}
