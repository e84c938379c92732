//! Holiday map model.
//!
//! This module contains the [`HolidayMap`] type, the caller-supplied set of
//! non-working dates consulted when moving payments off holidays. The engine
//! never fetches holiday data itself; callers build a map from whatever
//! source they have, for example a GOV.UK `bank-holidays.json` body they
//! already downloaded.

use std::collections::BTreeMap;
use std::collections::btree_map;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Bank-holiday divisions published by GOV.UK.
pub const GOV_UK_DIVISIONS: [&str; 3] = ["england-and-wales", "scotland", "northern-ireland"];

/// A map of calendar date to holiday name.
///
/// Keys are unique dates; iteration is in date order. Serializes as an
/// object keyed by ISO `YYYY-MM-DD` strings.
///
/// # Example
///
/// ```
/// use pension_engine::models::HolidayMap;
/// use chrono::NaiveDate;
///
/// let mut holidays = HolidayMap::new();
/// holidays.insert(NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(), "Christmas Day");
///
/// assert!(holidays.is_holiday(NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()));
/// assert_eq!(
///     holidays.name(NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()),
///     Some("Christmas Day")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayMap {
    entries: BTreeMap<NaiveDate, String>,
}

impl HolidayMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday, replacing any name already recorded for `date`.
    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) -> Option<String> {
        self.entries.insert(date, name.into())
    }

    /// Returns the holiday name for `date`, if it is a holiday.
    pub fn name(&self, date: NaiveDate) -> Option<&str> {
        self.entries.get(&date).map(String::as_str)
    }

    /// Checks whether `date` is a holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    /// Number of holidays in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates holidays in date order.
    pub fn iter(&self) -> btree_map::Iter<'_, NaiveDate, String> {
        self.entries.iter()
    }

    /// Merges `other` into this map. Entries from `other` win on duplicate dates.
    pub fn extend_from(&mut self, other: &HolidayMap) {
        self.entries
            .extend(other.entries.iter().map(|(date, name)| (*date, name.clone())));
    }

    /// Builds a map from the body of `https://www.gov.uk/bank-holidays.json`.
    ///
    /// Only events for the requested `division` are taken (e.g.
    /// `"england-and-wales"`). The document must already have been fetched.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the body is not valid GOV.UK JSON or the
    /// division is absent.
    ///
    /// # Example
    ///
    /// ```
    /// use pension_engine::models::HolidayMap;
    /// use chrono::NaiveDate;
    ///
    /// let body = r#"{
    ///     "england-and-wales": {
    ///         "division": "england-and-wales",
    ///         "events": [
    ///             {"title": "Good Friday", "date": "2026-04-03", "notes": "", "bunting": false}
    ///         ]
    ///     }
    /// }"#;
    ///
    /// let holidays = HolidayMap::from_gov_uk_json(body, "england-and-wales").unwrap();
    /// assert_eq!(holidays.name(NaiveDate::from_ymd_opt(2026, 4, 3).unwrap()), Some("Good Friday"));
    /// ```
    pub fn from_gov_uk_json(body: &str, division: &str) -> EngineResult<Self> {
        let mut response: BTreeMap<String, GovUkDivision> = serde_json::from_str(body)
            .map_err(|e| EngineError::malformed("bank_holidays", division, e.to_string()))?;

        let events = response
            .remove(division)
            .ok_or_else(|| {
                EngineError::malformed(
                    "bank_holidays",
                    division,
                    format!("division not present; expected one of {}", GOV_UK_DIVISIONS.join(", ")),
                )
            })?
            .events;

        Ok(events
            .into_iter()
            .map(|event| (event.date, event.title))
            .collect())
    }
}

impl FromIterator<(NaiveDate, String)> for HolidayMap {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HolidayMap {
    type Item = (&'a NaiveDate, &'a String);
    type IntoIter = btree_map::Iter<'a, NaiveDate, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One division of the GOV.UK bank-holidays response.
#[derive(Debug, Deserialize)]
struct GovUkDivision {
    events: Vec<GovUkEvent>,
}

/// One bank holiday in the GOV.UK response. `notes` and `bunting` are ignored.
#[derive(Debug, Deserialize)]
struct GovUkEvent {
    title: String,
    date: NaiveDate,
}
