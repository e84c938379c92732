//! State Pension age timetable.
//!
//! This module provides the [`SpaTable`] type: an ordered, validated list of
//! [`SpaRule`]s covering every date of birth, and the built-in GOV.UK
//! timetable.

use chrono::{Days, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::SpaRule;

use super::types::ymd;

/// First date of birth covered by the built-in timetable.
pub const TIMETABLE_OPEN_START: (i32, u32, u32) = (1, 1, 1);

/// Sentinel end date for the final, open-ended timetable rule.
pub const TIMETABLE_OPEN_END: (i32, u32, u32) = (9999, 12, 31);

/// Publication the built-in timetable is taken from.
pub const GOV_UK_TIMETABLE_SOURCE: &str =
    "https://www.gov.uk/government/publications/state-pension-age-timetable/state-pension-age-timetable";

/// An ordered State Pension age timetable.
///
/// Rules are contiguous and non-overlapping, so every date of birth from the
/// first rule's start onwards matches exactly one rule. The last rule ends on
/// the `9999-12-31` sentinel.
///
/// # Example
///
/// ```
/// use pension_engine::config::SpaTable;
/// use chrono::NaiveDate;
///
/// let table = SpaTable::default();
/// let rule = table.find(NaiveDate::from_ymd_opt(1960, 4, 6).unwrap()).unwrap();
/// assert_eq!(rule.start(), NaiveDate::from_ymd_opt(1960, 4, 6).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaTable {
    rules: Vec<SpaRule>,
}

impl SpaTable {
    /// Validates and wraps a list of rules.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the list is empty, a rule ends before
    /// it starts, an offset has 12 or more months, consecutive rules leave a
    /// gap or overlap, or the last rule is not open-ended.
    pub fn new(rules: Vec<SpaRule>) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidConfiguration { message };

        let last = rules
            .last()
            .ok_or_else(|| invalid("State Pension age timetable has no rules".to_string()))?;

        let open_end = ymd(TIMETABLE_OPEN_END.0, TIMETABLE_OPEN_END.1, TIMETABLE_OPEN_END.2);
        if last.end() != open_end {
            return Err(invalid(format!(
                "last timetable rule must end on {open_end}, found {}",
                last.end()
            )));
        }

        for rule in &rules {
            if rule.start() > rule.end() {
                return Err(invalid(format!(
                    "timetable rule {}..{} ends before it starts",
                    rule.start(),
                    rule.end()
                )));
            }
            if let SpaRule::Offset { months, .. } = rule {
                if *months >= 12 {
                    return Err(invalid(format!(
                        "timetable rule starting {} has {months} months; use years instead",
                        rule.start()
                    )));
                }
            }
        }

        for pair in rules.windows(2) {
            let expected = pair[0].end().checked_add_days(Days::new(1));
            if expected != Some(pair[1].start()) {
                return Err(invalid(format!(
                    "timetable rules {}..{} and {}..{} are not contiguous",
                    pair[0].start(),
                    pair[0].end(),
                    pair[1].start(),
                    pair[1].end()
                )));
            }
        }

        Ok(Self { rules })
    }

    /// The rules in date-of-birth order.
    pub fn rules(&self) -> &[SpaRule] {
        &self.rules
    }

    /// First rule whose range contains `dob`.
    pub fn find(&self, dob: NaiveDate) -> Option<&SpaRule> {
        self.rules.iter().find(|rule| rule.contains(dob))
    }

    /// The GOV.UK State Pension age timetable.
    ///
    /// 65th birthday up to 5 December 1953, the 65→66 fixed-date tables, the
    /// 66th birthday, the 66→67 monthly offsets, the 67th birthday, the 67→68
    /// fixed-date tables, then the 68th birthday.
    pub fn gov_uk() -> Self {
        let mut rules = vec![birthday(TIMETABLE_OPEN_START, (1953, 12, 5), 65)];

        // 65 to 66: two SPA months per birth month
        rules.extend(monthly_fixed((1953, 12), (2019, 3), 10));
        rules.push(birthday((1954, 10, 6), (1960, 4, 5), 66));

        // 66 to 67: one extra month per birth month
        for months in 1..=11u32 {
            let (year, month) = add_months((1960, 4), months - 1);
            let (end_year, end_month) = add_months((year, month), 1);
            rules.push(SpaRule::Offset {
                start: ymd(year, month, 6),
                end: ymd(end_year, end_month, 5),
                years: 66,
                months,
            });
        }
        rules.push(birthday((1961, 3, 6), (1977, 4, 5), 67));

        // 67 to 68
        rules.extend(monthly_fixed((1977, 4), (2044, 5), 12));
        rules.push(birthday((1978, 4, 6), TIMETABLE_OPEN_END, 68));

        Self { rules }
    }
}

impl Default for SpaTable {
    fn default() -> Self {
        Self::gov_uk()
    }
}

fn birthday(start: (i32, u32, u32), end: (i32, u32, u32), years: u32) -> SpaRule {
    SpaRule::Birthday {
        start: ymd(start.0, start.1, start.2),
        end: ymd(end.0, end.1, end.2),
        years,
    }
}

/// Birth months running 6th to 5th, each mapped to an SPA date on the 6th
/// that advances two months per row.
fn monthly_fixed(first_birth: (i32, u32), first_spa: (i32, u32), count: u32) -> Vec<SpaRule> {
    (0..count)
        .map(|i| {
            let (year, month) = add_months(first_birth, i);
            let (end_year, end_month) = add_months((year, month), 1);
            let (spa_year, spa_month) = add_months(first_spa, i * 2);
            SpaRule::Fixed {
                start: ymd(year, month, 6),
                end: ymd(end_year, end_month, 5),
                spa_date: ymd(spa_year, spa_month, 6),
            }
        })
        .collect()
}

fn add_months((year, month): (i32, u32), months: u32) -> (i32, u32) {
    let zero_based = month - 1 + months;
    (year + (zero_based / 12) as i32, zero_based % 12 + 1)
}
