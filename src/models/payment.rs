//! Payment schedule result models.
//!
//! This module contains the [`Payment`] and [`PensionResult`] types produced by
//! the schedule engine. JSON field names follow the camelCase contract the
//! calendar front end consumes.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::NiCode;

/// One scheduled State Pension payment.
///
/// `due` is the date implied by the payment grid; `paid` is that date moved
/// back over any weekend or holiday. `holidays` lists the names of holidays
/// walked over, nearest to `due` first; it is empty when only weekend days
/// were skipped.
///
/// # Example
///
/// ```
/// use pension_engine::models::Payment;
/// use chrono::NaiveDate;
///
/// let payment = Payment {
///     due: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     paid: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
///     early: true,
///     holidays: vec!["New Year (substitute)".to_string()],
/// };
/// assert!(payment.is_holiday_affected());
/// assert_eq!(payment.days_early(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// The unadjusted grid date.
    pub due: NaiveDate,
    /// The date the payment is actually made.
    pub paid: NaiveDate,
    /// True when `paid` is earlier than `due`.
    pub early: bool,
    /// Holiday names encountered while moving the payment earlier.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holidays: Vec<String>,
}

impl Payment {
    /// Whether a holiday (rather than only a weekend) moved this payment.
    pub fn is_holiday_affected(&self) -> bool {
        !self.holidays.is_empty()
    }

    /// Number of days between `paid` and `due`.
    pub fn days_early(&self) -> i64 {
        (self.due - self.paid).num_days()
    }
}

/// A generated payment schedule for one NI code and cycle.
///
/// `normal_day` is the weekday the grid places this code on, before any
/// holiday adjustment. It is serialized as a full English weekday name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionResult {
    /// The normalized NI code the schedule was generated for.
    pub ni: NiCode,
    /// The weekday payments are normally made on.
    #[serde(with = "weekday_serde")]
    pub normal_day: Weekday,
    /// Days between consecutive payments.
    pub cycle_days: u32,
    /// Payments in ascending `due` order.
    pub payments: Vec<Payment>,
}

impl PensionResult {
    /// Payments that were moved earlier.
    pub fn early_payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.iter().filter(|p| p.early)
    }
}

/// Full English name of a weekday, e.g. `"Tuesday"`.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Serde adapter writing weekdays as full names.
mod weekday_serde {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::weekday_name(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // chrono accepts both "Tue" and "Tuesday"
        raw.parse::<Weekday>()
            .map_err(|_| serde::de::Error::custom(format!("unknown weekday '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn on_time_payment(date: &str) -> Payment {
        Payment {
            due: make_date(date),
            paid: make_date(date),
            early: false,
            holidays: vec![],
        }
    }

    #[test]
    fn test_payment_omits_empty_holidays() {
        let json = serde_json::to_value(on_time_payment("2026-01-06")).unwrap();
        assert_eq!(json["due"], "2026-01-06");
        assert_eq!(json["paid"], "2026-01-06");
        assert_eq!(json["early"], false);
        assert!(json.get("holidays").is_none());
    }

    #[test]
    fn test_payment_without_holidays_field_deserializes() {
        let payment: Payment =
            serde_json::from_str(r#"{"due":"2026-01-06","paid":"2026-01-06","early":false}"#)
                .unwrap();
        assert_eq!(payment, on_time_payment("2026-01-06"));
    }

    #[test]
    fn test_weekend_only_adjustment_is_not_holiday_affected() {
        let payment = Payment {
            due: make_date("2026-01-31"),
            paid: make_date("2026-01-30"),
            early: true,
            holidays: vec![],
        };
        assert!(!payment.is_holiday_affected());
        assert_eq!(payment.days_early(), 1);
    }

    #[test]
    fn test_pension_result_uses_contract_field_names() {
        let result = PensionResult {
            ni: "29B".parse().unwrap(),
            normal_day: Weekday::Tue,
            cycle_days: 28,
            payments: vec![on_time_payment("2026-01-06")],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ni"], "29B");
        assert_eq!(json["normalDay"], "Tuesday");
        assert_eq!(json["cycleDays"], 28);
        assert_eq!(json["payments"].as_array().unwrap().len(), 1);

        let back: PensionResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_early_payments_filter() {
        let mut moved = on_time_payment("2026-04-03");
        moved.paid = make_date("2026-04-02");
        moved.early = true;
        moved.holidays = vec!["Good Friday".to_string()];

        let result = PensionResult {
            ni: "84D".parse().unwrap(),
            normal_day: Weekday::Fri,
            cycle_days: 28,
            payments: vec![on_time_payment("2026-03-06"), moved.clone()],
        };

        let early: Vec<&Payment> = result.early_payments().collect();
        assert_eq!(early, vec![&moved]);
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(weekday_name(Weekday::Fri), "Friday");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }
}
