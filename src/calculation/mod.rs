//! Calculation logic for the pension engine.
//!
//! This module contains the payment grid anchor resolution, non-working day
//! adjustment, payment schedule generation and State Pension age resolution.

mod adjustment;
mod anchor;
mod pension_age;
mod schedule;

pub use adjustment::{Adjustment, DayKind, adjust_for_non_working_days, classify_day};
pub use anchor::{
    first_due_on_or_after, fortnightly_anchor, ni_offset_days, normal_payment_day, resolve_anchor,
};
pub use pension_age::{calculate_state_pension_age, calculate_state_pension_age_with};
pub use schedule::{MAX_YEAR_SPAN, generate_payments, generate_schedule};
