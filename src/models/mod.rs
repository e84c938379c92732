//! Core data models for the pension engine.
//!
//! This module contains all the domain models used throughout the engine.

mod cycle;
mod holiday;
mod ni_code;
mod payment;
mod state_pension_age;

pub use cycle::CycleLength;
pub use holiday::{GOV_UK_DIVISIONS, HolidayMap};
pub use ni_code::{DIGITS_PER_ROW, NI_LETTERS, NiCode, row_from_digits};
pub use payment::{Payment, PensionResult, weekday_name};
pub use state_pension_age::{SpaResult, SpaRule, SpaSource};
