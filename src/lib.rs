//! State Pension payment calendar engine
//!
//! This crate reconstructs the DWP State Pension payment schedule for a
//! National Insurance code suffix, moving payments off weekends and bank
//! holidays, and calculates State Pension age from a date of birth.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
