//! Configuration loading and management for the pension engine.
//!
//! This module provides functionality to load the DWP grid anchors, the
//! State Pension age timetable and bundled holiday lists from YAML files, and
//! compiled-in defaults for all of them except holidays.
//!
//! # Example
//!
//! ```no_run
//! use pension_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/dwp").unwrap();
//! println!("Timetable rules: {}", config.spa_table().rules().len());
//! ```

mod loader;
mod timetable;
mod types;

pub use loader::ConfigLoader;
pub use timetable::{GOV_UK_TIMETABLE_SOURCE, SpaTable, TIMETABLE_OPEN_END, TIMETABLE_OPEN_START};
pub use types::{DwpConfig, GridConfig, HolidayFile, SpaTimetableFile};
