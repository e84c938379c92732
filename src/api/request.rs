//! Request types for the pension engine API.
//!
//! This module defines the JSON request bodies for the `/payments` and
//! `/state-pension-age` endpoints. Field names are camelCase.

use serde::{Deserialize, Serialize};

use crate::models::{CycleLength, HolidayMap};

/// Request body for the `/payments` endpoint.
///
/// `niCode` and `cycleDays` are kept raw so the engine, not the JSON layer,
/// reports a malformed code or unsupported cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsRequest {
    /// NI code suffix, e.g. `"29B"`.
    pub ni_code: String,
    /// First calendar year to include.
    pub start_year: i32,
    /// Last calendar year to include.
    pub end_year: i32,
    /// Days between payments. Defaults to 28.
    #[serde(default = "default_cycle_days")]
    pub cycle_days: u32,
    /// Holidays to move payments off. The bundled holidays are used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_map: Option<HolidayMap>,
}

fn default_cycle_days() -> u32 {
    CycleLength::default().days()
}

/// Request body for the `/state-pension-age` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaRequest {
    /// Date of birth as `YYYY-MM-DD`.
    pub dob: String,
}
