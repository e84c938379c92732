//! NI code suffix model.
//!
//! This module contains the [`NiCode`] type: the two-digit plus letter suffix
//! that positions a claimant on the DWP payment-day grid. It is not a full
//! National Insurance number and is never checked against any registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// Number of consecutive digit values that share one payment weekday.
pub const DIGITS_PER_ROW: u8 = 20;

/// The suffix letters that appear on the payment grid, in column order.
pub const NI_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// An NI code suffix such as `29B`.
///
/// The digit component selects a weekday row (00–19 Monday … 80–99 Friday);
/// the letter selects a week column on the four-weekly grid.
///
/// Parsing is case-insensitive and the value is normalized to uppercase.
///
/// # Example
///
/// ```
/// use pension_engine::models::NiCode;
///
/// let code: NiCode = "29b".parse().unwrap();
/// assert_eq!(code.digits(), 29);
/// assert_eq!(code.letter(), 'B');
/// assert_eq!(code.row(), 1);
/// assert_eq!(code.to_string(), "29B");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NiCode {
    digits: u8,
    letter_index: u8,
}

impl NiCode {
    /// Builds a code from its parts.
    ///
    /// Returns `MalformedInput` if `digits > 99` or `letter` is not A–D
    /// (lowercase is accepted).
    pub fn new(digits: u8, letter: char) -> EngineResult<Self> {
        let upper = letter.to_ascii_uppercase();
        let letter_index = NI_LETTERS
            .iter()
            .position(|&l| l == upper)
            .ok_or_else(|| {
                EngineError::malformed("ni_code", format!("{digits:02}{letter}"), "letter must be A, B, C or D")
            })?;

        if digits > 99 {
            return Err(EngineError::malformed(
                "ni_code",
                format!("{digits}{letter}"),
                "digits must be between 00 and 99",
            ));
        }

        Ok(Self {
            digits,
            letter_index: letter_index as u8,
        })
    }

    /// The two-digit numeric component (0–99).
    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// The suffix letter, always uppercase.
    pub fn letter(&self) -> char {
        NI_LETTERS[self.letter_index as usize]
    }

    /// Ordinal offset of the letter from 'A' (0–3).
    pub fn letter_index(&self) -> u8 {
        self.letter_index
    }

    /// Weekday row for this code, 0 (Monday) to 4 (Friday).
    pub fn row(&self) -> u8 {
        row_from_digits(self.digits)
    }

    /// Last digit of the numeric component.
    pub fn last_digit(&self) -> u8 {
        self.digits % 10
    }
}

/// Maps an NI digit value to its weekday row.
///
/// 00–19 → 0, 20–39 → 1, 40–59 → 2, 60–79 → 3, 80–99 → 4.
/// Values above 99 saturate at row 4.
///
/// # Example
///
/// ```
/// use pension_engine::models::row_from_digits;
///
/// assert_eq!(row_from_digits(0), 0);
/// assert_eq!(row_from_digits(19), 0);
/// assert_eq!(row_from_digits(20), 1);
/// assert_eq!(row_from_digits(99), 4);
/// ```
pub fn row_from_digits(digits: u8) -> u8 {
    (digits / DIGITS_PER_ROW).min(4)
}

impl FromStr for NiCode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            EngineError::malformed(
                "ni_code",
                s,
                "expected two digits followed by A, B, C or D (e.g. 29B)",
            )
        };

        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
            return Err(malformed());
        }

        let digits = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let letter = bytes[2] as char;
        if !NI_LETTERS.contains(&letter.to_ascii_uppercase()) {
            return Err(malformed());
        }

        Self::new(digits, letter)
    }
}

impl fmt::Display for NiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}", self.digits, self.letter())
    }
}

impl Serialize for NiCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NiCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
