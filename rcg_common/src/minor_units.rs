use std::fmt::Display;

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

/// The number of minor units (paise, cents) in one major currency unit.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

//--------------------------------------     MinorUnits       ---------------------------------------------------------
/// An amount of money in the smallest unit of its currency, e.g. paise for INR. This is the unit the provider
/// works in, and the unit stored in the database.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct MinorUnits(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinorUnitsConversionError {
    #[error("Amount must be positive, but was {0}")]
    NotPositive(i64),
    #[error("Amount {0} is too large to be represented in minor units")]
    Overflow(i64),
}

impl From<i64> for MinorUnits {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for MinorUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let major = (self.0 / MINOR_UNITS_PER_MAJOR).abs();
        let minor = (self.0 % MINOR_UNITS_PER_MAJOR).abs();
        write!(f, "{sign}{major}.{minor:02}")
    }
}

impl MinorUnits {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Converts a whole number of major units (rupees, dollars) into minor units. Zero, negative and overflowing
    /// amounts are rejected.
    pub fn try_from_major(major: i64) -> Result<Self, MinorUnitsConversionError> {
        if major <= 0 {
            return Err(MinorUnitsConversionError::NotPositive(major));
        }
        major.checked_mul(MINOR_UNITS_PER_MAJOR).map(Self).ok_or(MinorUnitsConversionError::Overflow(major))
    }
}
