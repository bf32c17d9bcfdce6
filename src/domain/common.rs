//! Shared traits and the calendar day newtype used by recurring items.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::PlannerError;

/// Largest magnitude accepted for any money value (10^15). Sums of bounded values
/// stay far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

pub fn within_amount_limit(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Rejects values whose magnitude exceeds [`MAX_AMOUNT`].
pub fn check_amount_limit(field: &str, amount: Decimal) -> Result<Decimal, PlannerError> {
    if within_amount_limit(amount) {
        Ok(amount)
    } else {
        Err(PlannerError::Validation(format!(
            "{field} must not exceed {MAX_AMOUNT} in magnitude, got {amount}"
        )))
    }
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Calendar day (1–31) on which a recurring item falls due every month.
///
/// The value is never clamped to the length of a concrete month: day 31 stays
/// day 31 even in February, and comparisons against "today" are numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayOfMonth(u8);

impl DayOfMonth {
    pub const FIRST: u32 = 1;
    pub const LAST: u32 = 31;

    pub fn new(day: u32) -> Result<Self, PlannerError> {
        if (Self::FIRST..=Self::LAST).contains(&day) {
            Ok(Self(day as u8))
        } else {
            Err(PlannerError::Validation(format!(
                "day of month must be between {} and {}, got {}",
                Self::FIRST,
                Self::LAST,
                day
            )))
        }
    }

    /// Pulls any integer into the valid range. Used when repairing stored records.
    pub fn clamped(day: i64) -> Self {
        Self(day.clamp(Self::FIRST as i64, Self::LAST as i64) as u8)
    }

    pub fn get(self) -> u32 {
        self.0 as u32
    }
}

impl TryFrom<u32> for DayOfMonth {
    type Error = PlannerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayOfMonth> for u32 {
    fn from(day: DayOfMonth) -> Self {
        day.get()
    }
}

impl fmt::Display for DayOfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.", self.0)
    }
}
