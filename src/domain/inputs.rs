use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::common::check_amount_limit;
use crate::errors::Result;

/// Snapshot of the user's liquid funds. Values may be negative (overdrawn account).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    /// Account balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub kontostand: Decimal,
    /// Cash on hand.
    #[serde(with = "rust_decimal::serde::float")]
    pub bargeld: Decimal,
    /// One-time income still expected this month.
    #[serde(with = "rust_decimal::serde::float")]
    pub bekomme: Decimal,
}

impl Inputs {
    pub fn new(kontostand: Decimal, bargeld: Decimal, bekomme: Decimal) -> Self {
        Self {
            kontostand,
            bargeld,
            bekomme,
        }
    }

    /// Funds available right now: balance, cash, and the expected one-time income.
    /// Saturates at `Decimal`'s bounds instead of overflowing.
    pub fn sofort_verfuegbar(&self) -> Decimal {
        self.kontostand
            .saturating_add(self.bargeld)
            .saturating_add(self.bekomme)
    }
}

/// Partial update for [`Inputs`]; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputsPatch {
    pub kontostand: Option<Decimal>,
    pub bargeld: Option<Decimal>,
    pub bekomme: Option<Decimal>,
}

impl InputsPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merges the patch. Values beyond [`MAX_AMOUNT`](crate::domain::MAX_AMOUNT) are rejected.
    pub fn apply(&self, inputs: &Inputs) -> Result<Inputs> {
        let field = |name: &str, value: Option<Decimal>, current: Decimal| match value {
            Some(value) => check_amount_limit(name, value),
            None => Ok(current),
        };
        Ok(Inputs {
            kontostand: field("kontostand", self.kontostand, inputs.kontostand)?,
            bargeld: field("bargeld", self.bargeld, inputs.bargeld)?,
            bekomme: field("bekomme", self.bekomme, inputs.bekomme)?,
        })
    }
}
