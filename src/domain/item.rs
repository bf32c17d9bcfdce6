use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::{PlannerError, Result};

/// Opaque, stable identifier of a recurring item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Returns a fresh identifier that has never been handed out before.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Direction of a recurring cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Income,
    Expense,
}

impl ItemKind {
    /// Applies the direction to a non-negative magnitude.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            ItemKind::Income => amount,
            ItemKind::Expense => -amount,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Income => "income",
            ItemKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for ItemKind {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "income" | "einnahme" => Ok(ItemKind::Income),
            "expense" | "ausgabe" => Ok(ItemKind::Expense),
            other => Err(PlannerError::InvalidInput(format!(
                "unknown item type `{other}` (expected income or expense)"
            ))),
        }
    }
}

/// A named cash flow that repeats every month on a fixed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringItem {
    pub id: ItemId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub day_of_month: DayOfMonth,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub active: bool,
}

impl RecurringItem {
    /// Amount with the item's direction applied: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.kind == ItemKind::Income
    }
}

impl NamedEntity for RecurringItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for RecurringItem {
    fn display_label(&self) -> String {
        format!("{} ({}, {} des Monats)", self.name, self.kind, self.day_of_month)
    }
}

/// User-entered values for a new recurring item, validated before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub amount: Decimal,
    pub day_of_month: u32,
    pub kind: ItemKind,
    pub active: bool,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, amount: Decimal, day_of_month: u32, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            amount,
            day_of_month,
            kind,
            active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Validates the draft and turns it into a stored item with the given id.
    pub fn into_item(self, id: ItemId) -> Result<RecurringItem> {
        Ok(RecurringItem {
            id,
            name: validate_name(&self.name)?,
            amount: validate_amount(self.amount)?,
            day_of_month: DayOfMonth::new(self.day_of_month)?,
            kind: self.kind,
            active: self.active,
        })
    }
}

/// Partial update for an existing item; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub day_of_month: Option<u32>,
    pub kind: Option<ItemKind>,
    pub active: Option<bool>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Produces the updated item. The id is never touched.
    pub fn apply(&self, item: &RecurringItem) -> Result<RecurringItem> {
        let mut updated = item.clone();
        if let Some(name) = &self.name {
            updated.name = validate_name(name)?;
        }
        if let Some(amount) = self.amount {
            updated.amount = validate_amount(amount)?;
        }
        if let Some(day) = self.day_of_month {
            updated.day_of_month = DayOfMonth::new(day)?;
        }
        if let Some(kind) = self.kind {
            updated.kind = kind;
        }
        if let Some(active) = self.active {
            updated.active = active;
        }
        Ok(updated)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::Validation("name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(PlannerError::Validation(format!(
            "amount must be greater than 0, got {amount}"
        )));
    }
    check_amount_limit("amount", amount)
}
