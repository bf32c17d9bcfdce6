//! Month-end projection: which recurring items are still pending and what they leave over.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Inputs, ItemKind, RecurringItem};

/// Derived totals for the rest of the current month. Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub sofort_verfuegbar: Decimal,
    pub remaining_income: Decimal,
    pub remaining_expense: Decimal,
    pub verfuegbar_bis_monatsende: Decimal,
}

/// Returns true when an active item is still due this month, inclusive of today.
///
/// The comparison is purely numeric: day 31 counts as pending on the 30th of a
/// 30-day month even though that date never occurs.
pub fn is_pending(item: &RecurringItem, today: NaiveDate) -> bool {
    item.active && item.day_of_month.get() >= today.day()
}

/// Selects the pending items, sorted by day of month. Items sharing a day keep their input order.
pub fn pending(items: &[RecurringItem], today: NaiveDate) -> Vec<&RecurringItem> {
    let mut selected: Vec<&RecurringItem> = items
        .iter()
        .filter(|item| is_pending(item, today))
        .collect();
    selected.sort_by_key(|item| item.day_of_month);
    selected
}

/// Projects the balance available until the end of the month containing `today`.
pub fn project(inputs: &Inputs, items: &[RecurringItem], today: NaiveDate) -> CalculationResult {
    let upcoming = pending(items, today);
    let remaining_income = sum_kind(&upcoming, ItemKind::Income);
    let remaining_expense = sum_kind(&upcoming, ItemKind::Expense);
    let sofort_verfuegbar = inputs.sofort_verfuegbar();

    CalculationResult {
        sofort_verfuegbar,
        remaining_income,
        remaining_expense,
        verfuegbar_bis_monatsende: sofort_verfuegbar
            .saturating_add(remaining_income)
            .saturating_sub(remaining_expense),
    }
}

// Saturating so that values outside the validated range cannot panic.
fn sum_kind(items: &[&RecurringItem], kind: ItemKind) -> Decimal {
    items
        .iter()
        .filter(|item| item.kind == kind)
        .fold(Decimal::ZERO, |total, item| total.saturating_add(item.amount))
}
