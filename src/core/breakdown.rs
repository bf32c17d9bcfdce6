use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::projection::pending;
use crate::domain::{DayOfMonth, RecurringItem};

/// Net cash flow for one day of the month together with the items due that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBalance<'a> {
    pub day: DayOfMonth,
    pub net_change: Decimal,
    pub items: Vec<&'a RecurringItem>,
}

/// Groups the pending items by day. Days without pending items are left out.
pub fn day_breakdown(items: &[RecurringItem], today: NaiveDate) -> Vec<DayBalance<'_>> {
    let mut days: Vec<DayBalance<'_>> = Vec::new();
    for item in pending(items, today) {
        match days.last_mut() {
            Some(current) if current.day == item.day_of_month => {
                current.net_change += item.signed_amount();
                current.items.push(item);
            }
            _ => days.push(DayBalance {
                day: item.day_of_month,
                net_change: item.signed_amount(),
                items: vec![item],
            }),
        }
    }
    days
}
