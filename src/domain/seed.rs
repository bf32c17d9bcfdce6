//! Default recurring items used on first start and by "reset to default".

use rust_decimal::Decimal;

use super::item::{ItemId, ItemKind, RecurringItem};
use super::common::DayOfMonth;

/// (name, amount in cents, day of month, kind)
const SEED_ITEMS: &[(&str, i64, u8, ItemKind)] = &[
    ("Kindergeld", 25_500, 15, ItemKind::Income),
    ("DE-Ticket", 3_800, 4, ItemKind::Expense),
    ("AC+", 1_500, 11, ItemKind::Expense),
    ("Spotify", 1_500, 28, ItemKind::Expense),
    ("iCloud", 600, 12, ItemKind::Expense),
    ("Telekom Fest.", 2_250, 4, ItemKind::Expense),
    ("Telekom Mobil", 2_000, 30, ItemKind::Expense),
    ("Miete", 55_000, 1, ItemKind::Expense),
    ("Strom", 1_750, 1, ItemKind::Expense),
    ("GEZ", 920, 1, ItemKind::Expense),
];

/// Builds the seed list with freshly generated ids. Every call yields new ids.
pub fn default_items() -> Vec<RecurringItem> {
    SEED_ITEMS
        .iter()
        .map(|&(name, cents, day, kind)| RecurringItem {
            id: ItemId::generate(),
            name: name.to_string(),
            amount: Decimal::new(cents, 2),
            day_of_month: DayOfMonth::clamped(day as i64),
            kind,
            active: true,
        })
        .collect()
}
