//! Plain data types: recurring items, liquid-funds inputs, and the seed list.
//! No I/O and no clock access.

pub mod common;
pub mod inputs;
pub mod item;
pub mod seed;

pub use common::{
    check_amount_limit, within_amount_limit, DayOfMonth, Displayable, NamedEntity, MAX_AMOUNT,
};
pub use inputs::{Inputs, InputsPatch};
pub use item::{ItemDraft, ItemId, ItemKind, ItemPatch, RecurringItem};
pub use seed::default_items;
