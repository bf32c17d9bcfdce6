//! Application-owned planner state with persistence injected as a port.
//!
//! Every mutation builds a new immutable [`Snapshot`], swaps it in, and then hands
//! the changed blob to storage. A failed save is logged; memory stays authoritative.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::core::breakdown::{day_breakdown, DayBalance};
use crate::core::projection::{pending, project, CalculationResult};
use crate::domain::{
    default_items, Inputs, InputsPatch, ItemDraft, ItemId, ItemPatch, RecurringItem,
};
use crate::errors::{PlannerError, Result};
use crate::storage::PlannerStorage;

/// Planner state at one point in time. Never mutated once published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub inputs: Inputs,
    pub items: Vec<RecurringItem>,
}

impl Snapshot {
    pub fn item(&self, id: &ItemId) -> Option<&RecurringItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn project(&self, today: NaiveDate) -> CalculationResult {
        project(&self.inputs, &self.items, today)
    }

    pub fn pending(&self, today: NaiveDate) -> Vec<&RecurringItem> {
        pending(&self.items, today)
    }

    pub fn day_breakdown(&self, today: NaiveDate) -> Vec<DayBalance<'_>> {
        day_breakdown(&self.items, today)
    }
}

/// Where the items held by a freshly opened store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Both blobs (or at least the items blob) were read from storage.
    Stored,
    /// No items blob existed; the seed list was installed and saved.
    Seeded,
    /// The items blob could not be read; the seed list is used in memory only.
    Recovered,
}

pub struct FinancialStore {
    state: Arc<Snapshot>,
    origin: LoadOrigin,
    storage: Box<dyn PlannerStorage>,
}

impl fmt::Debug for FinancialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinancialStore")
            .field("state", &self.state)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl FinancialStore {
    /// Loads both blobs. Never fails: unreadable data falls back to defaults.
    pub fn open(storage: Box<dyn PlannerStorage>) -> Self {
        let inputs = match storage.load_inputs() {
            Ok(Some(inputs)) => inputs,
            Ok(None) => Inputs::default(),
            Err(err) => {
                error!(error = %err, "failed to load inputs, using zeros");
                Inputs::default()
            }
        };

        let (items, origin) = match storage.load_items() {
            Ok(Some(items)) => (items, LoadOrigin::Stored),
            Ok(None) => {
                let items = default_items();
                if let Err(err) = storage.save_items(&items) {
                    error!(error = %err, "failed to save seeded recurring items");
                }
                (items, LoadOrigin::Seeded)
            }
            Err(err) => {
                error!(error = %err, "failed to load recurring items, using seed list in memory");
                (default_items(), LoadOrigin::Recovered)
            }
        };

        info!(
            items = items.len(),
            origin = ?origin,
            "financial store opened"
        );

        Self {
            state: Arc::new(Snapshot { inputs, items }),
            origin,
            storage,
        }
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    /// Cheap handle on the current state; stays valid across later mutations.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state)
    }

    pub fn inputs(&self) -> &Inputs {
        &self.state.inputs
    }

    pub fn items(&self) -> &[RecurringItem] {
        &self.state.items
    }

    pub fn item(&self, id: &ItemId) -> Option<&RecurringItem> {
        self.state.item(id)
    }

    /// Merges the patch into the inputs. Out-of-range values leave the state untouched.
    pub fn update_inputs(&mut self, patch: InputsPatch) -> Result<Arc<Snapshot>> {
        let inputs = patch.apply(&self.state.inputs)?;
        self.publish(Snapshot {
            inputs,
            items: self.state.items.clone(),
        });
        self.persist_inputs();
        Ok(self.snapshot())
    }

    /// Validates the draft, assigns a fresh id, and appends the item.
    pub fn add_item(&mut self, draft: ItemDraft) -> Result<ItemId> {
        let item = draft.into_item(ItemId::generate())?;
        let id = item.id.clone();
        let mut items = self.state.items.clone();
        items.push(item);
        self.replace_items(items);
        info!(id = %id, "recurring item added");
        Ok(id)
    }

    pub fn update_item(&mut self, id: &ItemId, patch: ItemPatch) -> Result<Arc<Snapshot>> {
        let index = self.index_of(id)?;
        let updated = patch.apply(&self.state.items[index])?;
        let mut items = self.state.items.clone();
        items[index] = updated;
        self.replace_items(items);
        Ok(self.snapshot())
    }

    pub fn set_item_active(&mut self, id: &ItemId, active: bool) -> Result<Arc<Snapshot>> {
        self.update_item(
            id,
            ItemPatch {
                active: Some(active),
                ..ItemPatch::default()
            },
        )
    }

    pub fn toggle_item(&mut self, id: &ItemId) -> Result<Arc<Snapshot>> {
        let active = self.state.items[self.index_of(id)?].active;
        self.set_item_active(id, !active)
    }

    pub fn delete_item(&mut self, id: &ItemId) -> Result<RecurringItem> {
        let index = self.index_of(id)?;
        let mut items = self.state.items.clone();
        let removed = items.remove(index);
        self.replace_items(items);
        info!(id = %id, "recurring item deleted");
        Ok(removed)
    }

    /// Replaces all items with the seed list. Inputs are kept.
    pub fn reset_to_default(&mut self) -> Arc<Snapshot> {
        warn!("resetting recurring items to the default list");
        self.replace_items(default_items());
        self.snapshot()
    }

    /// Writes both blobs and reports the first failure. Call before shutting down.
    pub fn flush(&self) -> Result<()> {
        self.storage.save_inputs(&self.state.inputs)?;
        self.storage.save_items(&self.state.items)?;
        Ok(())
    }

    fn index_of(&self, id: &ItemId) -> Result<usize> {
        self.state
            .items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| PlannerError::ItemNotFound(id.to_string()))
    }

    fn replace_items(&mut self, items: Vec<RecurringItem>) {
        self.publish(Snapshot {
            inputs: self.state.inputs,
            items,
        });
        self.persist_items();
    }

    fn publish(&mut self, snapshot: Snapshot) {
        self.state = Arc::new(snapshot);
    }

    fn persist_inputs(&self) {
        if let Err(err) = self.storage.save_inputs(&self.state.inputs) {
            error!(error = %err, "failed to save inputs, keeping in-memory state");
        }
    }

    fn persist_items(&self) {
        if let Err(err) = self.storage.save_items(&self.state.items) {
            error!(error = %err, "failed to save recurring items, keeping in-memory state");
        }
    }
}
