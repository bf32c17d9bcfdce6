pub mod json_backend;
pub mod memory;
pub mod records;

use crate::domain::{Inputs, RecurringItem};
use crate::errors::Result;

/// Fixed key of the inputs blob.
pub const INPUTS_KEY: &str = "financial_planner_inputs";
/// Fixed key of the recurring items blob.
pub const ITEMS_KEY: &str = "financial_planner_items";

/// Persistence port used by the store. Backends only move opaque JSON blobs around;
/// decoding and normalization live in [`records`].
pub trait PlannerStorage: Send + Sync {
    /// Returns `Ok(None)` when no blob has been stored under `key` yet.
    fn read_blob(&self, key: &str) -> Result<Option<String>>;
    fn write_blob(&self, key: &str, data: &str) -> Result<()>;

    fn load_inputs(&self) -> Result<Option<Inputs>> {
        self.read_blob(INPUTS_KEY)?
            .map(|data| records::decode_inputs(&data))
            .transpose()
    }

    fn load_items(&self) -> Result<Option<Vec<RecurringItem>>> {
        self.read_blob(ITEMS_KEY)?
            .map(|data| records::decode_items(&data))
            .transpose()
    }

    fn save_inputs(&self, inputs: &Inputs) -> Result<()> {
        self.write_blob(INPUTS_KEY, &records::encode_inputs(inputs)?)
    }

    fn save_items(&self, items: &[RecurringItem]) -> Result<()> {
        self.write_blob(ITEMS_KEY, &records::encode_items(items)?)
    }
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
