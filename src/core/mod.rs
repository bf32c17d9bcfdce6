pub mod breakdown;
pub mod projection;
pub mod store;
pub mod time;
pub mod utils;

pub use breakdown::{day_breakdown, DayBalance};
pub use projection::{is_pending, pending, project, CalculationResult};
pub use store::{FinancialStore, LoadOrigin, Snapshot};
pub use time::{resolve_today, Clock, FixedClock, SystemClock};
