//! Record store for patients, bots, calls and their audit trail.
//!
//! Everything above this crate talks to [`RecordStore`]; [`MemoryStore`] is
//! the only backend shipped today.

pub mod memory;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use store::{RecordStore, StoreError, StoreResult};
