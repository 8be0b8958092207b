//! Persistence module
//!
//! Write-through storage of the whole store as one JSON blob in a durable
//! slot keyed by a fixed, versioned identifier.

mod error;
mod repository;
mod slot;

pub use error::PersistenceError;
pub use repository::{PersistedCustomer, PersistedProduct, PersistedStore, StoreRepository};
pub use slot::{FileSlot, MemorySlot, Slot};
