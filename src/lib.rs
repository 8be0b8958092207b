//! Wings POS Library
//!
//! Point-of-sale and inventory store: catalog, customers, sales history and
//! stock movements, persisted write-through to a single durable slot and
//! reconciled against a seed catalog at start-up.

pub mod config;
pub mod domain;
pub mod persistence;
pub mod projection;
pub mod reconcile;
pub mod seed;
pub mod store;

mod error;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorResponse};
pub use domain::{Customer, DomainError, Price, Product, Sale, SaleLine, Transaction, TransactionKind};
pub use persistence::{FileSlot, MemorySlot, Slot};
pub use projection::SalesPeriod;
pub use seed::SeedCatalog;
pub use store::Store;
