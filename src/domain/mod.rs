//! Domain module
//!
//! Core record types and business rules of the store.

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;

pub use catalog::{Customer, CustomerChanges, Product, ProductChanges};
pub use error::DomainError;
pub use ledger::{new_id, Sale, SaleLine, Transaction, TransactionKind};
pub use money::{MoneyError, Price};
