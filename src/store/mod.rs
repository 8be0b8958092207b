//! Store module
//!
//! The in-memory aggregate and every operation that mutates it.
//!
//! A mutation runs against a copy of the current state. The copy is persisted
//! and only then swapped in, so an operation either fully applies (in memory
//! and in the slot) or leaves both untouched.

mod commands;
mod customers;
mod products;
mod sales;


use serde::{Deserialize, Serialize};

use crate::domain::{Customer, Product, Sale, Transaction};
use crate::error::AppResult;
use crate::persistence::{Slot, StoreRepository};
use crate::reconcile::{reconcile, ReconcileReport};
use crate::seed::SeedCatalog;

pub use commands::*;

/// Everything the store knows; the unit of persistence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
    pub transactions: Vec<Transaction>,
}

/// Handle through which all reads and commands go
#[derive(Debug)]
pub struct Store<S: Slot> {
    data: StoreData,
    repository: StoreRepository<S>,
}

impl<S: Slot> Store<S> {
    /// Load, reconcile against `seed`, and write the result back.
    ///
    /// Only returns once the reconciled state is durable.
    pub fn open(slot: S, seed: &SeedCatalog) -> AppResult<(Self, ReconcileReport)> {
        let mut repository = StoreRepository::new(slot);
        let persisted = repository.load()?;
        let (data, report) = reconcile(seed, persisted);

        repository.save(&data)?;

        if report.fresh {
            tracing::info!(
                "Store initialized from seed catalog {}: {} products, {} customers",
                seed.version(),
                data.products.len(),
                data.customers.len()
            );
        } else {
            tracing::info!(
                "Store reconciled against {}: products {:?}, customers {:?}, {} sales, {} transactions",
                seed.version(),
                report.products,
                report.customers,
                report.sales,
                report.transactions
            );
        }

        Ok((Self { data, repository }, report))
    }

    /// Persist `next` and make it the current state.
    fn commit(&mut self, next: StoreData) -> AppResult<()> {
        self.repository.save(&next)?;
        self.data = next;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    pub fn products(&self) -> &[Product] {
        &self.data.products
    }

    pub fn customers(&self) -> &[Customer] {
        &self.data.customers
    }

    pub fn sales(&self) -> &[Sale] {
        &self.data.sales
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.data.transactions
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.data.products.iter().find(|p| p.id == id)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.data.customers.iter().find(|c| c.id == id)
    }

    pub fn repository(&self) -> &StoreRepository<S> {
        &self.repository
    }
}
