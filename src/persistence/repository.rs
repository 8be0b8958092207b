//! Store Repository
//!
//! Encodes the whole store into one JSON blob and decodes it back.
//! Decoding is lenient about missing fields and recorded precision, and
//! strict about wrong types: a blob that does not decode is reported as
//! absent, never as a fault.

use serde::Deserialize;

use crate::domain::money::stored;
use crate::domain::{CustomerChanges, Price, ProductChanges, Sale, Transaction};
use crate::store::StoreData;

use super::{PersistenceError, Slot};

/// A product as found in the blob. Only `id` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProduct {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "stored::option::deserialize")]
    pub price: Option<Price>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl PersistedProduct {
    /// Split into the id and the fields that were present
    pub fn into_parts(self) -> (String, ProductChanges) {
        let changes = ProductChanges {
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
        };
        (self.id, changes)
    }
}

/// A customer as found in the blob. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistedCustomer {
    pub id: String,
    #[serde(flatten)]
    pub fields: CustomerChanges,
}

/// Decoded contents of the durable slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersistedStore {
    #[serde(default)]
    pub products: Vec<PersistedProduct>,
    #[serde(default)]
    pub customers: Vec<PersistedCustomer>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl PersistedStore {
    /// Decode a raw blob
    pub fn decode(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }
}

/// Repository over a durable slot
#[derive(Debug, Clone)]
pub struct StoreRepository<S: Slot> {
    slot: S,
}

impl<S: Slot> StoreRepository<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    // =========================================================================
    // load
    // =========================================================================

    /// Load the persisted store.
    ///
    /// Returns `Ok(None)` when the slot is empty or its blob does not decode;
    /// an undecodable blob is quarantined first. Only a failure to read the
    /// slot at all is an error.
    pub fn load(&mut self) -> Result<Option<PersistedStore>, PersistenceError> {
        let Some(blob) = self.slot.read()? else {
            tracing::info!("No persisted store under key {}", self.slot.key());
            return Ok(None);
        };

        match PersistedStore::decode(&blob) {
            Ok(persisted) => {
                tracing::debug!(
                    "Loaded store {}: {} products, {} customers, {} sales, {} transactions",
                    self.slot.key(),
                    persisted.products.len(),
                    persisted.customers.len(),
                    persisted.sales.len(),
                    persisted.transactions.len()
                );
                Ok(Some(persisted))
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to decode persisted store {}, falling back to seed: {}",
                    self.slot.key(),
                    e
                );
                if let Err(qe) = self.slot.quarantine(&blob) {
                    tracing::error!("Failed to quarantine undecodable blob: {}", qe);
                }
                Ok(None)
            }
        }
    }

    // =========================================================================
    // save
    // =========================================================================

    /// Serialize the whole store and overwrite the slot
    pub fn save(&mut self, data: &StoreData) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string(data)?;
        self.slot.write(&blob).map_err(|e| {
            tracing::error!("Failed to persist store {}: {}", self.slot.key(), e);
            e
        })
    }
}
