//! Reconciler
//!
//! Merges the persisted store with the seed catalog at start-up. Seed records
//! come first, in seed order, with any persisted record of the same id laid
//! over them field by field. Persisted records with ids unknown to the seed
//! are user-created and follow verbatim. Sales and transactions pass through.

use std::collections::{HashMap, HashSet};

use crate::domain::{Customer, Product};
use crate::persistence::{PersistedCustomer, PersistedProduct, PersistedStore};
use crate::seed::SeedCatalog;
use crate::store::StoreData;

/// A catalog record that can be merged by id with its persisted form
pub trait Reconcile: Clone {
    /// Partially-populated record as decoded from the blob
    type Persisted;

    fn persisted_id(persisted: &Self::Persisted) -> &str;

    fn record_id(&self) -> &str;

    /// Persisted field values win over seed values
    fn overlay(self, persisted: Self::Persisted) -> Self;

    /// Build a user-created record, defaulting absent fields
    fn from_persisted(persisted: Self::Persisted) -> Self;
}

impl Reconcile for Product {
    type Persisted = PersistedProduct;

    fn persisted_id(persisted: &PersistedProduct) -> &str {
        &persisted.id
    }

    fn record_id(&self) -> &str {
        &self.id
    }

    fn overlay(mut self, persisted: PersistedProduct) -> Self {
        let (_, changes) = persisted.into_parts();
        self.apply(changes);
        self
    }

    fn from_persisted(persisted: PersistedProduct) -> Self {
        let (id, changes) = persisted.into_parts();
        Product::from_changes(id, changes)
    }
}

impl Reconcile for Customer {
    type Persisted = PersistedCustomer;

    fn persisted_id(persisted: &PersistedCustomer) -> &str {
        &persisted.id
    }

    fn record_id(&self) -> &str {
        &self.id
    }

    fn overlay(mut self, persisted: PersistedCustomer) -> Self {
        self.apply(persisted.fields);
        self
    }

    fn from_persisted(persisted: PersistedCustomer) -> Self {
        Customer::from_changes(persisted.id, persisted.fields)
    }
}

/// Outcome counts of merging one record kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeCounts {
    /// Seed records with no persisted counterpart
    pub seeded: usize,
    /// Seed records overlaid by a persisted record
    pub overridden: usize,
    /// Persisted records unknown to the seed
    pub user_created: usize,
}

/// What reconciliation did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// No usable persisted store existed
    pub fresh: bool,
    pub products: MergeCounts,
    pub customers: MergeCounts,
    pub sales: usize,
    pub transactions: usize,
}

/// Merge persisted records into the seed records by id.
///
/// When the blob holds several records with the same seed id, the first one
/// wins and the rest are dropped.
pub fn merge_by_id<T: Reconcile>(seed: &[T], persisted: Vec<T::Persisted>) -> (Vec<T>, MergeCounts) {
    let seed_ids: HashSet<&str> = seed.iter().map(|record| record.record_id()).collect();
    let mut overrides: HashMap<String, T::Persisted> = HashMap::new();
    let mut user_records = Vec::new();

    for record in persisted {
        let id = T::persisted_id(&record);
        if seed_ids.contains(id) {
            if !overrides.contains_key(id) {
                overrides.insert(id.to_string(), record);
            }
        } else {
            user_records.push(T::from_persisted(record));
        }
    }

    let mut counts = MergeCounts {
        user_created: user_records.len(),
        ..MergeCounts::default()
    };

    let mut merged: Vec<T> = seed
        .iter()
        .map(|record| match overrides.remove(record.record_id()) {
            Some(over) => {
                counts.overridden += 1;
                record.clone().overlay(over)
            }
            None => {
                counts.seeded += 1;
                record.clone()
            }
        })
        .collect();
    merged.extend(user_records);

    (merged, counts)
}

/// Reconcile the persisted store (if any) against `seed`.
pub fn reconcile(seed: &SeedCatalog, persisted: Option<PersistedStore>) -> (StoreData, ReconcileReport) {
    let Some(persisted) = persisted else {
        let report = ReconcileReport {
            fresh: true,
            products: MergeCounts {
                seeded: seed.products().len(),
                ..MergeCounts::default()
            },
            customers: MergeCounts {
                seeded: seed.customers().len(),
                ..MergeCounts::default()
            },
            sales: 0,
            transactions: 0,
        };
        return (seed.clone().into_store_data(), report);
    };

    let (products, product_counts) = merge_by_id(seed.products(), persisted.products);
    let (customers, customer_counts) = merge_by_id(seed.customers(), persisted.customers);

    let report = ReconcileReport {
        fresh: false,
        products: product_counts,
        customers: customer_counts,
        sales: persisted.sales.len(),
        transactions: persisted.transactions.len(),
    };

    let data = StoreData {
        products,
        customers,
        sales: persisted.sales,
        transactions: persisted.transactions,
    };

    (data, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerChanges, Price, ProductChanges};

    fn persisted_product(id: &str, fields: ProductChanges) -> PersistedProduct {
        PersistedProduct {
            id: id.to_string(),
            name: fields.name,
            description: fields.description,
            category: fields.category,
            price: fields.price,
            quantity: fields.quantity,
        }
    }

    /// Write `data` the way the repository does and read it back
    fn round_trip(data: &StoreData) -> PersistedStore {
        PersistedStore::decode(&serde_json::to_string(data).unwrap()).unwrap()
    }

    #[test]
    fn test_no_blob_is_seed_verbatim() {
        let seed = SeedCatalog::default_catalog();
        let (data, report) = reconcile(&seed, None);

        assert!(report.fresh);
        assert_eq!(report.products.seeded, 17);
        assert_eq!(data, seed.into_store_data());
    }

    #[test]
    fn test_user_price_edit_survives() {
        let seed = SeedCatalog::default_catalog();
        let persisted = PersistedStore {
            products: vec![persisted_product(
                "b1",
                ProductChanges::default().with_price(Price::whole(42)),
            )],
            ..PersistedStore::default()
        };

        let (data, report) = reconcile(&seed, Some(persisted));

        let b1 = &data.products[0];
        assert_eq!(b1.id, "b1");
        assert_eq!(b1.price, Price::whole(42));
        // Fields absent from the blob come from the seed
        assert_eq!(b1.name, "Cappuccino");
        assert_eq!(b1.quantity, 30);
        assert_eq!(report.products.overridden, 1);
        assert_eq!(report.products.seeded, 16);
    }

    #[test]
    fn test_seed_records_missing_from_blob_reappear() {
        let seed = SeedCatalog::default_catalog();
        let (data, _) = reconcile(&seed, Some(PersistedStore::default()));

        assert_eq!(data.products.len(), 17);
        assert_eq!(data.customers.len(), 4);
    }

    #[test]
    fn test_user_records_appended_in_order() {
        let seed = SeedCatalog::default_catalog();
        let persisted = PersistedStore {
            products: vec![
                persisted_product("p-second", ProductChanges::default().with_name("Rooibos")),
                persisted_product("b2", ProductChanges::default().with_quantity(3)),
                persisted_product("p-third", ProductChanges::default().with_name("Scone")),
            ],
            ..PersistedStore::default()
        };

        let (data, report) = reconcile(&seed, Some(persisted));

        assert_eq!(data.products.len(), 19);
        assert_eq!(data.products[1].quantity, 3);
        assert_eq!(data.products[17].id, "p-second");
        assert_eq!(data.products[17].name, "Rooibos");
        assert_eq!(data.products[17].price, Price::zero());
        assert_eq!(data.products[18].id, "p-third");
        assert_eq!(report.products.user_created, 2);
    }

    #[test]
    fn test_duplicate_seed_id_first_wins() {
        let seed = SeedCatalog::default_catalog();
        let persisted = PersistedStore {
            products: vec![
                persisted_product("b1", ProductChanges::default().with_quantity(1)),
                persisted_product("b1", ProductChanges::default().with_quantity(2)),
            ],
            ..PersistedStore::default()
        };

        let (data, _) = reconcile(&seed, Some(persisted));

        assert_eq!(data.products.len(), 17);
        assert_eq!(data.products[0].quantity, 1);
    }

    #[test]
    fn test_customer_edit_survives() {
        let seed = SeedCatalog::default_catalog();
        let persisted = PersistedStore {
            customers: vec![PersistedCustomer {
                id: "c2".to_string(),
                fields: CustomerChanges::default().with_phone("59999999"),
            }],
            ..PersistedStore::default()
        };

        let (data, _) = reconcile(&seed, Some(persisted));

        assert_eq!(data.customers[1].phone, "59999999");
        assert_eq!(data.customers[1].name, "Lerato Nthabeleng");
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let seed = SeedCatalog::default_catalog();
        let persisted = PersistedStore {
            products: vec![
                persisted_product("b1", ProductChanges::default().with_price(Price::whole(42))),
                persisted_product("p-user", ProductChanges::default().with_name("Rooibos")),
            ],
            ..PersistedStore::default()
        };

        let (once, _) = reconcile(&seed, Some(persisted));
        let (twice, _) = reconcile(&seed, Some(round_trip(&once)));
        let (thrice, _) = reconcile(&seed, Some(round_trip(&twice)));

        assert_eq!(once, twice);
        assert_eq!(twice, thrice);
    }
}
