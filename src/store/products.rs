//! Product operations

use chrono::Utc;

use crate::domain::{new_id, Product, Transaction, TransactionKind};
use crate::error::AppResult;
use crate::persistence::Slot;

use super::{NewProduct, RestockCommand, Store, UpdateProductCommand};

impl<S: Slot> Store<S> {
    /// Add a product under a fresh id
    pub fn add_product(&mut self, command: NewProduct) -> AppResult<Product> {
        let product = command.into_product(new_id("p"));

        let mut next = self.data.clone();
        next.products.push(product.clone());
        self.commit(next)?;

        tracing::info!("Product added: {} ({})", product.id, product.name);
        Ok(product)
    }

    /// Overwrite the given fields. `Ok(None)` if the id is unknown.
    pub fn update_product(&mut self, command: UpdateProductCommand) -> AppResult<Option<Product>> {
        let Some(index) = self.data.products.iter().position(|p| p.id == command.id) else {
            tracing::debug!("Update ignored, unknown product {}", command.id);
            return Ok(None);
        };

        let mut next = self.data.clone();
        next.products[index].apply(command.changes);
        let updated = next.products[index].clone();
        self.commit(next)?;

        tracing::info!("Product updated: {}", updated.id);
        Ok(Some(updated))
    }

    /// Remove a product. History referencing it is kept.
    pub fn delete_product(&mut self, id: &str) -> AppResult<bool> {
        if self.product(id).is_none() {
            tracing::debug!("Delete ignored, unknown product {}", id);
            return Ok(false);
        }

        let mut next = self.data.clone();
        next.products.retain(|p| p.id != id);
        self.commit(next)?;

        tracing::info!("Product deleted: {}", id);
        Ok(true)
    }

    /// Add stock and log a `restock` transaction.
    ///
    /// A zero quantity is rejected; an unknown id is `Ok(None)`.
    pub fn restock_product(&mut self, command: RestockCommand) -> AppResult<Option<Product>> {
        let Some(index) = self
            .data
            .products
            .iter()
            .position(|p| p.id == command.product_id)
        else {
            tracing::debug!("Restock ignored, unknown product {}", command.product_id);
            return Ok(None);
        };

        let mut next = self.data.clone();
        next.products[index].restock(command.quantity)?;
        let restocked = next.products[index].clone();

        let note = command.note.unwrap_or_else(|| "Restock".to_string());
        next.transactions.push(Transaction::new(
            restocked.id.clone(),
            TransactionKind::Restock,
            command.quantity,
            note,
            Utc::now(),
        ));
        self.commit(next)?;

        tracing::info!(
            "Product restocked: {} +{} (now {})",
            restocked.id,
            command.quantity,
            restocked.quantity
        );
        Ok(Some(restocked))
    }

    /// Case-insensitive name search
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.data
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Products with `quantity <= threshold`
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.data
            .products
            .iter()
            .filter(|p| p.quantity <= threshold)
            .collect()
    }
}
