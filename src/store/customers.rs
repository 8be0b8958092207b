//! Customer operations

use crate::domain::{new_id, Customer, Sale};
use crate::error::AppResult;
use crate::persistence::Slot;

use super::{NewCustomer, Store, UpdateCustomerCommand};

/// Label for a sale without a customer
pub const WALK_IN: &str = "Walk-in";

/// Label for a sale whose customer has since been deleted
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

impl<S: Slot> Store<S> {
    pub fn add_customer(&mut self, command: NewCustomer) -> AppResult<Customer> {
        let customer = command.into_customer(new_id("c"));

        let mut next = self.data.clone();
        next.customers.push(customer.clone());
        self.commit(next)?;

        tracing::info!("Customer added: {} ({})", customer.id, customer.name);
        Ok(customer)
    }

    /// Overwrite the given fields. `Ok(None)` if the id is unknown.
    pub fn update_customer(&mut self, command: UpdateCustomerCommand) -> AppResult<Option<Customer>> {
        let Some(index) = self.data.customers.iter().position(|c| c.id == command.id) else {
            tracing::debug!("Update ignored, unknown customer {}", command.id);
            return Ok(None);
        };

        let mut next = self.data.clone();
        next.customers[index].apply(command.changes);
        let updated = next.customers[index].clone();
        self.commit(next)?;

        tracing::info!("Customer updated: {}", updated.id);
        Ok(Some(updated))
    }

    /// Remove a customer. Sales keep their (now dangling) customer id.
    pub fn delete_customer(&mut self, id: &str) -> AppResult<bool> {
        if self.customer(id).is_none() {
            tracing::debug!("Delete ignored, unknown customer {}", id);
            return Ok(false);
        }

        let mut next = self.data.clone();
        next.customers.retain(|c| c.id != id);
        self.commit(next)?;

        tracing::info!("Customer deleted: {}", id);
        Ok(true)
    }

    pub fn search_customers(&self, query: &str) -> Vec<&Customer> {
        self.data
            .customers
            .iter()
            .filter(|c| c.matches(query))
            .collect()
    }

    /// Display name of a sale's customer
    pub fn customer_label(&self, sale: &Sale) -> &str {
        match sale.customer_id.as_deref() {
            None => WALK_IN,
            Some(id) => self
                .customer(id)
                .map(|c| c.name.as_str())
                .unwrap_or(UNKNOWN_CUSTOMER),
        }
    }
}
