//! Command definitions
//!
//! Commands represent intentions to change the store.

use serde::{Deserialize, Serialize};

use crate::domain::{Customer, CustomerChanges, Price, Product, ProductChanges};

// =========================================================================
// Products
// =========================================================================

/// Command to add a product to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub quantity: u32,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: String::new(),
            price,
            quantity: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub(crate) fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Command to change fields of an existing product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductCommand {
    pub id: String,
    #[serde(flatten)]
    pub changes: ProductChanges,
}

impl UpdateProductCommand {
    pub fn new(id: impl Into<String>, changes: ProductChanges) -> Self {
        Self {
            id: id.into(),
            changes,
        }
    }
}

/// Command to add stock to a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockCommand {
    pub product_id: String,
    pub quantity: u32,
    pub note: Option<String>,
}

impl RestockCommand {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

// =========================================================================
// Customers
// =========================================================================

/// Command to register a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            phone: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub(crate) fn into_customer(self, id: String) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Command to change fields of an existing customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCustomerCommand {
    pub id: String,
    #[serde(flatten)]
    pub changes: CustomerChanges,
}

impl UpdateCustomerCommand {
    pub fn new(id: impl Into<String>, changes: CustomerChanges) -> Self {
        Self {
            id: id.into(),
            changes,
        }
    }
}

// =========================================================================
// Sales
// =========================================================================

/// One requested line of a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: String,
    pub units: u32,
}

impl SaleItem {
    pub fn new(product_id: impl Into<String>, units: u32) -> Self {
        Self {
            product_id: product_id.into(),
            units,
        }
    }
}

/// Command to sell one or more products
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSaleCommand {
    pub items: Vec<SaleItem>,
    /// Registered customer, `None` for a walk-in
    pub customer_id: Option<String>,
}

impl ProcessSaleCommand {
    pub fn new(items: Vec<SaleItem>) -> Self {
        Self {
            items,
            customer_id: None,
        }
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn add_item(mut self, product_id: impl Into<String>, units: u32) -> Self {
        self.items.push(SaleItem::new(product_id, units));
        self
    }
}
