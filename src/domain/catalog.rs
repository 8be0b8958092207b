//! Catalog records
//!
//! Products and customers, plus the partial-change types used both by
//! update commands and by lenient decoding of persisted records.

use serde::{Deserialize, Serialize};

use super::{DomainError, Price};

/// A product on sale in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(deserialize_with = "super::money::stored::deserialize")]
    pub price: Price,
    /// Units on hand
    pub quantity: u32,
}

/// Fields of a product, every one optional.
///
/// Present fields overwrite the target record; absent fields leave it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl ProductChanges {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

impl Product {
    /// Build a product from possibly-incomplete fields, defaulting the gaps.
    pub fn from_changes(id: impl Into<String>, changes: ProductChanges) -> Self {
        Self {
            id: id.into(),
            name: changes.name.unwrap_or_default(),
            description: changes.description.unwrap_or_default(),
            category: changes.category.unwrap_or_default(),
            price: changes.price.unwrap_or_default(),
            quantity: changes.quantity.unwrap_or_default(),
        }
    }

    /// Overwrite every field present in `changes`. The id never changes.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
    }

    /// Check that `units` can be taken from stock.
    pub fn ensure_available(&self, units: u64) -> Result<(), DomainError> {
        if units > u64::from(self.quantity) {
            return Err(DomainError::insufficient_stock(
                &self.id,
                &self.name,
                units,
                self.quantity,
            ));
        }
        Ok(())
    }

    /// Take `units` out of stock
    pub fn deduct(&mut self, units: u32) -> Result<(), DomainError> {
        self.ensure_available(u64::from(units))?;
        self.quantity -= units;
        Ok(())
    }

    /// Put `units` into stock
    pub fn restock(&mut self, units: u32) -> Result<(), DomainError> {
        if units == 0 {
            return Err(DomainError::InvalidRestockQuantity);
        }
        self.quantity = self
            .quantity
            .checked_add(units)
            .ok_or_else(|| DomainError::StockOverflow(self.id.clone()))?;
        Ok(())
    }
}

/// A registered customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Fields of a customer, every one optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CustomerChanges {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl Customer {
    pub fn from_changes(id: impl Into<String>, changes: CustomerChanges) -> Self {
        Self {
            id: id.into(),
            name: changes.name.unwrap_or_default(),
            email: changes.email.unwrap_or_default(),
            phone: changes.phone.unwrap_or_default(),
        }
    }

    pub fn apply(&mut self, changes: CustomerChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
    }

    /// Case-insensitive match on name or email, substring match on phone
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.phone.contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cappuccino() -> Product {
        Product {
            id: "b1".to_string(),
            name: "Cappuccino".to_string(),
            description: "Espresso with steamed milk and foam".to_string(),
            category: "Beverage".to_string(),
            price: Price::whole(35),
            quantity: 30,
        }
    }

    #[test]
    fn test_apply_overwrites_only_present_fields() {
        let mut product = cappuccino();
        product.apply(ProductChanges::default().with_price(Price::whole(38)));

        assert_eq!(product.price, Price::whole(38));
        assert_eq!(product.name, "Cappuccino");
        assert_eq!(product.quantity, 30);
        assert_eq!(product.id, "b1");
    }

    #[test]
    fn test_deduct_and_restock() {
        let mut product = cappuccino();
        product.deduct(5).unwrap();
        assert_eq!(product.quantity, 25);

        product.restock(10).unwrap();
        assert_eq!(product.quantity, 35);
    }

    #[test]
    fn test_deduct_insufficient_leaves_quantity() {
        let mut product = cappuccino();
        let result = product.deduct(31);

        assert!(matches!(result, Err(DomainError::InsufficientStock { available: 30, .. })));
        assert_eq!(product.quantity, 30);
    }

    #[test]
    fn test_restock_zero_rejected() {
        let mut product = cappuccino();
        assert_eq!(product.restock(0), Err(DomainError::InvalidRestockQuantity));
        assert_eq!(product.quantity, 30);
    }

    #[test]
    fn test_restock_overflow_rejected() {
        let mut product = cappuccino();
        product.quantity = u32::MAX;
        assert!(matches!(product.restock(1), Err(DomainError::StockOverflow(_))));
        assert_eq!(product.quantity, u32::MAX);
    }

    #[test]
    fn test_product_camel_case_json() {
        let json = serde_json::to_value(cappuccino()).unwrap();
        assert_eq!(json["id"], "b1");
        assert_eq!(json["quantity"], 30);
        assert_eq!(json["price"], 35.0);
        assert!(json["price"].is_number());
    }

    #[test]
    fn test_product_decodes_recorded_price_precision() {
        let product: Product = serde_json::from_str(
            r#"{"id":"p1","name":"Scone","description":"","category":"Food","price":12.999,"quantity":4}"#,
        )
        .unwrap();

        assert_eq!(product.price.value(), rust_decimal_macros::dec!(12.999));
    }

    #[test]
    fn test_customer_matches() {
        let customer = Customer {
            id: "c1".to_string(),
            name: "Thabo Mokoena".to_string(),
            email: "mthabo@gmail.com".to_string(),
            phone: "58000001".to_string(),
        };

        assert!(customer.matches("thabo"));
        assert!(customer.matches("GMAIL"));
        assert!(customer.matches("0001"));
        assert!(!customer.matches("lerato"));
    }
}
