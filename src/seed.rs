//! Seed catalog
//!
//! The default products and customers a fresh store starts with. The catalog
//! is versioned through its slot key: bumping the version starts a new slot,
//! while edits within a version are reconciled against persisted data.

use crate::domain::{Customer, Price, Product};
use crate::store::StoreData;

/// Version of the default catalog, also the default slot key
pub const DEFAULT_CATALOG_VERSION: &str = "wings_cafe_db_v1";

/// Fixed default set of products and customers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCatalog {
    version: String,
    products: Vec<Product>,
    customers: Vec<Customer>,
}

fn product(id: &str, name: &str, description: &str, category: &str, price: u32, quantity: u32) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        price: Price::whole(price),
        quantity,
    }
}

fn customer(id: &str, name: &str, email: &str, phone: &str) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    }
}

impl SeedCatalog {
    pub fn new(version: impl Into<String>, products: Vec<Product>, customers: Vec<Customer>) -> Self {
        Self {
            version: version.into(),
            products,
            customers,
        }
    }

    /// The cafe's default catalog
    pub fn default_catalog() -> Self {
        let products = vec![
            // Beverages
            product("b1", "Cappuccino", "Espresso with steamed milk and foam", "Beverage", 35, 30),
            product("b2", "Latte", "Espresso with steamed milk", "Beverage", 40, 25),
            product("b3", "Espresso", "Strong black coffee", "Beverage", 25, 20),
            product("b4", "Americano", "Espresso with hot water", "Beverage", 30, 20),
            product("b5", "Hot Chocolate", "Rich chocolate with steamed milk", "Beverage", 35, 15),
            product("b6", "Green Tea", "Refreshing green tea", "Beverage", 20, 25),
            // Food
            product("f1", "Blueberry Muffin", "Soft muffin with blueberries", "Food", 20, 20),
            product("f2", "Croissant", "Buttery French pastry", "Food", 25, 25),
            product("f3", "Ham & Cheese Sandwich", "Fresh sandwich with ham, cheese, and veggies", "Food", 50, 15),
            product("f4", "Chicken Wrap", "Grilled chicken with lettuce and sauce", "Food", 55, 15),
            product("f5", "Caesar Salad", "Fresh romaine with Caesar dressing", "Food", 45, 10),
            // Desserts
            product("d1", "Chocolate Cake Slice", "Rich chocolate cake slice", "Dessert", 35, 10),
            product("d2", "Cheesecake Slice", "Creamy cheesecake with biscuit base", "Dessert", 40, 10),
            product("d3", "Ice Cream Scoop", "Vanilla or chocolate ice cream", "Dessert", 15, 20),
            // Snacks
            product("s1", "French Fries", "Crispy golden fries", "Snack", 25, 20),
            product("s2", "Onion Rings", "Fried onion rings with dip", "Snack", 30, 15),
            product("s3", "Mozzarella Sticks", "Cheesy fried sticks", "Snack", 35, 15),
        ];

        let customers = vec![
            customer("c1", "Thabo Mokoena", "mthabo@gmail.com", "58000001"),
            customer("c2", "Lerato Nthabeleng", "leratontha@gmail.com", "58000002"),
            customer("c3", "Mpho Tšepang", "mpho563@gamil.com", "58000003"),
            customer("c4", "Neo Kamohelo", "neokamohelo@gmail.com", "58000004"),
        ];

        Self::new(DEFAULT_CATALOG_VERSION, products, customers)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// A fresh store: the catalog verbatim, no sales, no transactions
    pub fn into_store_data(self) -> StoreData {
        StoreData {
            products: self.products,
            customers: self.customers,
            sales: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

impl Default for SeedCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_catalog_contents() {
        let seed = SeedCatalog::default_catalog();

        assert_eq!(seed.version(), "wings_cafe_db_v1");
        assert_eq!(seed.products().len(), 17);
        assert_eq!(seed.customers().len(), 4);

        let b1 = &seed.products()[0];
        assert_eq!(b1.id, "b1");
        assert_eq!(b1.price, Price::whole(35));
        assert_eq!(b1.quantity, 30);
    }

    #[test]
    fn test_default_catalog_ids_are_unique() {
        let seed = SeedCatalog::default_catalog();
        let product_ids: HashSet<_> = seed.products().iter().map(|p| &p.id).collect();
        let customer_ids: HashSet<_> = seed.customers().iter().map(|c| &c.id).collect();

        assert_eq!(product_ids.len(), seed.products().len());
        assert_eq!(customer_ids.len(), seed.customers().len());
    }

    #[test]
    fn test_into_store_data_is_empty_history() {
        let data = SeedCatalog::default_catalog().into_store_data();
        assert!(data.sales.is_empty());
        assert!(data.transactions.is_empty());
    }
}
