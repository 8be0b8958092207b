//! Ledger records
//!
//! Sales and stock-movement transactions. Both are append-only facts:
//! once recorded they are never edited, and they keep their own copy of
//! product names and prices so later catalog edits cannot rewrite history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Price, Product};

/// Generate a fresh record id: a one-letter kind prefix plus a random UUID.
pub fn new_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

/// One line of a completed sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    /// Product name at the time of sale
    pub name: String,
    pub units: u32,
    /// Unit price at the time of sale
    #[serde(deserialize_with = "super::money::stored::deserialize")]
    pub price: Price,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub line_total: Decimal,
}

impl SaleLine {
    /// Snapshot `product`'s current name and price for `units` units.
    pub fn snapshot(product: &Product, units: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            units,
            price: product.price,
            line_total: product.price.line_total(units),
        }
    }
}

/// A completed multi-item purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub items: Vec<SaleLine>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub date: DateTime<Utc>,
}

impl Sale {
    /// Record a sale; `total` is the exact sum of the line totals.
    pub fn record(items: Vec<SaleLine>, customer_id: Option<String>, date: DateTime<Utc>) -> Self {
        let total = items.iter().map(|line| line.line_total).sum();
        Self {
            id: new_id("s"),
            items,
            total,
            customer_id,
            date,
        }
    }

    /// Total units across all lines
    pub fn units(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.units)).sum()
    }
}

/// Kind of stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Sell,
    Restock,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Sell => "sell",
            TransactionKind::Restock => "restock",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit entry for one stock movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub product_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        product_id: impl Into<String>,
        kind: TransactionKind,
        quantity: u32,
        note: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id("t"),
            product_id: product_id.into(),
            kind,
            quantity,
            note: note.into(),
            date,
        }
    }

    /// The `sell` entry for one sale line
    pub fn sell(line: &SaleLine, date: DateTime<Utc>) -> Self {
        Self::new(
            line.product_id.clone(),
            TransactionKind::Sell,
            line.units,
            format!("Sold {}", line.units),
            date,
        )
    }
}
