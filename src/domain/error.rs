//! Domain Error Types
//!
//! Pure domain errors that don't depend on persistence or configuration.

use thiserror::Error;

/// Business rule violations raised by store operations.
///
/// These are the structured failures surfaced to the presentation layer.
/// Every variant carries enough context to render a human-readable reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Sale request without any lines
    #[error("No items in sale")]
    NoItems,

    /// Sale line references a product that is not in the catalog
    #[error("Product {0} not found")]
    ProductNotFound(String),

    /// Sale line requests zero units
    #[error("Invalid units for {name}: {units}")]
    InvalidUnits { product_id: String, name: String, units: u32 },

    /// Sale line requests more units than are on hand
    #[error("Insufficient stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        name: String,
        requested: u64,
        available: u32,
    },

    /// Restock with a zero quantity
    #[error("Restock quantity must be positive")]
    InvalidRestockQuantity,

    /// Restock would push the quantity past the representable maximum
    #[error("Stock overflow for {0}")]
    StockOverflow(String),
}

impl DomainError {
    /// Create an insufficient stock error
    pub fn insufficient_stock(
        product_id: impl Into<String>,
        name: impl Into<String>,
        requested: u64,
        available: u32,
    ) -> Self {
        Self::InsufficientStock {
            product_id: product_id.into(),
            name: name.into(),
            requested,
            available,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoItems => "no_items",
            Self::ProductNotFound(_) => "product_not_found",
            Self::InvalidUnits { .. } => "invalid_units",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::InvalidRestockQuantity => "invalid_restock_quantity",
            Self::StockOverflow(_) => "stock_overflow",
        }
    }

    /// Check if this is a client error (caller's input was rejected)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::StockOverflow(_))
    }
}
