//! Projection module
//!
//! Read models derived from the store: period sales reports and the
//! dashboard summary. Nothing here mutates state.

mod reports;

pub use reports::{sales_by_period, sales_total, DashboardSummary, SalesPeriod, SalesReport};
