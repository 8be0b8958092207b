//! Sale processing and sales reads

use chrono::{Local, Utc};

use crate::domain::{DomainError, Sale, SaleLine, Transaction};
use crate::error::AppResult;
use crate::persistence::Slot;
use crate::projection::{self, DashboardSummary, SalesPeriod, SalesReport};

use super::{ProcessSaleCommand, SaleItem, Store};

impl<S: Slot> Store<S> {
    // =========================================================================
    // process_sale
    // =========================================================================

    /// Sell the requested items as one all-or-nothing operation.
    ///
    /// Lines for the same product are merged before stock is checked, so two
    /// lines of 6 against a stock of 10 are rejected rather than over-selling.
    /// The resulting sale has one line per distinct product, in first-seen
    /// order, and one `sell` transaction per line.
    pub fn process_sale(&mut self, command: ProcessSaleCommand) -> AppResult<Sale> {
        let plan = self.plan_sale(&command.items).map_err(|e| {
            tracing::warn!("Sale rejected: {}", e);
            e
        })?;

        let now = Utc::now();
        let mut next = self.data.clone();
        let mut lines = Vec::with_capacity(plan.len());
        for (index, units) in plan {
            let product = &mut next.products[index];
            lines.push(SaleLine::snapshot(product, units));
            product.deduct(units)?;
        }

        // An empty id is how a walk-in arrives from a form
        let customer_id = command.customer_id.filter(|id| !id.trim().is_empty());
        let sale = Sale::record(lines, customer_id, now);

        next.transactions
            .extend(sale.items.iter().map(|line| Transaction::sell(line, now)));
        next.sales.push(sale.clone());
        self.commit(next)?;

        tracing::info!(
            "Sale recorded: {} ({} lines, {} units, total {})",
            sale.id,
            sale.items.len(),
            sale.units(),
            sale.total
        );
        Ok(sale)
    }

    /// Validate every requested line against current stock without mutating.
    ///
    /// Returns `(product index, units)` per distinct product.
    fn plan_sale(&self, items: &[SaleItem]) -> Result<Vec<(usize, u32)>, DomainError> {
        if items.is_empty() {
            return Err(DomainError::NoItems);
        }

        let mut merged: Vec<(usize, u64)> = Vec::with_capacity(items.len());
        for item in items {
            let index = self
                .data
                .products
                .iter()
                .position(|p| p.id == item.product_id)
                .ok_or_else(|| DomainError::ProductNotFound(item.product_id.clone()))?;

            if item.units == 0 {
                let product = &self.data.products[index];
                return Err(DomainError::InvalidUnits {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    units: item.units,
                });
            }

            match merged.iter_mut().find(|(i, _)| *i == index) {
                Some((_, units)) => *units += u64::from(item.units),
                None => merged.push((index, u64::from(item.units))),
            }
        }

        merged
            .into_iter()
            .map(|(index, units)| {
                let product = &self.data.products[index];
                product.ensure_available(units)?;
                // Bounded by the product's quantity once available
                let units = u32::try_from(units).map_err(|_| {
                    DomainError::insufficient_stock(&product.id, &product.name, units, product.quantity)
                })?;
                Ok((index, units))
            })
            .collect()
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Sales in `period` relative to the host's local calendar
    pub fn sales_by_period(&self, period: SalesPeriod) -> Vec<&Sale> {
        projection::sales_by_period(&self.data.sales, period, &Local::now())
    }

    /// Sales in `period` with their revenue
    pub fn sales_report(&self, period: SalesPeriod) -> SalesReport {
        SalesReport::build(&self.data.sales, period, &Local::now())
    }

    pub fn dashboard(&self, low_stock_threshold: u32) -> DashboardSummary {
        DashboardSummary::build(&self.data, low_stock_threshold)
    }
}
