//! Sales reports and dashboard summary

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Sale, Transaction};
use crate::store::StoreData;

/// Number of transactions shown on the dashboard
const RECENT_TRANSACTIONS: usize = 10;

/// Reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesPeriod {
    /// Same calendar day as now
    Daily,
    /// The last seven days up to now
    Weekly,
    /// Same calendar month and year as now
    Monthly,
    /// No filter
    All,
}

impl SalesPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesPeriod::Daily => "daily",
            SalesPeriod::Weekly => "weekly",
            SalesPeriod::Monthly => "monthly",
            SalesPeriod::All => "all",
        }
    }

    /// Whether a sale dated `date` falls in this period as seen from `now`
    pub fn contains<Tz: TimeZone>(&self, date: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        let local = date.with_timezone(&now.timezone());
        match self {
            SalesPeriod::Daily => local.date_naive() == now.date_naive(),
            SalesPeriod::Weekly => local >= now.clone() - Duration::days(7),
            SalesPeriod::Monthly => local.year() == now.year() && local.month() == now.month(),
            SalesPeriod::All => true,
        }
    }
}

/// Unrecognized text means no filter
impl FromStr for SalesPeriod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "daily" => SalesPeriod::Daily,
            "weekly" => SalesPeriod::Weekly,
            "monthly" => SalesPeriod::Monthly,
            _ => SalesPeriod::All,
        })
    }
}

impl From<&str> for SalesPeriod {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(period) => period,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for SalesPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales dated within `period` of `now`, in recorded order
pub fn sales_by_period<'a, Tz: TimeZone>(
    sales: &'a [Sale],
    period: SalesPeriod,
    now: &DateTime<Tz>,
) -> Vec<&'a Sale> {
    sales
        .iter()
        .filter(|sale| period.contains(&sale.date, now))
        .collect()
}

/// Revenue of the given sales
pub fn sales_total<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Decimal {
    sales.into_iter().map(|sale| sale.total).sum()
}

/// Sales of one period with their revenue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesReport {
    pub period: SalesPeriod,
    pub sales: Vec<Sale>,
    pub total: Decimal,
}

impl SalesReport {
    pub fn build<Tz: TimeZone>(sales: &[Sale], period: SalesPeriod, now: &DateTime<Tz>) -> Self {
        let sales: Vec<Sale> = sales_by_period(sales, period, now)
            .into_iter()
            .cloned()
            .collect();
        let total = sales_total(&sales);
        Self {
            period,
            sales,
            total,
        }
    }
}

/// Headline figures of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_stock_units: u64,
    pub total_revenue: Decimal,
    pub low_stock_count: usize,
    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}

impl DashboardSummary {
    pub fn build(data: &StoreData, low_stock_threshold: u32) -> Self {
        Self {
            total_products: data.products.len(),
            total_stock_units: data.products.iter().map(|p| u64::from(p.quantity)).sum(),
            total_revenue: sales_total(&data.sales),
            low_stock_count: data
                .products
                .iter()
                .filter(|p| p.quantity <= low_stock_threshold)
                .count(),
            recent_transactions: data
                .transactions
                .iter()
                .rev()
                .take(RECENT_TRANSACTIONS)
                .cloned()
                .collect(),
        }
    }
}
