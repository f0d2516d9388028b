use bisoshi_types::{Product, Sale};
use chrono::{DateTime, Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Inventory totals shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductOverview {
    pub product_count: usize,
    /// Sum of `totalPrice`.
    pub total_sales: f64,
    /// Sum of `quantity`.
    pub total_volume: f64,
    pub sales_by_category: BTreeMap<String, f64>,
    pub volume_by_category: BTreeMap<String, f64>,
}

impl ProductOverview {
    pub fn from_products(products: &[Product]) -> Self {
        let mut overview = Self {
            product_count: products.len(),
            ..Self::default()
        };
        for product in products {
            overview.total_sales += product.total_price;
            overview.total_volume += product.quantity;
            *overview
                .sales_by_category
                .entry(product.category.clone())
                .or_default() += product.total_price;
            *overview
                .volume_by_category
                .entry(product.category.clone())
                .or_default() += product.quantity;
        }
        overview
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesOverview {
    pub sale_count: usize,
    pub total_amount: f64,
    /// Sales without a parseable date are left out.
    pub by_year: BTreeMap<i32, f64>,
}

impl SalesOverview {
    pub fn from_sales(sales: &[Sale]) -> Self {
        let mut overview = Self {
            sale_count: sales.len(),
            ..Self::default()
        };
        for sale in sales {
            overview.total_amount += sale.total_amount;
            if let Some(year) = sale.date.as_deref().and_then(sale_year) {
                *overview.by_year.entry(year).or_default() += sale.total_amount;
            }
        }
        overview
    }

    pub fn year_total(&self, year: i32) -> f64 {
        self.by_year.get(&year).copied().unwrap_or(0.0)
    }

    /// Percentage change against the previous year; 0 when that year is empty.
    pub fn year_over_year(&self, year: i32) -> f64 {
        let previous = self.year_total(year - 1);
        if previous == 0.0 {
            return 0.0;
        }
        (self.year_total(year) - previous) / previous * 100.0
    }
}

/// Year of an ISO-8601 timestamp or plain date.
pub fn sale_year(date: &str) -> Option<i32> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(date) {
        return Some(ts.year());
    }
    NaiveDate::parse_from_str(date.get(..10)?, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// Combined client board: inventory, sales trend and margins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardOverview {
    pub year: i32,
    pub products: ProductOverview,
    pub sales: SalesOverview,
    pub year_total: f64,
    pub previous_year_total: f64,
    pub year_over_year_pct: f64,
    pub gross_profit: f64,
    pub gross_margin_pct: f64,
    pub average_unit_price: f64,
}

impl BoardOverview {
    /// Profit compares inventory sales against the cost of the products sold.
    pub fn build(products: &[Product], sales: &[Sale], year: i32) -> Self {
        let products = ProductOverview::from_products(products);
        let sales_overview = SalesOverview::from_sales(sales);

        let cost_of_sales: f64 = sales
            .iter()
            .map(|s| s.product.total_cost.unwrap_or(0.0))
            .sum();
        let (gross_profit, gross_margin_pct) = if products.total_sales == 0.0 {
            (0.0, 0.0)
        } else {
            let profit = products.total_sales - cost_of_sales;
            (profit, profit / products.total_sales * 100.0)
        };

        let average_unit_price = if sales.is_empty() {
            0.0
        } else {
            sales
                .iter()
                .map(|s| s.product.price.unwrap_or(0.0))
                .sum::<f64>()
                / sales.len() as f64
        };

        Self {
            year,
            year_total: sales_overview.year_total(year),
            previous_year_total: sales_overview.year_total(year - 1),
            year_over_year_pct: sales_overview.year_over_year(year),
            products,
            sales: sales_overview,
            gross_profit,
            gross_margin_pct,
            average_unit_price,
        }
    }
}
