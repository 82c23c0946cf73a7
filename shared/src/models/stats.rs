//! Statistics Models
//!
//! Read-only aggregate shapes derived from recorded sales. Field names
//! follow the storefront's existing wire format (`_id` grouping keys).

use serde::{Deserialize, Serialize};

use super::{PayType, Picture, ProductCategory};

/// Sale counts for the current and previous calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub last_month: i64,
    pub actual_month: i64,
}

/// Total quantity sold per category (line items flattened across sales).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CategorySales {
    pub category: ProductCategory,
    pub total_quantity: i64,
}

/// Sale count per payment type (a sale may count under several).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentMethodSales {
    #[serde(rename = "_id")]
    pub pay_type: PayType,
    pub count: i64,
}

/// Top-seller entry: appearance count plus the product's CURRENT details.
/// Price/stock reflect the live catalog, not the sale-time snapshot;
/// historical state lives only inside the sale records. Products since
/// removed from the catalog keep their count and render with placeholder
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub category: Option<ProductCategory>,
    pub price: f64,
    pub buy_price: f64,
    pub stock: i64,
    pub code: Option<i64>,
    pub picture: Picture,
    pub count: i64,
}
