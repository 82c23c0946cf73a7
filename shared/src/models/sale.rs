//! Sale Model
//!
//! A sale embeds an immutable snapshot of every product sold (the line
//! items) plus the payment types used. Snapshots are captured at creation
//! time and never updated when the catalog changes later.

use serde::{Deserialize, Serialize};

use super::Picture;
use super::ProductCategory;

/// Payment type (付款方式)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum PayType {
    Transferencia,
    Efectivo,
    Tarjeta,
}

/// Line item: denormalized product snapshot + quantity sold.
///
/// `stock` is the product's stock at the time of sale as submitted by the
/// caller; `product_id` travels as `_id` on the wire for compatibility
/// with the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SaleItem {
    #[serde(rename = "_id")]
    pub product_id: i64,
    pub name: String,
    pub category: ProductCategory,
    pub price: f64,
    pub stock: i64,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub picture: Picture,
    #[serde(rename = "created")]
    pub product_created_at: i64,
    pub quantity: i64,
}

/// Sale entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub id_client: Option<String>,
    pub total_price: f64,
    pub money_returned: f64,
    /// Sequential receipt number, unique and assigned in creation order.
    pub consecutive: i64,
    pub pay_type: Vec<PayType>,
    pub products: Vec<SaleItem>,
    #[serde(rename = "created")]
    pub created_at: i64,
}

/// Line item as submitted in a create-sale request: the caller-provided
/// snapshot. Snapshot fields default like the storefront leaves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemCreate {
    #[serde(rename = "_id")]
    pub product_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: ProductCategory,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub picture: Picture,
    #[serde(rename = "created", default)]
    pub product_created_at: i64,
    pub quantity: i64,
}

/// Create sale payload (`saleData` in the request body)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreate {
    pub id_client: Option<String>,
    pub total_price: f64,
    pub pay_type: Vec<PayType>,
    pub products: Vec<SaleItemCreate>,
    pub money_returned: Option<f64>,
}

/// `GET /v1/sales/last` response: the highest consecutive handed out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastConsecutive {
    pub consecutive: Option<i64>,
}
