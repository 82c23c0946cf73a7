//! Statistics API Handlers
//!
//! Pure read-only views over recorded sales and the product ledger.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Datelike, Months, Utc};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{product, stats};
use crate::utils::AppResult;
use shared::models::{CategorySales, MonthlySales, PaymentMethodSales, Product, TopProduct};

/// Default alert threshold; reports elsewhere in the system use 5.
const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 2;

#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<i64>,
}

/// GET /v1/stats/monthlysales - 本月与上月的销售数量
pub async fn monthly_sales(State(state): State<ServerState>) -> AppResult<Json<MonthlySales>> {
    let now = Utc::now();
    let current = now.month();
    let previous = now
        .checked_sub_months(Months::new(1))
        .map(|d| d.month())
        .unwrap_or(12);

    let stats = stats::monthly_sales(&state.pool, current, previous).await?;
    Ok(Json(stats))
}

/// GET /v1/stats/category - 按分类统计售出数量
pub async fn sales_by_category(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<CategorySales>>> {
    let stats = stats::sales_by_category(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /v1/stats/payments - 按付款方式统计销售次数
pub async fn sales_by_payment(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<PaymentMethodSales>>> {
    let stats = stats::sales_by_payment(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /v1/stats/lowstock?threshold=N - 低库存商品 (默认阈值 2)
pub async fn low_stock(
    State(state): State<ServerState>,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let threshold = query.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    let products = product::find_low_stock(&state.pool, threshold).await?;
    Ok(Json(products))
}

/// GET /v1/stats/top - 销量前三的商品 (按出现次数)
pub async fn top_products(State(state): State<ServerState>) -> AppResult<Json<Vec<TopProduct>>> {
    let top = stats::top_products(&state.pool).await?;
    Ok(Json(top))
}
