//! Statistics API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/v1/stats/monthlysales", get(handler::monthly_sales))
        .route("/v1/stats/category", get(handler::sales_by_category))
        .route("/v1/stats/payments", get(handler::sales_by_payment))
        .route("/v1/stats/lowstock", get(handler::low_stock))
        .route("/v1/stats/top", get(handler::top_products))
}
