//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::{AppError, AppResult};
use shared::models::{Product, ProductCreate, ProductUpdate};

/// Request wrapper used by the storefront: `{"productData": {...}}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody<T> {
    pub product_data: T,
}

/// GET /v1/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_all(&state.pool).await?;
    // 与店面约定一致: 空目录按 404 处理
    if products.is_empty() {
        return Err(AppError::not_found("Products"));
    }
    Ok(Json(products))
}

/// GET /v1/product/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    Ok(Json(product))
}

/// POST /v1/product - 创建商品 (code 自动按最大值递增分配)
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<ProductBody<ProductCreate>>,
) -> AppResult<Json<Product>> {
    let created = product::create(&state.pool, body.product_data).await?;
    tracing::info!(product_id = created.id, code = created.code, "Product created");
    Ok(Json(created))
}

/// PUT /v1/product/:id - 更新商品 (缺省字段保留旧值)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<ProductBody<ProductUpdate>>,
) -> AppResult<Json<Product>> {
    let updated = product::update(&state.pool, id, body.product_data).await?;
    Ok(Json(updated))
}

/// DELETE /v1/product/:id - 删除商品
///
/// 图片由外部对象存储负责清理；本服务仅持有 `{public_id, url}` 引用。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    product::delete(&state.pool, id).await?;
    Ok(Json(true))
}
