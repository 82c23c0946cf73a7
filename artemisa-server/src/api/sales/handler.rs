//! Sales API Handlers
//!
//! The create path is the transactional core: consecutive allocation,
//! snapshot persistence and stock decrements all commit or roll back as
//! one unit (see `db::repository::sale`).

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::sale;
use crate::utils::{AppError, AppResult};
use shared::models::{LastConsecutive, Sale, SaleCreate};

/// Request wrapper used by the storefront: `{"saleData": {...}}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleBody {
    pub sale_data: SaleCreate,
}

/// GET /v1/sales/all - 获取所有销售记录
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Sale>>> {
    let sales = sale::find_all(&state.pool).await?;
    // 与店面约定一致: 空列表按 404 处理
    if sales.is_empty() {
        return Err(AppError::not_found("Sales"));
    }
    Ok(Json(sales))
}

/// GET /v1/sales/last - 最近一次分配的小票号
pub async fn last(State(state): State<ServerState>) -> AppResult<Json<LastConsecutive>> {
    let consecutive = sale::last_consecutive(&state.pool).await?;
    Ok(Json(LastConsecutive { consecutive }))
}

/// POST /v1/sales - 记录一笔销售
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<SaleBody>,
) -> AppResult<Json<Sale>> {
    let created = sale::create(&state.pool, body.sale_data).await?;
    Ok(Json(created))
}

/// DELETE /v1/sale/:id - 删除一笔销售 (不回补库存)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    sale::delete(&state.pool, id).await?;
    tracing::info!(sale_id = id, operator_id = current_user.id, "Sale deleted");
    Ok(Json(true))
}

/// DELETE /v1/sales - 清空销售记录 (不可逆)
pub async fn delete_all(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<bool>> {
    sale::delete_all(&state.pool).await?;
    tracing::warn!(operator_id = current_user.id, "All sales deleted");
    Ok(Json(true))
}
