//! Admin API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::password;
use crate::core::ServerState;
use crate::db::repository::admin;
use crate::utils::{AppError, AppResult};
use shared::models::{AdminCreate, AdminPublic, AdminUpdate};

/// Request wrapper used by the storefront: `{"adminData": {...}}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBody<T> {
    pub admin_data: T,
}

/// GET /v1/admins - 获取所有管理员
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AdminPublic>>> {
    let admins = admin::find_all(&state.pool).await?;
    // 与店面约定一致: 空列表按 404 处理
    if admins.is_empty() {
        return Err(AppError::not_found("Admins"));
    }
    Ok(Json(admins.into_iter().map(AdminPublic::from).collect()))
}

/// GET /v1/admin/:id - 获取单个管理员
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AdminPublic>> {
    let admin = admin::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Admin {id}")))?;
    Ok(Json(admin.into()))
}

/// POST /v1/admins - 创建管理员
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<AdminBody<AdminCreate>>,
) -> AppResult<Json<AdminPublic>> {
    let data = body.admin_data;
    if data.password.is_empty() {
        return Err(AppError::validation("password is required"));
    }
    let hash = password::hash_password(&data.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let created = admin::create(&state.pool, &data, &hash).await?;
    tracing::info!(admin_id = created.id, "Admin account created");
    Ok(Json(created.into()))
}

/// PUT /v1/admin/:id - 更新管理员 (密码仅在提供时重新哈希)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<AdminBody<AdminUpdate>>,
) -> AppResult<Json<AdminPublic>> {
    let data = body.admin_data;
    let hash = match data.password.as_deref() {
        Some("") | None => None,
        Some(plain) => Some(
            password::hash_password(plain)
                .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?,
        ),
    };

    let updated = admin::update(&state.pool, id, &data, hash.as_deref()).await?;
    Ok(Json(updated.into()))
}

/// DELETE /v1/admin/:id - 删除管理员
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    admin::delete(&state.pool, id).await?;
    Ok(Json(true))
}
