//! 服务信息路由

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/", get(index))
}

/// GET / - 服务信息 (无需认证)
async fn index() -> Json<Value> {
    Json(json!({
        "name": "Artemisa Backend",
        "version": env!("CARGO_PKG_VERSION"),
        "access": "private",
        "ok": true,
    }))
}
