//! Sales API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/v1/sales", post(handler::create).delete(handler::delete_all))
        .route("/v1/sales/all", get(handler::list))
        .route("/v1/sales/last", get(handler::last))
        .route("/v1/sale/{id}", delete(handler::delete))
}
