//! Shared data models and utilities for the Artemisa POS backend.
//!
//! Model structs are consumed by `artemisa-server` (with the `db` feature
//! enabled for `sqlx::FromRow` derives) and by API clients (serde only).

pub mod models;
pub mod util;

pub use models::*;
