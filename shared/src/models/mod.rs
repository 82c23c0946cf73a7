//! Data models
//!
//! Shared between artemisa-server and the storefront frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-assigned).

pub mod admin;
pub mod product;
pub mod sale;
pub mod stats;

// Re-exports
pub use admin::*;
pub use product::*;
pub use sale::*;
pub use stats::*;
