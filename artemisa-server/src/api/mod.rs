//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 服务信息
//! - [`auth`] - 登录接口
//! - [`admins`] - 管理员账户接口
//! - [`products`] - 商品管理接口
//! - [`sales`] - 销售接口
//! - [`stats`] - 统计接口

pub mod admins;
pub mod auth;
pub mod health;
pub mod products;
pub mod sales;
pub mod stats;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
