//! 认证模块
//!
//! # 内容
//!
//! - [`JwtService`] - JWT 令牌生成与验证
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_admin`] - 管理员认证中间件
//! - [`password`] - Argon2 密码哈希

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_admin;
