//! Artemisa Server - 小商户销售与库存后端
//!
//! # 架构概述
//!
//! 本模块是后端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (WAL) 与仓储层
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! artemisa-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码哈希
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (连接池 + 仓储)
//! └── utils/         # 错误、日志等工具
//! ```
//!
//! 核心不变量由仓储层保证：销售创建在单个事务中分配小票号、
//! 落库快照并原子扣减库存 (见 `db::repository::sale`)。

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ___         __                 _
   /   |  _____/ /____  ____ ___  (_)________ _
  / /| | / ___/ __/ _ \/ __ `__ \/ / ___/ __ `/
 / ___ |/ /  / /_/  __/ / / / / / (__  ) /_/ /
/_/  |_/_/   \__/\___/_/ /_/ /_/_/____/\__,_/
    "#
    );
}
