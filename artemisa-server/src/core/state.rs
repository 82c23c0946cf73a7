use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::admin;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc/池句柄实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态: 工作目录、数据库、引导账户
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.resolved_database_path()).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = Self {
            config: config.clone(),
            pool: db.pool,
            jwt_service,
        };

        state.bootstrap_admin().await?;

        Ok(state)
    }

    /// 引导管理员账户
    ///
    /// 仅当 admin 表为空且 ADMIN_EMAIL/ADMIN_PASSWORD 已配置时创建，
    /// 解决「创建管理员的接口本身需要管理员登录」的冷启动问题。
    async fn bootstrap_admin(&self) -> Result<(), AppError> {
        let (Some(email), Some(password)) =
            (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };

        if admin::count(&self.pool).await? > 0 {
            return Ok(());
        }

        let hash = crate::auth::password::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash bootstrap password: {e}")))?;
        let data = shared::models::AdminCreate {
            name: "Admin".to_string(),
            email: email.clone(),
            password: String::new(), // plaintext never reaches the repository
            role: None,
        };
        let created = admin::create(&self.pool, &data, &hash).await?;
        tracing::info!(email = %created.email, "Bootstrap admin account created");
        Ok(())
    }
}
