//! SeaORM storage backend
//!
//! This module provides the counter store using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod catalog;
pub mod classify;
mod connection;
mod converters;
mod counter_store;
mod mutations;
mod query;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::errors::{Result, RotatorError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{
    deactivated_at_for, model_to_catalog_entry, model_to_rotation, new_rotation_model,
    status_from_deactivated_at,
};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(RotatorError::database_config(format!(
            "cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 规范化 backend 名称
pub fn normalize_backend_name(backend: &str) -> String {
    match backend {
        "mariadb" => "mysql".to_string(),
        other => other.to_string(),
    }
}

/// SeaORM-based counter store
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    /// 打开连接并运行迁移
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let database_url = config.database_url.trim();
        if database_url.is_empty() {
            return Err(RotatorError::database_config("database_url is not set"));
        }

        let backend_name = normalize_backend_name(&infer_backend_from_url(database_url)?);

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, config).await?
        } else {
            connect_generic(database_url, &backend_name, config).await?
        };

        run_migrations(&db).await?;

        info!("{} storage initialized", backend_name.to_uppercase());
        Ok(SeaOrmStorage { db, backend_name })
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接（测试和健康检查使用）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 连通性检查
    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await.map_err(RotatorError::from)
    }

    /// 关闭连接池。之后的所有操作都会返回 StoreUnavailable
    pub async fn close(&self) -> Result<()> {
        if let Err(e) = self.db.clone().close().await {
            warn!("Failed to close {} storage: {}", self.backend_name, e);
            return Err(RotatorError::from(e).with_context("close"));
        }
        info!("{} storage closed", self.backend_name.to_uppercase());
        Ok(())
    }
}
