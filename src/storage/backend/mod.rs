//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{ClicktrailError, Result};
use crate::storage::{LinkRecord, LinkStore, ResolvedLink};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_record, visit_model_to_visit};

/// 从数据库 URL 推断存储类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url == "memory" {
        Ok("memory".to_string())
    } else if database_url.starts_with("sqlite:")
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
        Err(ClicktrailError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: memory, sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ClicktrailError::database_config(
                "DATABASE_URL 未设置".to_string(),
            ));
        }

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        Self::from_connection(db, backend_name).await
    }

    /// 基于已有连接构建（会运行迁移）
    pub async fn from_connection(db: DatabaseConnection, backend_name: &str) -> Result<Self> {
        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }
}

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn insert(&self, id: &str, destination: &str) -> Result<LinkRecord> {
        self.insert_link(id, destination).await
    }

    async fn record_visit_and_fetch(&self, id: &str, timestamp: i64) -> Result<ResolvedLink> {
        self.append_visit(id, timestamp).await
    }

    async fn fetch(&self, id: &str) -> Result<LinkRecord> {
        self.get(id)
            .await?
            .ok_or_else(|| ClicktrailError::not_found(format!("Short link not found: {}", id)))
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
