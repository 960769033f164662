//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, SqlErr, TransactionTrait,
    sea_query::Expr,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use crate::errors::{ClicktrailError, Result};
use crate::storage::{LinkRecord, ResolvedLink, Visit};

use migration::entities::{link, link_visit};

impl SeaOrmStorage {
    /// 插入新链接，主键冲突映射为 `DuplicateId`
    pub async fn insert_link(&self, id: &str, destination: &str) -> Result<LinkRecord> {
        let now = Utc::now();
        let active_model = link::ActiveModel {
            short_code: Set(id.to_string()),
            destination: Set(destination.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match link::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
        {
            Ok(_) => {
                info!("Short link inserted: {}", id);
                Ok(LinkRecord::new(id, destination, now))
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Err(
                ClicktrailError::duplicate_id(format!("Short id already exists: {}", id)),
            ),
            Err(e) => Err(ClicktrailError::storage_unavailable(format!(
                "插入短链接 '{}' 失败: {}",
                id, e
            ))),
        }
    }

    /// 原子追加一条访问记录
    ///
    /// 事务的第一条语句就是对 links 行的写入，先拿到写锁再插入访问行；
    /// 每次访问是独立的一行，并发追加互不覆盖。
    pub async fn append_visit(&self, id: &str, timestamp: i64) -> Result<ResolvedLink> {
        let txn = self.db.begin().await.map_err(|e| {
            ClicktrailError::storage_unavailable(format!("开始事务失败: {}", e))
        })?;

        let updated_at = DateTime::from_timestamp_millis(timestamp).unwrap_or_else(Utc::now);
        let touched = link::Entity::update_many()
            .col_expr(link::Column::UpdatedAt, Expr::value(updated_at))
            .filter(link::Column::ShortCode.eq(id))
            .exec(&txn)
            .await?;

        // MySQL 在值未变化时 rows_affected 为 0，需要再确认一次是否存在
        let model = if touched.rows_affected == 0 {
            link::Entity::find_by_id(id.to_string()).one(&txn).await?
        } else {
            None
        };
        if touched.rows_affected == 0 && model.is_none() {
            txn.rollback().await?;
            debug!("Visit rejected, link not found: {}", id);
            return Err(ClicktrailError::not_found(format!(
                "Short link not found: {}",
                id
            )));
        }

        link_visit::Entity::insert(link_visit::ActiveModel {
            short_code: Set(id.to_string()),
            timestamp: Set(timestamp),
            ..Default::default()
        })
        .exec_without_returning(&txn)
        .await?;

        let model = match model {
            Some(model) => model,
            None => link::Entity::find_by_id(id.to_string())
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ClicktrailError::storage_unavailable(format!(
                        "Link '{}' vanished during visit append",
                        id
                    ))
                })?,
        };

        txn.commit().await.map_err(|e| {
            ClicktrailError::storage_unavailable(format!("提交事务失败: {}", e))
        })?;

        Ok(ResolvedLink {
            id: model.short_code,
            destination: model.destination,
            visit: Visit { timestamp },
        })
    }
}
