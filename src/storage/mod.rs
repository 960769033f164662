use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SeaOrmStorage;
pub use memory::MemoryStore;
pub use models::{LinkRecord, ResolvedLink, Visit};

/// 链接存储抽象
///
/// 存储层独占所有 LinkRecord，是唯一性约束的唯一执行点。
/// `record_visit_and_fetch` 对同一记录必须是原子的：并发访问全部保留，不丢更新。
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// 创建新记录（visits 为空）。id 已存在时返回 `DuplicateId`。
    async fn insert(&self, id: &str, destination: &str) -> Result<LinkRecord>;

    /// 追加一条访问记录并返回目标地址。id 不存在时返回 `NotFound`，且不做任何修改。
    async fn record_visit_and_fetch(&self, id: &str, timestamp: i64) -> Result<ResolvedLink>;

    /// 只读查询
    async fn fetch(&self, id: &str) -> Result<LinkRecord>;

    fn backend_name(&self) -> &str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<dyn LinkStore>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        // 从 URL 自动推断存储类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        if backend_type == "memory" {
            return Ok(Arc::new(MemoryStore::new()));
        }

        let storage = SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
