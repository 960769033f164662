use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::services::LinkService;
use crate::storage::{LinkStore, StorageFactory};

pub struct StartupContext {
    pub store: Arc<dyn LinkStore>,
    pub link_service: Arc<LinkService>,
    pub route_prefix: String,
}

/// 准备服务器启动的上下文
///
/// 存储只在这里构建一次，之后通过 `LinkService` 注入到各个 worker。
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = crate::config::get_config();

    let store = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", store.backend_name());

    let link_service = Arc::new(LinkService::from_config(store.clone()));
    debug!(
        "LinkService ready (id length {}, max create attempts {})",
        config.links.id_length, config.links.max_create_attempts
    );

    let route_prefix = normalize_route_prefix(&config.server.route_prefix);

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        store,
        link_service,
        route_prefix,
    })
}

/// 规范化路由前缀：保证以 `/` 开头、不以 `/` 结尾；空字符串或 `/` 表示挂载在根路径
pub fn normalize_route_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
