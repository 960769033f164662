//! LinkService tests
//!
//! Runs the create / resolve / analytics flows against both the in-memory
//! store and a temporary SQLite database.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use clicktrail::config::init_config;
use clicktrail::errors::ClicktrailError;
use clicktrail::services::{IdGenerator, LinkService, RandomIdGenerator};
use clicktrail::storage::{LinkStore, MemoryStore, SeaOrmStorage};
use futures_util::future::join_all;
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

fn memory_service() -> Arc<LinkService> {
    Arc::new(LinkService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(RandomIdGenerator::default()),
    ))
}

async fn sqlite_service() -> (Arc<LinkService>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("links.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    let service = LinkService::new(Arc::new(storage), Arc::new(RandomIdGenerator::default()));
    (Arc::new(service), temp_dir)
}

/// 按脚本顺序返回 id，脚本耗尽后返回最后一个
struct ScriptedGenerator {
    ids: Mutex<VecDeque<String>>,
    last: String,
}

impl ScriptedGenerator {
    fn new(ids: &[&str]) -> Self {
        Self {
            ids: Mutex::new(ids.iter().map(|s| s.to_string()).collect()),
            last: ids.last().map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

impl IdGenerator for ScriptedGenerator {
    fn generate(&self) -> String {
        self.ids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.clone())
    }
}

// =============================================================================
// Shared flows
// =============================================================================

async fn check_create_then_empty_analytics(service: &LinkService) {
    let id = service
        .create_short_link("https://example.com")
        .await
        .unwrap();
    assert!(!id.is_empty());

    let analytics = service.get_analytics(&id).await.unwrap();
    assert_eq!(analytics.total_clicks, 0);
    assert!(analytics.analytics.is_empty());
}

async fn check_resolve_records_visit(service: &LinkService) {
    let id = service
        .create_short_link("https://example.com")
        .await
        .unwrap();

    let before = chrono::Utc::now().timestamp_millis();
    let destination = service.resolve_and_track(&id).await.unwrap();
    let after = chrono::Utc::now().timestamp_millis();
    assert_eq!(destination, "https://example.com");

    let analytics = service.get_analytics(&id).await.unwrap();
    assert_eq!(analytics.total_clicks, 1);
    assert_eq!(analytics.analytics.len(), 1);
    let ts = analytics.analytics[0].timestamp;
    assert!(ts >= before && ts <= after, "timestamp {} not in [{}, {}]", ts, before, after);
}

async fn check_unknown_id(service: &LinkService) {
    let err = service.resolve_and_track("doesnotexist").await.unwrap_err();
    assert!(matches!(err, ClicktrailError::NotFound(_)));

    let err = service.get_analytics("doesnotexist").await.unwrap_err();
    assert!(matches!(err, ClicktrailError::NotFound(_)));
}

async fn check_concurrent_resolves(service: Arc<LinkService>, count: usize) {
    let id = service
        .create_short_link("https://example.com/hot")
        .await
        .unwrap();

    let handles: Vec<_> = (0..count)
        .map(|_| {
            let service = service.clone();
            let id = id.clone();
            tokio::spawn(async move { service.resolve_and_track(&id).await })
        })
        .collect();

    for result in join_all(handles).await {
        assert_eq!(result.unwrap().unwrap(), "https://example.com/hot");
    }

    let analytics = service.get_analytics(&id).await.unwrap();
    assert_eq!(analytics.total_clicks, count);
    assert_eq!(analytics.analytics.len(), count);
}

// =============================================================================
// Memory store
// =============================================================================

mod memory {
    use super::*;

    #[tokio::test]
    async fn test_create_then_empty_analytics() {
        check_create_then_empty_analytics(&memory_service()).await;
    }

    #[tokio::test]
    async fn test_resolve_records_visit() {
        check_resolve_records_visit(&memory_service()).await;
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        check_unknown_id(&memory_service()).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resolves_lose_nothing() {
        check_concurrent_resolves(memory_service(), 100).await;
    }
}

// =============================================================================
// SQLite store
// =============================================================================

mod sqlite {
    use super::*;

    #[tokio::test]
    async fn test_create_then_empty_analytics() {
        let (service, _dir) = sqlite_service().await;
        check_create_then_empty_analytics(&service).await;
    }

    #[tokio::test]
    async fn test_resolve_records_visit() {
        let (service, _dir) = sqlite_service().await;
        check_resolve_records_visit(&service).await;
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (service, _dir) = sqlite_service().await;
        check_unknown_id(&service).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resolves_lose_nothing() {
        let (service, _dir) = sqlite_service().await;
        check_concurrent_resolves(service, 100).await;
    }
}

// =============================================================================
// Creation edge cases
// =============================================================================

#[tokio::test]
async fn test_empty_destination_is_rejected_without_record() {
    let store = Arc::new(MemoryStore::new());
    let service = LinkService::new(store.clone(), Arc::new(RandomIdGenerator::default()));

    let err = service.create_short_link("").await.unwrap_err();
    assert!(matches!(err, ClicktrailError::Validation(_)));
    assert_eq!(err.message(), "url is required");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_destination_is_stored_verbatim() {
    let service = memory_service();

    for destination in ["not a url", "ftp://files.example.com/a b", "https://例子.测试/路径"] {
        let id = service.create_short_link(destination).await.unwrap();
        assert_eq!(service.resolve_and_track(&id).await.unwrap(), destination);
    }
}

#[tokio::test]
async fn test_same_destination_gets_distinct_ids() {
    let service = memory_service();

    let first = service.create_short_link("https://example.com").await.unwrap();
    let second = service.create_short_link("https://example.com").await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_collision_is_retried_with_fresh_id() {
    let store = Arc::new(MemoryStore::new());
    store.insert("taken", "https://first.example.com").await.unwrap();

    let generator = Arc::new(ScriptedGenerator::new(&["taken", "taken", "fresh"]));
    let service = LinkService::new(store.clone(), generator);

    let id = service
        .create_short_link("https://second.example.com")
        .await
        .unwrap();
    assert_eq!(id, "fresh");

    // 被占用的记录保持不变
    let original = store.fetch("taken").await.unwrap();
    assert_eq!(original.destination, "https://first.example.com");
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_persistent_collision_exhausts_attempts() {
    let store = Arc::new(MemoryStore::new());
    store.insert("taken", "https://first.example.com").await.unwrap();

    let service = LinkService::new(store.clone(), Arc::new(ScriptedGenerator::new(&["taken"])))
        .with_max_create_attempts(3);

    let err = service
        .create_short_link("https://second.example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, ClicktrailError::GenerationExhausted(_)));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_visits_on_one_link_do_not_touch_another() {
    let service = memory_service();

    let a = service.create_short_link("https://a.example.com").await.unwrap();
    let b = service.create_short_link("https://b.example.com").await.unwrap();

    for _ in 0..3 {
        service.resolve_and_track(&a).await.unwrap();
    }

    assert_eq!(service.get_analytics(&a).await.unwrap().total_clicks, 3);
    assert_eq!(service.get_analytics(&b).await.unwrap().total_clicks, 0);
}
