//! Link service
//!
//! Orchestrates the three use cases (create, resolve and track, analytics)
//! against an `IdGenerator` and a `LinkStore`. Holds no link state of its own.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::errors::{ClicktrailError, Result};
use crate::services::id_generator::{IdGenerator, RandomIdGenerator};
use crate::storage::{LinkStore, Visit};

/// Default number of generate-and-insert attempts before giving up
pub const DEFAULT_MAX_CREATE_ATTEMPTS: u32 = 5;

/// Source of visit timestamps (milliseconds since the Unix epoch)
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Analytics snapshot for one short link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAnalytics {
    pub total_clicks: usize,
    pub analytics: Vec<Visit>,
}

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    max_create_attempts: u32,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>, generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            generator,
            clock: Arc::new(SystemClock),
            max_create_attempts: DEFAULT_MAX_CREATE_ATTEMPTS,
        }
    }

    /// Build a service with the generator settings from the global config
    pub fn from_config(store: Arc<dyn LinkStore>) -> Self {
        let config = crate::config::get_config();
        let generator = Arc::new(RandomIdGenerator::new(config.links.id_length));
        Self::new(store, generator).with_max_create_attempts(config.links.max_create_attempts)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// At least one attempt is always made.
    pub fn with_max_create_attempts(mut self, attempts: u32) -> Self {
        self.max_create_attempts = attempts.max(1);
        self
    }

    /// Create a short link for `destination` and return its id.
    ///
    /// Any non-empty string is accepted. A duplicate id from the store is
    /// retried with a fresh id up to `max_create_attempts` times.
    pub async fn create_short_link(&self, destination: &str) -> Result<String> {
        if destination.is_empty() {
            return Err(ClicktrailError::validation("url is required"));
        }

        for attempt in 1..=self.max_create_attempts {
            let id = self.generator.generate();
            match self.store.insert(&id, destination).await {
                Ok(record) => {
                    info!(
                        "LinkService: created link '{}' -> '{}'",
                        record.id, record.destination
                    );
                    return Ok(record.id);
                }
                Err(ClicktrailError::DuplicateId(_)) => {
                    warn!(
                        "LinkService: id collision on '{}' (attempt {}/{})",
                        id, attempt, self.max_create_attempts
                    );
                }
                Err(e) => {
                    error!("LinkService: failed to create link: {}", e);
                    return Err(e);
                }
            }
        }

        Err(ClicktrailError::generation_exhausted(format!(
            "Could not generate a unique id after {} attempts",
            self.max_create_attempts
        )))
    }

    /// Resolve `id` to its destination, recording exactly one visit.
    pub async fn resolve_and_track(&self, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(ClicktrailError::validation("short id is required"));
        }

        let timestamp = self.clock.now_millis();
        let resolved = self.store.record_visit_and_fetch(id, timestamp).await?;
        debug!(
            "LinkService: resolved '{}' -> '{}' at {}",
            resolved.id, resolved.destination, resolved.visit.timestamp
        );
        Ok(resolved.destination)
    }

    /// Point-in-time visit report for `id`.
    pub async fn get_analytics(&self, id: &str) -> Result<LinkAnalytics> {
        if id.is_empty() {
            return Err(ClicktrailError::validation("short id is required"));
        }

        let record = self.store.fetch(id).await?;
        Ok(LinkAnalytics {
            total_clicks: record.visits.len(),
            analytics: record.visits,
        })
    }
}
