//! In-process link store
//!
//! Each record lives in a `DashMap` entry; inserts go through the entry API and
//! visit appends happen under the entry's write guard, so concurrent appends to
//! the same id are serialized and none are lost.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use super::{LinkRecord, LinkStore, ResolvedLink, Visit};
use crate::errors::{ClicktrailError, Result};

#[derive(Default)]
pub struct MemoryStore {
    links: DashMap<String, LinkRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn insert(&self, id: &str, destination: &str) -> Result<LinkRecord> {
        match self.links.entry(id.to_string()) {
            Entry::Occupied(_) => Err(ClicktrailError::duplicate_id(format!(
                "Short id already exists: {}",
                id
            ))),
            Entry::Vacant(slot) => {
                let record = LinkRecord::new(id, destination, Utc::now());
                slot.insert(record.clone());
                debug!("MemoryStore: inserted '{}'", id);
                Ok(record)
            }
        }
    }

    async fn record_visit_and_fetch(&self, id: &str, timestamp: i64) -> Result<ResolvedLink> {
        let mut entry = self
            .links
            .get_mut(id)
            .ok_or_else(|| ClicktrailError::not_found(format!("Short link not found: {}", id)))?;

        let visit = Visit { timestamp };
        entry.visits.push(visit);
        entry.updated_at = DateTime::from_timestamp_millis(timestamp).unwrap_or_else(Utc::now);
        Ok(ResolvedLink {
            id: entry.id.clone(),
            destination: entry.destination.clone(),
            visit,
        })
    }

    async fn fetch(&self, id: &str) -> Result<LinkRecord> {
        self.links
            .get(id)
            .map(|entry| entry.clone())
            .ok_or_else(|| ClicktrailError::not_found(format!("Short link not found: {}", id)))
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
