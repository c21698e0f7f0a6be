//! Persistence of refined records.
//!
//! The pipeline only produces [`RefinedRecord`]s; a [`RecordStore`] owns ids,
//! ownership and timestamps, and rejects a second record for the same url.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::results::RefinedRecord;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// A persisted [`RefinedRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub id: Uuid,
    /// Owner who saved the record
    pub scraped_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: RefinedRecord,
}

/// Criteria for [`RecordStore::find_many`]; empty criteria match everything
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub scraped_by: Option<String>,
    /// Case-insensitive substring of the record url
    pub url_contains: Option<String>,
}

impl RecordFilter {
    fn matches(&self, stored: &StoredRecord) -> bool {
        if let Some(owner) = &self.scraped_by {
            if &stored.scraped_by != owner {
                return false;
            }
        }
        if let Some(needle) = &self.url_contains {
            if !stored
                .record
                .url
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.limit)
    }
}

/// One page of results and the number of matches overall
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a record for `owner`. Fails with [`StoreError::Conflict`] when a
    /// record with the same url exists.
    async fn create(&self, record: RefinedRecord, owner: &str)
    -> Result<StoredRecord, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Option<StoredRecord>;

    /// Matching records, newest first
    async fn find_many(&self, filter: &RecordFilter, pagination: Pagination)
    -> Page<StoredRecord>;

    async fn delete_by_id(&self, id: Uuid) -> Result<StoredRecord, StoreError>;
}

/// In-process [`RecordStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Uuid, StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(
        &self,
        record: RefinedRecord,
        owner: &str,
    ) -> Result<StoredRecord, StoreError> {
        let mut records = self.records.write().await;
        if records.values().any(|stored| stored.record.url == record.url) {
            ::log::warn!("Duplicate save rejected for {}", record.url);
            return Err(StoreError::Conflict { url: record.url });
        }

        let now = Utc::now();
        let stored = StoredRecord {
            id: Uuid::new_v4(),
            scraped_by: owner.to_string(),
            created_at: now,
            updated_at: now,
            record,
        };
        records.insert(stored.id, stored.clone());
        ::log::info!("Saved {} as {}", stored.record.url, stored.id);
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Option<StoredRecord> {
        self.records.read().await.get(&id).cloned()
    }

    async fn find_many(
        &self,
        filter: &RecordFilter,
        pagination: Pagination,
    ) -> Page<StoredRecord> {
        let records = self.records.read().await;
        let mut matching: Vec<&StoredRecord> =
            records.values().filter(|stored| filter.matches(stored)).collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.record.url.cmp(&b.record.url))
        });

        Page {
            total: matching.len(),
            items: matching
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.limit)
                .cloned()
                .collect(),
            page: pagination.page,
            limit: pagination.limit,
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<StoredRecord, StoreError> {
        self.records
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }
}
