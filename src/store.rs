// ABOUTME: Run store abstraction keyed by activity id, plus the in-memory implementation
// ABOUTME: Upsert and date-ordered history retrieval; persistence backends live elsewhere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Run stores
//!
//! The store is the thin table surface the pipeline writes scored runs into:
//! records keyed by activity id, history read back oldest first. Mapping this
//! onto a hosted backend is a collaborator's job; [`MemoryStore`] covers the
//! CLI and the tests.

use async_trait::async_trait;
use runscore_core::RunRecord;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failure modes of a run store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or lost the operation
    #[error("store backend failure: {message}")]
    Backend {
        /// Backend-specific description
        message: String,
    },

    /// A stored record no longer decodes into the current schema
    #[error("stored record {id} is corrupt: {reason}")]
    Corrupt {
        /// Activity id of the offending record
        id: String,
        /// What failed to decode
        reason: String,
    },
}

/// Persistent home for scored runs
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Whether a record with this activity id is already stored
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot answer.
    async fn contains(&self, id: &str) -> Result<bool, StoreError>;

    /// Insert or replace the record with the same activity id
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the write is rejected or lost.
    async fn upsert(&self, record: RunRecord) -> Result<(), StoreError>;

    /// Fetch one record by activity id
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot answer.
    async fn get(&self, id: &str) -> Result<Option<RunRecord>, StoreError>;

    /// All stored records ordered by start date, oldest first
    ///
    /// Ties on start date break on activity id so the order is stable.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot answer.
    async fn history(&self) -> Result<Vec<RunRecord>, StoreError>;
}

/// In-memory run store
///
/// Interior mutability via an async `RwLock`, so one store can be shared
/// across the pipeline's concurrent tasks behind a shared reference.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, RunRecord>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RunStore for MemoryStore {
    async fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records.read().await.contains_key(id))
    }

    async fn upsert(&self, record: RunRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<RunRecord>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn history(&self) -> Result<Vec<RunRecord>, StoreError> {
        let mut records: Vec<RunRecord> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(records)
    }
}
