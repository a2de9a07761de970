//! # Case Store
//!
//! Persistence seam for KYC cases and their check records.
//!
//! Two implementations exist: [`MemoryCaseStore`] (default, process-local)
//! and [`crate::db::cases::PgCaseStore`] (when `DATABASE_URL` is set). Both
//! write a case and all of its checks as one unit: either every row lands or
//! none does.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use verifyflow_core::{CaseId, CaseRecord, StoredCase};

/// Errors from a case store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A case with this identifier is already stored.
    #[error("case {0} already exists")]
    Duplicate(CaseId),

    /// The database rejected or failed a statement.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read and write access to stored cases.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Persist a case together with its checks, atomically.
    async fn create_case(&self, case: &StoredCase) -> Result<(), StoreError>;

    /// Fetch one case and its checks. Unknown ids yield `Ok(None)`.
    async fn get_case(&self, id: &str) -> Result<Option<StoredCase>, StoreError>;

    /// Every case with its checks, newest `created_at` first.
    async fn list_cases(&self) -> Result<Vec<StoredCase>, StoreError>;

    /// Every case record without checks. Used for statistics.
    async fn list_case_records(&self) -> Result<Vec<CaseRecord>, StoreError>;

    /// Short backend label for logs.
    fn backend(&self) -> &'static str;
}

/// Newest first; identical timestamps fall back to descending id.
pub(crate) fn newest_first(a: &CaseRecord, b: &CaseRecord) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.as_str().cmp(a.id.as_str()))
}

/// Process-local case store.
///
/// The `parking_lot` lock is never held across an `.await`, so a single
/// write guard covers the duplicate check and the insert.
#[derive(Debug, Clone, Default)]
pub struct MemoryCaseStore {
    cases: Arc<RwLock<HashMap<CaseId, StoredCase>>>,
}

impl MemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CaseStore for MemoryCaseStore {
    async fn create_case(&self, case: &StoredCase) -> Result<(), StoreError> {
        let mut guard = self.cases.write();
        if guard.contains_key(&case.case.id) {
            return Err(StoreError::Duplicate(case.case.id.clone()));
        }
        guard.insert(case.case.id.clone(), case.clone());
        Ok(())
    }

    async fn get_case(&self, id: &str) -> Result<Option<StoredCase>, StoreError> {
        Ok(self.cases.read().get(id).cloned())
    }

    async fn list_cases(&self) -> Result<Vec<StoredCase>, StoreError> {
        let mut cases: Vec<StoredCase> = self.cases.read().values().cloned().collect();
        cases.sort_by(|a, b| newest_first(&a.case, &b.case));
        Ok(cases)
    }

    async fn list_case_records(&self) -> Result<Vec<CaseRecord>, StoreError> {
        let mut records: Vec<CaseRecord> = self
            .cases
            .read()
            .values()
            .map(|stored| stored.case.clone())
            .collect();
        records.sort_by(newest_first);
        Ok(records)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
