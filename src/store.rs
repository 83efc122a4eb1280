use crate::submission::SubmissionRecord;
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;
use thiserror::Error;

/// Read or write failure against the submission store backend. Callers log
/// it and carry on with whatever data they already have; there is no retry.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("submission store unavailable: {0}")]
    Unavailable(String),
}

/// The external key-value store submissions live in, keyed by
/// `(submitter_id, week_start)` with last-write-wins upsert semantics.
pub trait SubmissionStore {
    /// Inserts or fully replaces the record under its identity key.
    fn upsert(&mut self, record: SubmissionRecord) -> Result<(), StoreError>;

    /// Looks up one submitter's record for a week.
    fn get(
        &self,
        submitter_id: &str,
        week_start: NaiveDate,
    ) -> Result<Option<SubmissionRecord>, StoreError>;

    /// All records for a week, ordered by submitter id.
    fn query_week(&self, week_start: NaiveDate) -> Result<Vec<SubmissionRecord>, StoreError>;
}

/// In-memory store used by tests and single-process deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<(String, NaiveDate), SubmissionRecord>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SubmissionStore for MemoryStore {
    fn upsert(&mut self, record: SubmissionRecord) -> Result<(), StoreError> {
        let key = (record.submitter_id.clone(), record.week_start);
        if self.records.insert(key, record).is_some() {
            debug!("replaced prior submission on upsert");
        }
        Ok(())
    }

    fn get(
        &self,
        submitter_id: &str,
        week_start: NaiveDate,
    ) -> Result<Option<SubmissionRecord>, StoreError> {
        Ok(self
            .records
            .get(&(submitter_id.to_string(), week_start))
            .cloned())
    }

    fn query_week(&self, week_start: NaiveDate) -> Result<Vec<SubmissionRecord>, StoreError> {
        Ok(self
            .records
            .values()
            .filter(|record| record.week_start == week_start)
            .cloned()
            .collect())
    }
}
