//! In-memory record store gateway.
//!
//! Backs local and demo deployments and tests. Records live in a
//! `BTreeMap` keyed by id; listing sorts by name on every call so the
//! ordering contract matches the hosted store.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{AlumniRepository, AlumniRepositoryError, StoreQuery};
use crate::domain::{AlumniDraft, AlumniId, AlumniPatch, AlumniRecord};

use super::auto_id::generate_auto_id;

/// Gateway over a process-local collection.
pub struct InMemoryAlumniRepository {
    records: RwLock<BTreeMap<AlumniId, AlumniRecord>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAlumniRepository {
    /// Create an empty collection stamped by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            clock,
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize, AlumniRepositoryError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AlumniRepositoryError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<AlumniId, AlumniRecord>>, AlumniRepositoryError> {
        self.records
            .read()
            .map_err(|_| AlumniRepositoryError::query("in-memory store lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<AlumniId, AlumniRecord>>, AlumniRepositoryError> {
        self.records
            .write()
            .map_err(|_| AlumniRepositoryError::query("in-memory store lock poisoned"))
    }

    fn sorted<'a>(records: impl Iterator<Item = &'a AlumniRecord>) -> Vec<AlumniRecord> {
        let mut out: Vec<AlumniRecord> = records.cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        out
    }
}

#[async_trait]
impl AlumniRepository for InMemoryAlumniRepository {
    async fn list_all(&self) -> Result<Vec<AlumniRecord>, AlumniRepositoryError> {
        let records = self.read()?;
        Ok(Self::sorted(records.values()))
    }

    async fn find_by_id(
        &self,
        id: &AlumniId,
    ) -> Result<Option<AlumniRecord>, AlumniRepositoryError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn create(&self, draft: &AlumniDraft) -> Result<AlumniRecord, AlumniRepositoryError> {
        let mut records = self.write()?;
        let id = loop {
            let candidate = generate_auto_id()?;
            if !records.contains_key(&candidate) {
                break candidate;
            }
        };
        let record = AlumniRecord::from_draft(id.clone(), draft, self.clock.utc());
        records.insert(id, record.clone());
        debug!(id = %record.id, "in-memory record inserted");
        Ok(record)
    }

    async fn update(&self, id: &AlumniId, patch: &AlumniPatch) -> Result<(), AlumniRepositoryError> {
        let now = self.clock.utc();
        let mut records = self.write()?;
        let record = records
            .get_mut(id)
            .ok_or_else(|| AlumniRepositoryError::not_found(id.to_string()))?;
        record.apply_patch(patch, now);
        Ok(())
    }

    async fn delete(&self, id: &AlumniId) -> Result<(), AlumniRepositoryError> {
        self.write()?.remove(id);
        Ok(())
    }

    async fn query(&self, query: &StoreQuery) -> Result<Vec<AlumniRecord>, AlumniRepositoryError> {
        let records = self.read()?;
        Ok(Self::sorted(
            records.values().filter(|record| query.matches(record)),
        ))
    }
}
