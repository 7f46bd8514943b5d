//! In-memory payroll batch store.
//!
//! Holds the persisted [`PayrollBatch`] records and applies approval
//! transitions atomically: the guard is re-evaluated under the write lock
//! immediately before mutation, so two actors racing to transition the
//! same batch cannot both win. This read-guard-write atomicity is a
//! correctness requirement of the approval lifecycle, not an optimization.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::approval::{self, ApprovalAction};
use crate::error::{EngineError, EngineResult};
use crate::models::PayrollBatch;

/// Key for the period index: (company, year, month).
type PeriodKey = (Uuid, i32, u32);

/// Thread-safe store of payroll batches.
///
/// The external processing pipeline inserts batches; the approval state
/// machine is the only mutator of their approval axis.
#[derive(Debug, Default)]
pub struct BatchStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    batches: HashMap<Uuid, PayrollBatch>,
    by_period: HashMap<PeriodKey, Uuid>,
}

impl BatchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a batch handed off by the external processing pipeline.
    ///
    /// The period index always points at the most recently ingested batch
    /// for a (company, year, month).
    pub fn insert(&self, batch: PayrollBatch) -> PayrollBatch {
        let mut inner = self.inner.write().expect("batch store lock poisoned");
        inner
            .by_period
            .insert((batch.company_id, batch.year, batch.month), batch.id);
        inner.batches.insert(batch.id, batch.clone());
        batch
    }

    /// Fetches a batch by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BatchNotFound`] for unknown ids.
    pub fn get(&self, id: Uuid) -> EngineResult<PayrollBatch> {
        let inner = self.inner.read().expect("batch store lock poisoned");
        inner
            .batches
            .get(&id)
            .cloned()
            .ok_or(EngineError::BatchNotFound { id })
    }

    /// Fetches a batch by id within a company's tenant scope.
    ///
    /// A batch belonging to another company is reported as not found, not
    /// as forbidden: callers learn nothing about foreign tenants' batches.
    pub fn get_scoped(&self, id: Uuid, company_id: Uuid) -> EngineResult<PayrollBatch> {
        let batch = self.get(id)?;
        if batch.company_id != company_id {
            return Err(EngineError::BatchNotFound { id });
        }
        Ok(batch)
    }

    /// Finds a company's batch for a (year, month), if one was ingested.
    pub fn find_by_period(
        &self,
        company_id: Uuid,
        year: i32,
        month: u32,
    ) -> Option<PayrollBatch> {
        let inner = self.inner.read().expect("batch store lock poisoned");
        inner
            .by_period
            .get(&(company_id, year, month))
            .and_then(|id| inner.batches.get(id))
            .cloned()
    }

    /// Applies an approval action to a batch atomically.
    ///
    /// The current approval state is read and the guard evaluated under the
    /// write lock; mutation happens only if the guard still holds. A losing
    /// racer observes the winner's state and fails with
    /// [`EngineError::InvalidState`]. No partial mutation occurs on failure.
    pub fn apply_approval(
        &self,
        id: Uuid,
        action: &ApprovalAction,
        actor: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<PayrollBatch> {
        let mut inner = self.inner.write().expect("batch store lock poisoned");
        let batch = inner
            .batches
            .get_mut(&id)
            .ok_or(EngineError::BatchNotFound { id })?;
        approval::apply(batch, action, actor, now)?;
        Ok(batch.clone())
    }
}
