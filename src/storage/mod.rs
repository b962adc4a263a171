use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{ChannelType, DebtObligation, ExpenseTransaction};

/// Result of a single conditional settle.
#[derive(Clone, Debug)]
pub enum SettleOutcome {
    /// The CAS matched; carries the obligation's new state.
    Settled(DebtObligation),
    /// Zero rows matched the `settled = false` predicate.
    AlreadySettled,
}

/// Result of a bulk settle. Partial success is allowed and reported; each
/// individual transition is still atomic.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct BatchSettleResult {
    pub settled_count: usize,
    pub conflicted_ids: Vec<Uuid>,
}

/// Durable record of expense transactions and their derived obligations.
/// Only the settled fields of an obligation are ever mutated post-create,
/// and only through the conditional-update path.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Atomic: either the transaction and all its obligations become durably
    /// visible, or none do.
    async fn create_transaction_with_obligations(
        &self,
        tx: ExpenseTransaction,
        obligations: Vec<DebtObligation>,
    ) -> Result<Uuid, LedgerError>;

    async fn get_transaction(
        &self,
        id: Uuid,
    ) -> Result<Option<ExpenseTransaction>, LedgerError>;

    async fn get_transactions(
        &self,
        trip_id: Uuid,
    ) -> Result<Vec<ExpenseTransaction>, LedgerError>;

    async fn get_obligation(&self, id: Uuid) -> Result<Option<DebtObligation>, LedgerError>;

    async fn get_obligations(
        &self,
        transaction_ids: &[Uuid],
    ) -> Result<Vec<DebtObligation>, LedgerError>;

    /// Conditional update: set settled = true, settled_at, settlement_method
    /// WHERE id = `id` AND settled = false. This predicate is the only
    /// concurrency control settlement has; no caller may replace it with a
    /// read-then-write.
    async fn settle_obligation(
        &self,
        id: Uuid,
        method: ChannelType,
        settled_at: DateTime<Utc>,
    ) -> Result<SettleOutcome, LedgerError>;

    /// Applies the same conditional update per id. An id that matches zero
    /// rows (already settled, or no such row) is reported in
    /// `conflicted_ids`; it never aborts the rest of the batch.
    async fn settle_obligations_batch(
        &self,
        ids: &[Uuid],
        method: ChannelType,
        settled_at: DateTime<Utc>,
    ) -> Result<BatchSettleResult, LedgerError>;
}

pub mod in_memory;
