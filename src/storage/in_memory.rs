use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{ChannelType, DebtObligation, ExpenseTransaction};
use crate::storage::{BatchSettleResult, SettleOutcome, Storage};

#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

pub struct InMemoryStorage {
    transactions: Mutex<HashMap<Uuid, ExpenseTransaction>>,
    obligations: Mutex<HashMap<Uuid, DebtObligation>>,
    #[cfg(test)]
    fail_obligation_write: AtomicBool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            transactions: Mutex::new(HashMap::new()),
            obligations: Mutex::new(HashMap::new()),
            #[cfg(test)]
            fail_obligation_write: AtomicBool::new(false),
        }
    }

    /// Make the next create fail between the transaction write and the
    /// obligation writes, to exercise the rollback path.
    #[cfg(test)]
    pub fn fail_next_obligation_write(&self) {
        self.fail_obligation_write.store(true, Ordering::SeqCst);
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_transaction_with_obligations(
        &self,
        tx: ExpenseTransaction,
        obligations: Vec<DebtObligation>,
    ) -> Result<Uuid, LedgerError> {
        // Both maps are locked for the whole write, so readers observe the
        // transaction and its obligations together or not at all.
        let mut transactions = self.transactions.lock().await;
        let mut all_obligations = self.obligations.lock().await;

        let tx_id = tx.id;
        transactions.insert(tx_id, tx);

        #[cfg(test)]
        if self.fail_obligation_write.swap(false, Ordering::SeqCst) {
            // Simulated failure after the transaction row: roll it back so
            // no orphaned transaction is visible.
            transactions.remove(&tx_id);
            return Err(LedgerError::StorageError(
                "obligation write failed".to_string(),
            ));
        }

        for obligation in obligations {
            all_obligations.insert(obligation.id, obligation);
        }
        Ok(tx_id)
    }

    async fn get_transaction(
        &self,
        id: Uuid,
    ) -> Result<Option<ExpenseTransaction>, LedgerError> {
        Ok(self.transactions.lock().await.get(&id).cloned())
    }

    async fn get_transactions(
        &self,
        trip_id: Uuid,
    ) -> Result<Vec<ExpenseTransaction>, LedgerError> {
        // For production: use a database query with an index on trip_id
        Ok(self
            .transactions
            .lock()
            .await
            .values()
            .filter(|tx| tx.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn get_obligation(&self, id: Uuid) -> Result<Option<DebtObligation>, LedgerError> {
        Ok(self.obligations.lock().await.get(&id).cloned())
    }

    async fn get_obligations(
        &self,
        transaction_ids: &[Uuid],
    ) -> Result<Vec<DebtObligation>, LedgerError> {
        Ok(self
            .obligations
            .lock()
            .await
            .values()
            .filter(|ob| transaction_ids.contains(&ob.transaction_id))
            .cloned()
            .collect())
    }

    async fn settle_obligation(
        &self,
        id: Uuid,
        method: ChannelType,
        settled_at: DateTime<Utc>,
    ) -> Result<SettleOutcome, LedgerError> {
        // Check and update happen under one lock, the in-memory equivalent
        // of `UPDATE .. WHERE id = ? AND settled = false`.
        let mut obligations = self.obligations.lock().await;
        let obligation = obligations
            .get_mut(&id)
            .ok_or(LedgerError::ObligationNotFound(id))?;

        if obligation.settled {
            return Ok(SettleOutcome::AlreadySettled);
        }

        obligation.settled = true;
        obligation.settled_at = Some(settled_at);
        obligation.settlement_method = Some(method);
        Ok(SettleOutcome::Settled(obligation.clone()))
    }

    async fn settle_obligations_batch(
        &self,
        ids: &[Uuid],
        method: ChannelType,
        settled_at: DateTime<Utc>,
    ) -> Result<BatchSettleResult, LedgerError> {
        let mut obligations = self.obligations.lock().await;
        let mut settled_count = 0;
        let mut conflicted_ids = Vec::new();

        for &id in ids {
            // Missing and already-settled rows both mean the conditional
            // update matched zero rows; neither aborts the rest of the batch.
            let Some(obligation) = obligations.get_mut(&id) else {
                conflicted_ids.push(id);
                continue;
            };
            if obligation.settled {
                conflicted_ids.push(id);
                continue;
            }
            obligation.settled = true;
            obligation.settled_at = Some(settled_at);
            obligation.settlement_method = Some(method);
            settled_count += 1;
        }

        Ok(BatchSettleResult {
            settled_count,
            conflicted_ids,
        })
    }
}
