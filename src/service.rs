use chrono::Utc;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::directory::{resolve_primary, ChannelDirectory};
use crate::error::LedgerError;
use crate::identity::IdentityResolver;
use crate::ledger::build_ledger;
use crate::models::transaction::equal_share;
use crate::models::{
    BalanceSummary, ChannelType, DebtObligation, ExpenseTransaction, PaymentChannel,
    PersonalBalance,
};
use crate::storage::{BatchSettleResult, SettleOutcome, Storage};

/// Input for expense creation. The split count is derived from the
/// participant set; obligation amounts are computed here, never by callers.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub trip_id: Uuid,
    pub payer_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
    pub participant_ids: Vec<Uuid>,
    pub preferred_channel_types: Vec<ChannelType>,
}

pub struct LedgerService<S: Storage, D: ChannelDirectory, I: IdentityResolver> {
    pub storage: S,
    pub directory: D,
    pub identity: I,
}

impl<S: Storage, D: ChannelDirectory, I: IdentityResolver> LedgerService<S, D, I> {
    pub fn new(storage: S, directory: D, identity: I) -> Self {
        info!("Initializing LedgerService");
        LedgerService {
            storage,
            directory,
            identity,
        }
    }

    // EXPENSE CREATION

    pub async fn create_expense(&self, expense: NewExpense) -> Result<Uuid, LedgerError> {
        info!(
            "Creating expense in trip {} paid by {} for {} {}",
            expense.trip_id, expense.payer_id, expense.amount, expense.currency
        );

        if expense.amount <= Decimal::ZERO {
            warn!("Rejected non-positive amount {}", expense.amount);
            return Err(LedgerError::NonPositiveAmount(expense.amount));
        }
        if expense.participant_ids.is_empty() {
            return Err(LedgerError::EmptyParticipants);
        }
        for (i, id) in expense.participant_ids.iter().enumerate() {
            if expense.participant_ids[..i].contains(id) {
                return Err(LedgerError::DuplicateParticipant(*id));
            }
        }
        if expense.currency.len() != 3
            || !expense.currency.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(LedgerError::InvalidCurrency(expense.currency));
        }

        let split_count = expense.participant_ids.len() as u32;
        let share = equal_share(expense.amount, split_count, &expense.currency);

        let tx = ExpenseTransaction {
            id: Uuid::new_v4(),
            trip_id: expense.trip_id,
            payer_id: expense.payer_id,
            amount: expense.amount,
            currency: expense.currency,
            description: expense.description,
            split_count,
            participant_ids: expense.participant_ids,
            preferred_channel_types: expense.preferred_channel_types,
            created_at: Utc::now(),
        };

        // One obligation per non-payer participant. The payer never owes
        // themselves, even when listed as a participant; the rounding
        // remainder stays with their unobliged share.
        let obligations: Vec<DebtObligation> = tx
            .participant_ids
            .iter()
            .filter(|&&debtor| debtor != tx.payer_id)
            .map(|&debtor| DebtObligation::new(tx.id, debtor, share))
            .collect();

        let tx_id = self
            .storage
            .create_transaction_with_obligations(tx, obligations)
            .await?;
        debug!("Expense created with transaction ID {}", tx_id);
        Ok(tx_id)
    }

    // BALANCE SUMMARY

    /// Recomputes the viewer's position from the store on every call. Store
    /// fetch failures propagate; per-counterparty profile and channel lookup
    /// failures degrade to placeholders and a warning instead of failing the
    /// whole summary.
    pub async fn get_balance_summary(
        &self,
        trip_id: Uuid,
        viewer_id: Uuid,
    ) -> Result<BalanceSummary, LedgerError> {
        debug!(
            "Computing balance summary for viewer {} in trip {}",
            viewer_id, trip_id
        );
        let transactions = self.storage.get_transactions(trip_id).await?;
        let tx_ids: Vec<Uuid> = transactions.iter().map(|tx| tx.id).collect();
        let obligations = self.storage.get_obligations(&tx_ids).await?;

        let ledger = build_ledger(viewer_id, &transactions, &obligations)?;

        let mut entries: Vec<_> = ledger.into_iter().collect();
        // Ascending by net: the viewer's own debts surface first. Id breaks
        // ties so the ordering is deterministic.
        entries.sort_by(|a, b| (a.1.net_amount, a.0).cmp(&(b.1.net_amount, b.0)));

        let mut balances = Vec::with_capacity(entries.len());
        let mut warnings = Vec::new();
        let mut total_owed = Decimal::ZERO;
        let mut total_owed_to_you = Decimal::ZERO;

        for (counterparty_id, entry) in entries {
            if entry.net_amount < Decimal::ZERO {
                total_owed -= entry.net_amount;
            } else {
                total_owed_to_you += entry.net_amount;
            }

            let (display_name, avatar_url) =
                match self.identity.get_profile(counterparty_id).await {
                    Ok(Some(profile)) => (profile.display_name, profile.avatar_url),
                    Ok(None) => (placeholder_name(counterparty_id), None),
                    Err(e) => {
                        warn!("Profile lookup failed for {}: {}", counterparty_id, e);
                        warnings.push(format!("profile lookup failed for {}", counterparty_id));
                        (placeholder_name(counterparty_id), None)
                    }
                };

            let resolved_channel = match self.directory.get_channels(counterparty_id).await {
                Ok(channels) => resolve_primary(&channels).cloned(),
                Err(e) => {
                    warn!("Channel lookup failed for {}: {}", counterparty_id, e);
                    warnings.push(format!("channel lookup failed for {}", counterparty_id));
                    None
                }
            };

            balances.push(PersonalBalance {
                counterparty_id,
                display_name,
                avatar_url,
                net_amount: entry.net_amount,
                resolved_channel,
                contributing: entry.contributing,
            });
        }

        Ok(BalanceSummary {
            total_owed,
            total_owed_to_you,
            net_balance: total_owed_to_you - total_owed,
            balances,
            warnings,
        })
    }

    // SETTLEMENT

    /// Marks one obligation paid. The Unsettled -> Settled transition is
    /// terminal; losing the CAS surfaces as `SettlementConflict`, a normal
    /// flow branch telling the caller to refresh, not an alarm.
    pub async fn settle_one(
        &self,
        obligation_id: Uuid,
        method: ChannelType,
    ) -> Result<DebtObligation, LedgerError> {
        info!(
            "Settling obligation {} via {}",
            obligation_id, method
        );
        match self
            .storage
            .settle_obligation(obligation_id, method, Utc::now())
            .await?
        {
            SettleOutcome::Settled(obligation) => Ok(obligation),
            SettleOutcome::AlreadySettled => {
                warn!("Obligation {} was already settled", obligation_id);
                Err(LedgerError::SettlementConflict(obligation_id))
            }
        }
    }

    /// Settles every open obligation between the two parties, in both
    /// directions, as of call time. Obligations that lose their CAS to a
    /// concurrent settle are reported in `conflicted_ids`.
    pub async fn settle_all_with_counterparty(
        &self,
        trip_id: Uuid,
        viewer_id: Uuid,
        counterparty_id: Uuid,
        method: ChannelType,
    ) -> Result<BatchSettleResult, LedgerError> {
        info!(
            "Settling all obligations between {} and {} in trip {} via {}",
            viewer_id, counterparty_id, trip_id, method
        );
        let transactions = self.storage.get_transactions(trip_id).await?;
        let tx_ids: Vec<Uuid> = transactions.iter().map(|tx| tx.id).collect();
        let obligations = self.storage.get_obligations(&tx_ids).await?;

        let payer_of = |tx_id: Uuid| {
            transactions
                .iter()
                .find(|tx| tx.id == tx_id)
                .map(|tx| tx.payer_id)
        };

        let ids: Vec<Uuid> = obligations
            .iter()
            .filter(|ob| !ob.settled)
            .filter(|ob| {
                let payer = payer_of(ob.transaction_id);
                (payer == Some(viewer_id) && ob.debtor_id == counterparty_id)
                    || (payer == Some(counterparty_id) && ob.debtor_id == viewer_id)
            })
            .map(|ob| ob.id)
            .collect();

        if ids.is_empty() {
            debug!(
                "No open obligations between {} and {}",
                viewer_id, counterparty_id
            );
            return Ok(BatchSettleResult {
                settled_count: 0,
                conflicted_ids: Vec::new(),
            });
        }

        self.storage
            .settle_obligations_batch(&ids, method, Utc::now())
            .await
    }

    // CHANNEL DIRECTORY PASS-THROUGH

    pub async fn channels(&self, user_id: Uuid) -> Result<Vec<PaymentChannel>, LedgerError> {
        self.directory.get_channels(user_id).await
    }

    pub async fn save_channels(
        &self,
        user_id: Uuid,
        channels: Vec<PaymentChannel>,
    ) -> Result<(), LedgerError> {
        info!("Saving {} channels for user {}", channels.len(), user_id);
        self.directory.save_channels(user_id, channels).await
    }

    pub async fn primary_channel(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PaymentChannel>, LedgerError> {
        let channels = self.directory.get_channels(user_id).await?;
        Ok(resolve_primary(&channels).cloned())
    }
}

fn placeholder_name(user_id: Uuid) -> String {
    let id = user_id.to_string();
    format!("Traveler {}", &id[..8])
}
