use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{ContributingObligation, DebtObligation, ExpenseTransaction};

/// Accumulated position against one counterparty before enrichment.
#[derive(Clone, Debug, Default)]
pub struct LedgerEntry {
    pub net_amount: Decimal,
    pub contributing: Vec<ContributingObligation>,
}

/// Builds the viewer's net balance per counterparty from a trip's
/// transactions and obligations.
///
/// Pure and synchronous. Settled obligations are excluded entirely:
/// settlement removes a debt from every future computation instead of
/// zeroing it in place. Self-entries and zero nets are dropped from the
/// output. All transactions must share one currency; one ledger instance
/// per currency is the caller's job.
pub fn build_ledger(
    viewer_id: Uuid,
    transactions: &[ExpenseTransaction],
    obligations: &[DebtObligation],
) -> Result<HashMap<Uuid, LedgerEntry>, LedgerError> {
    debug!(
        "Building ledger for viewer {} over {} transactions",
        viewer_id,
        transactions.len()
    );

    if let Some(first) = transactions.first() {
        for tx in &transactions[1..] {
            if tx.currency != first.currency {
                return Err(LedgerError::CurrencyMismatch(
                    first.currency.clone(),
                    tx.currency.clone(),
                ));
            }
        }
    }

    let tx_by_id: HashMap<Uuid, &ExpenseTransaction> =
        transactions.iter().map(|tx| (tx.id, tx)).collect();

    let mut ledger: HashMap<Uuid, LedgerEntry> = HashMap::new();

    for obligation in obligations.iter().filter(|ob| !ob.settled) {
        let Some(tx) = tx_by_id.get(&obligation.transaction_id) else {
            continue;
        };

        if tx.payer_id == viewer_id && obligation.debtor_id != viewer_id {
            // They owe the viewer.
            let entry = ledger.entry(obligation.debtor_id).or_default();
            entry.net_amount += obligation.amount_owed;
            entry.contributing.push(ContributingObligation {
                transaction_id: tx.id,
                description: tx.description.clone(),
                signed_amount: obligation.amount_owed,
                date: tx.created_at,
            });
        } else if obligation.debtor_id == viewer_id && tx.payer_id != viewer_id {
            // The viewer owes them.
            let entry = ledger.entry(tx.payer_id).or_default();
            entry.net_amount -= obligation.amount_owed;
            entry.contributing.push(ContributingObligation {
                transaction_id: tx.id,
                description: tx.description.clone(),
                signed_amount: -obligation.amount_owed,
                date: tx.created_at,
            });
        }
    }

    ledger.retain(|_, entry| !entry.net_amount.is_zero());

    debug!("Ledger has {} non-zero counterparties", ledger.len());
    Ok(ledger)
}
