use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::channel::ChannelType;

/// A single directional debt from one debtor to its transaction's payer.
/// Created with the parent transaction; the settled fields are the only ones
/// mutated afterwards, exactly once, through the store's CAS path.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DebtObligation {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub debtor_id: Uuid,
    #[schema(value_type = String)]
    pub amount_owed: Decimal,
    pub settled: bool,
    pub settled_at: Option<DateTime<Utc>>,
    pub settlement_method: Option<ChannelType>,
}

impl DebtObligation {
    pub fn new(transaction_id: Uuid, debtor_id: Uuid, amount_owed: Decimal) -> Self {
        DebtObligation {
            id: Uuid::new_v4(),
            transaction_id,
            debtor_id,
            amount_owed,
            settled: false,
            settled_at: None,
            settlement_method: None,
        }
    }
}
