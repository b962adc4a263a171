use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::channel::PaymentChannel;

/// One unsettled obligation's contribution to a counterparty balance.
/// Positive means the counterparty owes the viewer.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ContributingObligation {
    pub transaction_id: Uuid,
    pub description: String,
    #[schema(value_type = String)]
    pub signed_amount: Decimal,
    pub date: DateTime<Utc>,
}

/// Net position against a single counterparty, derived fresh on every query.
/// Never cached across requests: settlement state changes must be reflected
/// immediately.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PersonalBalance {
    pub counterparty_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// Negative: viewer owes them. Positive: they owe the viewer.
    #[schema(value_type = String)]
    pub net_amount: Decimal,
    pub resolved_channel: Option<PaymentChannel>,
    pub contributing: Vec<ContributingObligation>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BalanceSummary {
    #[schema(value_type = String)]
    pub total_owed: Decimal,
    #[schema(value_type = String)]
    pub total_owed_to_you: Decimal,
    #[schema(value_type = String)]
    pub net_balance: Decimal,
    /// Non-zero balances only, ascending by net amount: the viewer's own
    /// debts surface first.
    pub balances: Vec<PersonalBalance>,
    /// Per-counterparty enrichment failures (profile or channel lookup).
    /// The summary itself is still complete ledger-wise.
    pub warnings: Vec<String>,
}
