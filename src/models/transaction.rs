use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::channel::ChannelType;

/// A split expense. Immutable once created; its DebtObligations are written
/// atomically alongside it and are the only rows ever mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseTransaction {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub payer_id: Uuid,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
    pub split_count: u32,
    pub participant_ids: Vec<Uuid>,
    /// Payer's repayment hint recorded at creation; not used for channel
    /// resolution, only echoed back to callers.
    pub preferred_channel_types: Vec<ChannelType>,
    pub created_at: DateTime<Utc>,
}

impl ExpenseTransaction {
    /// One participant's equal share, rounded half-up at the currency's minor
    /// unit. The rounding remainder stays with the payer: no obligation row
    /// carries it.
    pub fn equal_share(&self) -> Decimal {
        equal_share(self.amount, self.split_count, &self.currency)
    }
}

pub fn equal_share(amount: Decimal, split_count: u32, currency: &str) -> Decimal {
    (amount / Decimal::from(split_count)).round_dp_with_strategy(
        minor_unit_exponent(currency),
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// ISO 4217 minor-unit exponent. Defaults to 2 for unlisted codes.
pub fn minor_unit_exponent(currency: &str) -> u32 {
    match currency {
        "JPY" | "KRW" | "VND" => 0,
        "BHD" | "JOD" | "KWD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}
