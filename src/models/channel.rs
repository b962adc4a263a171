use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Venmo,
    Zelle,
    Cashapp,
    Applepay,
    Paypal,
    Applecash,
    Cash,
    Other,
}

impl ChannelType {
    /// Fallback ordering when no channel is flagged preferred. Lower wins;
    /// types outside the fixed list share the last slot and keep their
    /// original order under a stable sort.
    pub fn priority(self) -> u8 {
        match self {
            ChannelType::Venmo => 0,
            ChannelType::Cashapp => 1,
            ChannelType::Zelle => 2,
            ChannelType::Paypal => 3,
            ChannelType::Applecash => 4,
            ChannelType::Cash => 5,
            ChannelType::Applepay | ChannelType::Other => 6,
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChannelType::Venmo => "venmo",
            ChannelType::Zelle => "zelle",
            ChannelType::Cashapp => "cashapp",
            ChannelType::Applepay => "applepay",
            ChannelType::Paypal => "paypal",
            ChannelType::Applecash => "applecash",
            ChannelType::Cash => "cash",
            ChannelType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// A way to pay one user. Owned and mutated by that user, independent of any
/// transaction.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentChannel {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub channel_type: ChannelType,
    /// Handle, phone number, or email, depending on the channel type.
    pub identifier: String,
    pub display_name: String,
    pub is_preferred: bool,
    pub is_visible: bool,
}

/// External app/web URI for channels that support a pay-link scheme. Returns
/// `None` for the rest; the UI falls back to showing the identifier for
/// manual payment.
pub fn payment_link(channel: &PaymentChannel, amount: Decimal) -> Option<String> {
    match channel.channel_type {
        ChannelType::Venmo => Some(format!(
            "venmo://paycharge?txn=pay&recipients={}&amount={}",
            channel.identifier, amount
        )),
        ChannelType::Cashapp => Some(format!(
            "https://cash.app/${}/{}",
            channel.identifier.trim_start_matches('$'),
            amount
        )),
        ChannelType::Paypal => Some(format!(
            "https://paypal.me/{}/{}",
            channel.identifier, amount
        )),
        _ => None,
    }
}
