use async_trait::async_trait;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::PaymentChannel;

/// Per-user payment channel storage. Channels are user-owned and mutated
/// independently of any transaction.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    async fn get_channels(&self, user_id: Uuid) -> Result<Vec<PaymentChannel>, LedgerError>;
    async fn save_channels(
        &self,
        user_id: Uuid,
        channels: Vec<PaymentChannel>,
    ) -> Result<(), LedgerError>;
}

/// The single best channel to show for a counterparty.
///
/// Hidden channels never participate. The first channel flagged preferred
/// wins outright; otherwise the fixed type priority decides, with original
/// order breaking ties. No channels means no actionable payment link, which
/// callers must treat as a normal outcome rather than an error.
pub fn resolve_primary(channels: &[PaymentChannel]) -> Option<&PaymentChannel> {
    let visible: Vec<&PaymentChannel> = channels.iter().filter(|c| c.is_visible).collect();

    if let Some(&preferred) = visible.iter().find(|c| c.is_preferred) {
        return Some(preferred);
    }

    visible
        .into_iter()
        .min_by_key(|c| c.channel_type.priority())
}

pub mod in_memory;
