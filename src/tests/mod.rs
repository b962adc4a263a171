mod channel_tests;
mod settlement_tests;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::directory::ChannelDirectory;
use crate::error::LedgerError;
use crate::identity::{IdentityResolver, UserProfile};
use crate::models::{ChannelType, PaymentChannel};
use crate::service::{LedgerService, NewExpense};
use crate::{InMemoryChannelDirectory, InMemoryIdentityResolver, InMemoryStorage};

pub fn create_test_service(
) -> LedgerService<InMemoryStorage, InMemoryChannelDirectory, InMemoryIdentityResolver> {
    LedgerService::new(
        InMemoryStorage::new(),
        InMemoryChannelDirectory::new(),
        InMemoryIdentityResolver::new(),
    )
}

pub fn usd_expense(
    trip_id: Uuid,
    payer_id: Uuid,
    amount: Decimal,
    participant_ids: Vec<Uuid>,
) -> NewExpense {
    NewExpense {
        trip_id,
        payer_id,
        amount,
        currency: "USD".to_string(),
        description: "Dinner".to_string(),
        participant_ids,
        preferred_channel_types: vec![],
    }
}

pub fn channel(
    owner_id: Uuid,
    channel_type: ChannelType,
    identifier: &str,
    is_preferred: bool,
    is_visible: bool,
) -> PaymentChannel {
    PaymentChannel {
        id: Uuid::new_v4(),
        owner_id,
        channel_type,
        identifier: identifier.to_string(),
        display_name: identifier.to_string(),
        is_preferred,
        is_visible,
    }
}

/// Directory whose lookups always fail, for degradation tests.
pub struct FailingDirectory;

#[async_trait]
impl ChannelDirectory for FailingDirectory {
    async fn get_channels(&self, _user_id: Uuid) -> Result<Vec<PaymentChannel>, LedgerError> {
        Err(LedgerError::StorageError("directory unavailable".to_string()))
    }

    async fn save_channels(
        &self,
        _user_id: Uuid,
        _channels: Vec<PaymentChannel>,
    ) -> Result<(), LedgerError> {
        Err(LedgerError::StorageError("directory unavailable".to_string()))
    }
}

/// Identity resolver whose lookups always fail, for degradation tests.
pub struct FailingIdentity;

#[async_trait]
impl IdentityResolver for FailingIdentity {
    async fn get_profile(&self, _user_id: Uuid) -> Result<Option<UserProfile>, LedgerError> {
        Err(LedgerError::StorageError("identity unavailable".to_string()))
    }
}
