use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::directory::ChannelDirectory;
use crate::error::LedgerError;
use crate::models::PaymentChannel;

pub struct InMemoryChannelDirectory {
    channels: Mutex<HashMap<Uuid, Vec<PaymentChannel>>>,
}

impl InMemoryChannelDirectory {
    pub fn new() -> Self {
        InMemoryChannelDirectory {
            channels: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryChannelDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelDirectory for InMemoryChannelDirectory {
    async fn get_channels(&self, user_id: Uuid) -> Result<Vec<PaymentChannel>, LedgerError> {
        Ok(self
            .channels
            .lock()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_channels(
        &self,
        user_id: Uuid,
        channels: Vec<PaymentChannel>,
    ) -> Result<(), LedgerError> {
        self.channels.lock().await.insert(user_id, channels);
        Ok(())
    }
}
