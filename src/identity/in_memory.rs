use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::identity::{IdentityResolver, UserProfile};

pub struct InMemoryIdentityResolver {
    profiles: Mutex<HashMap<Uuid, UserProfile>>,
}

impl InMemoryIdentityResolver {
    pub fn new() -> Self {
        InMemoryIdentityResolver {
            profiles: Mutex::new(HashMap::new()),
        }
    }

    pub async fn put_profile(&self, user_id: Uuid, profile: UserProfile) {
        self.profiles.lock().await.insert(user_id, profile);
    }
}

impl Default for InMemoryIdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityResolver for InMemoryIdentityResolver {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, LedgerError> {
        Ok(self.profiles.lock().await.get(&user_id).cloned())
    }
}
