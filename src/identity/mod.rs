use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::LedgerError;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// External collaborator: id to display name and avatar. Used only to
/// decorate balances; failures degrade to placeholder text and never block
/// settlement logic.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, LedgerError>;
}

pub mod in_memory;
