//! Conversation models.

use marketplace_core::conversation::Participants;
use marketplace_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A `conversations` row joined with the provider's user id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversation {
    pub id: DbId,
    pub client_id: DbId,
    pub provider_id: DbId,
    /// User behind `provider_id`; the provider-side participant.
    pub provider_user_id: DbId,
    pub created_at: Timestamp,
    /// Recency, bumped on every appended message.
    pub updated_at: Timestamp,
}

impl Conversation {
    pub fn participants(&self) -> Participants {
        Participants::new(self.client_id, self.provider_user_id)
    }
}

/// Conversation as seen by one viewer: display fields, viewer-relative unread
/// count and the latest message.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationOverview {
    pub id: DbId,
    pub client_id: DbId,
    pub client_username: String,
    pub client_full_name: String,
    pub provider_id: DbId,
    pub provider_user_id: DbId,
    pub provider_username: String,
    pub provider_full_name: String,
    pub provider_company_name: String,
    pub unread_count: i64,
    pub last_message_id: Option<DbId>,
    pub last_message_sender_id: Option<DbId>,
    pub last_message_content: Option<String>,
    pub last_message_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ConversationOverview {
    pub fn participants(&self) -> Participants {
        Participants::new(self.client_id, self.provider_user_id)
    }
}

/// Result of find-or-create.
#[derive(Debug, Clone)]
pub struct StartedConversation {
    pub conversation: Conversation,
    /// `true` when this call inserted the row.
    pub created: bool,
}
