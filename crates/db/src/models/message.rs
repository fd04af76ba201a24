//! Message and attachment models.

use marketplace_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub conversation_id: DbId,
    pub sender_id: DbId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `attachments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub message_id: DbId,
    /// Opaque file reference.
    pub file: String,
    pub file_name: String,
    pub created_at: Timestamp,
}

/// Attachment payload sent alongside a message.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAttachment {
    pub file: String,
    pub file_name: String,
}

/// A message with its attachments, as returned by the listing and send
/// endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct MessageWithAttachments {
    #[serde(flatten)]
    pub message: Message,
    pub attachments: Vec<Attachment>,
}
