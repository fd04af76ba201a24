//! Repository for the `messages` and `attachments` tables.

use std::collections::HashMap;

use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{Attachment, Message, MessageWithAttachments, NewAttachment};

const COLUMNS: &str = "id, conversation_id, sender_id, content, is_read, created_at, updated_at";

const ATTACHMENT_COLUMNS: &str = "id, message_id, file, file_name, created_at";

/// Provides message append and listing.
pub struct MessageRepo;

impl MessageRepo {
    /// Append a message with its attachments and bump the conversation's
    /// recency, all in one transaction.
    pub async fn append(
        pool: &PgPool,
        conversation_id: DbId,
        sender_id: DbId,
        content: &str,
        attachments: &[NewAttachment],
    ) -> Result<MessageWithAttachments, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let message =
            Self::append_inner(&mut tx, conversation_id, sender_id, content, attachments).await?;
        tx.commit().await?;
        Ok(message)
    }

    /// Transaction-scoped append, shared with conversation creation.
    pub(crate) async fn append_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        conversation_id: DbId,
        sender_id: DbId,
        content: &str,
        attachments: &[NewAttachment],
    ) -> Result<MessageWithAttachments, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (conversation_id, sender_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let message = sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .bind(sender_id)
            .bind(content)
            .fetch_one(&mut **tx)
            .await?;

        let insert_attachment = format!(
            "INSERT INTO attachments (message_id, file, file_name)
             VALUES ($1, $2, $3)
             RETURNING {ATTACHMENT_COLUMNS}"
        );
        let mut stored = Vec::with_capacity(attachments.len());
        for attachment in attachments {
            let row = sqlx::query_as::<_, Attachment>(&insert_attachment)
                .bind(message.id)
                .bind(&attachment.file)
                .bind(&attachment.file_name)
                .fetch_one(&mut **tx)
                .await?;
            stored.push(row);
        }

        sqlx::query(
            "UPDATE conversations SET updated_at = GREATEST(updated_at, NOW()) WHERE id = $1",
        )
        .bind(conversation_id)
        .execute(&mut **tx)
        .await?;

        Ok(MessageWithAttachments {
            message,
            attachments: stored,
        })
    }

    /// All messages of a conversation in ascending creation order, each with
    /// its attachments.
    pub async fn list_for_conversation(
        pool: &PgPool,
        conversation_id: DbId,
    ) -> Result<Vec<MessageWithAttachments>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE conversation_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        let messages = sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = messages.iter().map(|m| m.id).collect();
        let mut by_message: HashMap<DbId, Vec<Attachment>> = HashMap::new();
        if !ids.is_empty() {
            let query = format!(
                "SELECT {ATTACHMENT_COLUMNS} FROM attachments
                 WHERE message_id = ANY($1)
                 ORDER BY id"
            );
            let attachments = sqlx::query_as::<_, Attachment>(&query)
                .bind(&ids)
                .fetch_all(pool)
                .await?;
            for attachment in attachments {
                by_message
                    .entry(attachment.message_id)
                    .or_default()
                    .push(attachment);
            }
        }

        Ok(messages
            .into_iter()
            .map(|message| MessageWithAttachments {
                attachments: by_message.remove(&message.id).unwrap_or_default(),
                message,
            })
            .collect())
    }
}
