//! Repository for the `conversations` table and per-viewer read state.
//!
//! Participant resolution happens in the caller. Read-state queries take the
//! counterpart's user id explicitly, so they can never touch the viewer's own
//! messages.

use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::conversation::{Conversation, ConversationOverview, StartedConversation};
use crate::repositories::MessageRepo;

/// Conversation row joined with the provider's user id.
const SELECT: &str = "\
    SELECT c.id, c.client_id, c.provider_id, p.user_id AS provider_user_id, \
           c.created_at, c.updated_at \
    FROM conversations c \
    JOIN providers p ON p.id = c.provider_id";

/// Overview projection relative to the viewer bound as `$1`.
const OVERVIEW_SELECT: &str = "\
    SELECT c.id, c.client_id, cu.username AS client_username, \
           TRIM(CONCAT(cu.first_name, ' ', cu.last_name)) AS client_full_name, \
           c.provider_id, p.user_id AS provider_user_id, pu.username AS provider_username, \
           TRIM(CONCAT(pu.first_name, ' ', pu.last_name)) AS provider_full_name, \
           p.company_name AS provider_company_name, \
           (SELECT COUNT(*) FROM messages m \
             WHERE m.conversation_id = c.id AND m.is_read = false \
               AND m.sender_id = CASE WHEN c.client_id = $1 THEN p.user_id ELSE c.client_id END \
           ) AS unread_count, \
           lm.id AS last_message_id, lm.sender_id AS last_message_sender_id, \
           lm.content AS last_message_content, lm.created_at AS last_message_at, \
           c.created_at, c.updated_at \
    FROM conversations c \
    JOIN users cu ON cu.id = c.client_id \
    JOIN providers p ON p.id = c.provider_id \
    JOIN users pu ON pu.id = p.user_id \
    LEFT JOIN LATERAL ( \
        SELECT id, sender_id, content, created_at FROM messages \
        WHERE conversation_id = c.id \
        ORDER BY created_at DESC, id DESC \
        LIMIT 1 \
    ) lm ON true";

/// Provides conversation lookup, find-or-create, and read-state operations.
pub struct ConversationRepo;

impl ConversationRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!("{SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return the conversation for `(client_id, provider_id)`, creating it if
    /// none exists.
    ///
    /// Concurrent callers for the same pair converge on one row: the insert
    /// yields to the unique constraint and the row is re-read. The initial
    /// message is only appended when this call created the conversation.
    pub async fn find_or_create(
        pool: &PgPool,
        client_id: DbId,
        provider_id: DbId,
        initial_message: Option<&str>,
    ) -> Result<StartedConversation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO conversations (client_id, provider_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_conversations_client_provider DO NOTHING
             RETURNING id",
        )
        .bind(client_id)
        .bind(provider_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let (Some(conversation_id), Some(content)) = (inserted, initial_message) {
            MessageRepo::append_inner(&mut tx, conversation_id, client_id, content, &[]).await?;
        }

        let query = format!("{SELECT} WHERE c.client_id = $1 AND c.provider_id = $2");
        let conversation = sqlx::query_as::<_, Conversation>(&query)
            .bind(client_id)
            .bind(provider_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        if inserted.is_some() {
            tracing::debug!(
                conversation_id = conversation.id,
                client_id,
                provider_id,
                "Conversation created"
            );
        }

        Ok(StartedConversation {
            conversation,
            created: inserted.is_some(),
        })
    }

    /// Conversations the viewer takes part in on either side, most recently
    /// active first.
    pub async fn list_for_user(
        pool: &PgPool,
        viewer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ConversationOverview>, sqlx::Error> {
        let query = format!(
            "{OVERVIEW_SELECT}
             WHERE c.client_id = $1 OR p.user_id = $1
             ORDER BY c.updated_at DESC, c.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ConversationOverview>(&query)
            .bind(viewer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_user(pool: &PgPool, viewer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM conversations c
             JOIN providers p ON p.id = c.provider_id
             WHERE c.client_id = $1 OR p.user_id = $1",
        )
        .bind(viewer_id)
        .fetch_one(pool)
        .await
    }

    /// One conversation as seen by `viewer_id`. Does not check participation.
    pub async fn overview(
        pool: &PgPool,
        viewer_id: DbId,
        conversation_id: DbId,
    ) -> Result<Option<ConversationOverview>, sqlx::Error> {
        let query = format!("{OVERVIEW_SELECT} WHERE c.id = $2");
        sqlx::query_as::<_, ConversationOverview>(&query)
            .bind(viewer_id)
            .bind(conversation_id)
            .fetch_optional(pool)
            .await
    }

    /// Unread messages sent by `counterpart_id` in one conversation.
    pub async fn unread_count(
        pool: &PgPool,
        conversation_id: DbId,
        counterpart_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages
             WHERE conversation_id = $1 AND sender_id = $2 AND is_read = false",
        )
        .bind(conversation_id)
        .bind(counterpart_id)
        .fetch_one(pool)
        .await
    }

    /// Flip every currently unread message from `counterpart_id` to read.
    ///
    /// Returns how many messages changed; a repeat call returns `0`.
    pub async fn mark_read(
        pool: &PgPool,
        conversation_id: DbId,
        counterpart_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = true
             WHERE conversation_id = $1 AND sender_id = $2 AND is_read = false",
        )
        .bind(conversation_id)
        .bind(counterpart_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
