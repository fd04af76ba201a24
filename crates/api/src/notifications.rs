//! In-app notification side effects.
//!
//! Handlers call [`notify`] after their own write has committed. Delivery is
//! best effort: a failure is logged and never fails the originating request.

use marketplace_core::types::DbId;
use marketplace_db::models::notification::CreateNotification;
use marketplace_db::repositories::NotificationRepo;
use marketplace_db::DbPool;

/// Record a notification for `user_id`, logging instead of propagating errors.
pub async fn notify(
    pool: &DbPool,
    user_id: DbId,
    kind: &'static str,
    title: impl Into<String>,
    content: impl Into<String>,
    related_object_id: Option<DbId>,
) {
    let input = CreateNotification {
        user_id,
        title: title.into(),
        content: content.into(),
        kind,
        related_object_id,
    };

    if let Err(e) = NotificationRepo::create(pool, &input).await {
        tracing::warn!(
            error = %e,
            user_id,
            kind,
            "Failed to record notification"
        );
    }
}
