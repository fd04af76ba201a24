//! Two-party conversation rules.
//!
//! A conversation has exactly two participants: a client user and a provider
//! profile (which wraps a user). Every operation resolves the viewer to a
//! [`ParticipantSide`] once, and derives the counterpart from it.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length for a single message body.
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Maximum number of attachments on a single message.
pub const MAX_ATTACHMENTS_PER_MESSAGE: usize = 10;

/// Which side of a conversation the viewer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantSide {
    ClientSide,
    ProviderSide,
}

/// The user ids of both participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participants {
    pub client_user_id: DbId,
    pub provider_user_id: DbId,
}

impl Participants {
    pub fn new(client_user_id: DbId, provider_user_id: DbId) -> Self {
        Self {
            client_user_id,
            provider_user_id,
        }
    }

    /// Resolve the viewer's side, or fail with `Forbidden` for outsiders.
    pub fn side_of(&self, viewer_user_id: DbId) -> Result<ParticipantSide, CoreError> {
        if viewer_user_id == self.client_user_id {
            Ok(ParticipantSide::ClientSide)
        } else if viewer_user_id == self.provider_user_id {
            Ok(ParticipantSide::ProviderSide)
        } else {
            Err(CoreError::Forbidden(
                "You are not a participant in this conversation".to_string(),
            ))
        }
    }

    /// The user id on the other side from `side`.
    pub fn counterpart(&self, side: ParticipantSide) -> DbId {
        match side {
            ParticipantSide::ClientSide => self.provider_user_id,
            ParticipantSide::ProviderSide => self.client_user_id,
        }
    }

    /// Resolve the viewer and return `(side, counterpart_user_id)`.
    pub fn resolve(&self, viewer_user_id: DbId) -> Result<(ParticipantSide, DbId), CoreError> {
        let side = self.side_of(viewer_user_id)?;
        Ok((side, self.counterpart(side)))
    }
}

/// A user may not open a conversation with their own provider profile.
pub fn validate_start(viewer_user_id: DbId, provider_user_id: DbId) -> Result<(), CoreError> {
    if viewer_user_id == provider_user_id {
        return Err(CoreError::Validation(
            "You cannot start a conversation with yourself".to_string(),
        ));
    }
    Ok(())
}

/// Validate a message body, returning it trimmed of surrounding whitespace.
pub fn validate_message_content(content: Option<&str>) -> Result<&str, CoreError> {
    let content = content.map(str::trim).unwrap_or_default();
    if content.is_empty() {
        return Err(CoreError::Validation("Content is required".to_string()));
    }
    if content.len() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Content exceeds maximum length of {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(content)
}

/// Validate the number of attachments sent with one message.
pub fn validate_attachment_count(count: usize) -> Result<(), CoreError> {
    if count > MAX_ATTACHMENTS_PER_MESSAGE {
        return Err(CoreError::Validation(format!(
            "A message may carry at most {MAX_ATTACHMENTS_PER_MESSAGE} attachments"
        )));
    }
    Ok(())
}
