//! Notification types and the titles generated for platform events.

pub const NOTIFICATION_TYPE_MESSAGE: &str = "message";
pub const NOTIFICATION_TYPE_REVIEW: &str = "review";
pub const NOTIFICATION_TYPE_FAVORITE: &str = "favorite";
pub const NOTIFICATION_TYPE_DISPUTE: &str = "dispute";

/// Longest message excerpt copied into a notification body.
pub const PREVIEW_LENGTH: usize = 120;

/// Truncate `content` to [`PREVIEW_LENGTH`] characters, appending an ellipsis
/// when something was cut.
pub fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_LENGTH).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_untouched() {
        assert_eq!(preview("Hello"), "Hello");
    }

    #[test]
    fn long_content_truncated_on_char_boundary() {
        let long = "é".repeat(PREVIEW_LENGTH + 5);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_LENGTH + 1);
        assert!(p.ends_with('…'));
    }
}
