use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Characters of `text` used as a post's display label in logs.
const LABEL_LEN: usize = 15;

/// Post entity - a single authored text entry, optionally grouped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    /// Set once at creation, never touched by edits.
    pub pub_date: DateTime<Utc>,
}

impl Post {
    /// Create a new post authored now by the given identity.
    pub fn new(author_id: Uuid, text: String, group_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            group_id,
            text,
            pub_date: Utc::now(),
        }
    }

    /// A post body must carry visible content.
    pub fn validate_text(text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation(
                "text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label: String = self.text.chars().take(LABEL_LEN).collect();
        f.write_str(&label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_truncates_to_fifteen_chars() {
        let post = Post::new(Uuid::new_v4(), "a".repeat(40), None);
        assert_eq!(post.to_string(), "a".repeat(15));
    }

    #[test]
    fn display_keeps_short_text_whole() {
        let post = Post::new(Uuid::new_v4(), "short".to_string(), None);
        assert_eq!(post.to_string(), "short");
    }

    #[test]
    fn display_counts_chars_not_bytes() {
        let post = Post::new(Uuid::new_v4(), "продолговатость моста".to_string(), None);
        assert_eq!(post.to_string(), "продолговатость");
    }

    #[test]
    fn empty_and_whitespace_text_rejected() {
        assert!(Post::validate_text("").is_err());
        assert!(Post::validate_text("   \n\t").is_err());
        assert!(Post::validate_text("ok").is_ok());
    }

    #[test]
    fn new_post_has_no_group_by_default_choice() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "text".to_string(), None);
        assert_eq!(post.author_id, author);
        assert!(post.group_id.is_none());
    }
}
