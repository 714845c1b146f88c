use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Upper bound on a group's display title.
pub const TITLE_MAX_LEN: usize = 200;

/// Group entity - a named category posts may belong to.
///
/// Groups are created administratively and never deleted by an end-user
/// workflow; `slug` is the stable URL key and unique across all groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl Group {
    pub fn new(title: String, slug: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            description,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if self.title.chars().count() > TITLE_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "title must be at most {TITLE_MAX_LEN} characters"
            )));
        }
        if self.slug.trim().is_empty() {
            return Err(DomainError::Validation(
                "slug must not be empty".to_string(),
            ));
        }
        // The slug is a URL path segment; keep it to the safe charset.
        if !self
            .slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::Validation(
                "slug may only contain letters, digits, hyphens and underscores".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(title: &str) -> Group {
        Group::new(
            title.to_string(),
            "travel".to_string(),
            "Travel notes".to_string(),
        )
    }

    #[test]
    fn display_is_the_title() {
        assert_eq!(group("Travel").to_string(), "Travel");
    }

    #[test]
    fn title_length_is_bounded() {
        assert!(group(&"t".repeat(200)).validate().is_ok());
        assert!(group(&"t".repeat(201)).validate().is_err());
    }

    #[test]
    fn blank_fields_rejected() {
        assert!(group(" ").validate().is_err());

        let mut g = group("Travel");
        g.slug = String::new();
        assert!(g.validate().is_err());

        let mut g = group("Travel");
        g.description = "  ".to_string();
        assert!(g.validate().is_err());
    }

    #[test]
    fn slug_must_be_url_safe() {
        for bad in ["not a/slug", "café", "a?b", "trailing "] {
            let mut g = group("Travel");
            g.slug = bad.to_string();
            assert!(g.validate().is_err(), "accepted slug {bad:?}");
        }

        let mut g = group("Travel");
        g.slug = "travel_notes-2".to_string();
        assert!(g.validate().is_ok());
    }
}
