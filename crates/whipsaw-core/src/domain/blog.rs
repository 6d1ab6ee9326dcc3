use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{Document, Problems, Validate, advance_timestamp, optional_text, timestamp_now};
use crate::error::DomainError;

/// Author shown when a post is created without one.
pub const DEFAULT_AUTHOR: &str = "Admin";

/// Blog post entity.
///
/// `content` is trusted markup written by the administrator and is
/// returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for a blog post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub image: Option<String>,
}

/// Partial update for a blog post. An empty `image` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Validate for BlogDraft {
    fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Problems::default();
        problems.require("title", &self.title);
        problems.require("content", &self.content);
        problems.finish()
    }
}

impl Validate for BlogPatch {
    fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Problems::default();
        problems.reject_blank("title", self.title.as_ref());
        problems.reject_blank("content", self.content.as_ref());
        problems.reject_blank("author", self.author.as_ref());
        problems.finish()
    }
}

impl Document for BlogPost {
    type Draft = BlogDraft;
    type Patch = BlogPatch;

    const KIND: &'static str = "Blog post";

    fn create(draft: BlogDraft) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            author: optional_text(draft.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            image: optional_text(draft.image),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: BlogPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if patch.image.is_some() {
            self.image = optional_text(patch.image);
        }
        self.updated_at = advance_timestamp(self.updated_at);
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
