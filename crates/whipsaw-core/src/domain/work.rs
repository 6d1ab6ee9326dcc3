use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{Document, Problems, Validate, optional_text, timestamp_now};
use crate::error::DomainError;

/// Portfolio entry shown on the work pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub image: Option<String>,
    pub client: String,
    /// Display year, free text ("2023", "2022-2023").
    pub year: Option<String>,
    /// Creation time; also the listing sort key.
    pub date: DateTime<Utc>,
    pub description: String,
    pub content: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkDraft {
    pub title: String,
    pub client: String,
    pub category: String,
    pub description: String,
    pub content: String,
    pub author: String,
    pub image: Option<String>,
    pub year: Option<String>,
}

/// Partial update for a work item. Empty `image` or `year` clears the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl Validate for WorkDraft {
    fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Problems::default();
        problems.require("title", &self.title);
        problems.require("client", &self.client);
        problems.require("category", &self.category);
        problems.require("description", &self.description);
        problems.require("content", &self.content);
        problems.require("author", &self.author);
        problems.finish()
    }
}

impl Validate for WorkPatch {
    fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Problems::default();
        problems.reject_blank("title", self.title.as_ref());
        problems.reject_blank("client", self.client.as_ref());
        problems.reject_blank("category", self.category.as_ref());
        problems.reject_blank("description", self.description.as_ref());
        problems.reject_blank("content", self.content.as_ref());
        problems.reject_blank("author", self.author.as_ref());
        problems.finish()
    }
}

impl Document for WorkItem {
    type Draft = WorkDraft;
    type Patch = WorkPatch;

    const KIND: &'static str = "Work item";

    fn create(draft: WorkDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            category: draft.category,
            image: optional_text(draft.image),
            client: draft.client,
            year: optional_text(draft.year),
            date: timestamp_now(),
            description: draft.description,
            content: draft.content,
            author: draft.author,
        }
    }

    fn apply(&mut self, patch: WorkPatch) {
        let WorkPatch {
            title,
            client,
            category,
            description,
            content,
            author,
            image,
            year,
        } = patch;

        for (field, value) in [
            (&mut self.title, title),
            (&mut self.client, client),
            (&mut self.category, category),
            (&mut self.description, description),
            (&mut self.content, content),
            (&mut self.author, author),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
        if image.is_some() {
            self.image = optional_text(image);
        }
        if year.is_some() {
            self.year = optional_text(year);
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> WorkDraft {
        WorkDraft {
            title: "Aura Speaker".into(),
            client: "Acme Audio".into(),
            category: "Industrial Design".into(),
            description: "A speaker".into(),
            content: "<p>Case study</p>".into(),
            author: "Studio".into(),
            image: Some("https://img/aura.jpg".into()),
            year: Some("2023".into()),
        }
    }

    #[test]
    fn test_missing_client_is_reported() {
        let draft = WorkDraft {
            client: String::new(),
            ..complete_draft()
        };
        match draft.validate() {
            Err(DomainError::Validation(problems)) => {
                assert_eq!(problems, vec!["client is required"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_keeps_date_and_unpatched_fields() {
        let mut item = WorkItem::create(complete_draft());
        let before = item.clone();

        item.apply(WorkPatch {
            category: Some("Branding".into()),
            year: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(item.category, "Branding");
        assert_eq!(item.year, None);
        assert_eq!(item.date, before.date);
        assert_eq!(item.title, before.title);
        assert_eq!(item.client, before.client);
        assert_eq!(item.image, before.image);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(WorkItem::create(complete_draft())).unwrap();
        for key in [
            "id",
            "title",
            "category",
            "image",
            "client",
            "year",
            "date",
            "description",
            "content",
            "author",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
