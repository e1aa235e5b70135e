//! Post record.
//!
//! # Invariants
//! - `title` is always present; `content`, `summary` and `category` are
//!   nullable columns and are only checked once a value is assigned.

use crate::model::DisplayId;
use crate::validate::{validate_post, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Store-assigned integer identity of a post row.
pub type PostId = i64;

/// Allowed values for [`Post::category`].
pub const POST_CATEGORIES: &[&str] = &["Fiction", "Non-Fiction"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Post {
    /// Creates an unsaved post with only a title assigned.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: None,
            summary: None,
            category: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Runs every post rule against the assigned fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_post(self)
    }

    /// Decodes a post from an untyped JSON object.
    ///
    /// Wrong-typed values, including an explicit `null`, fail with the error
    /// of the field they were assigned to. An absent key leaves the field
    /// unassigned; a missing `title` fails as blank. The value rules are not applied.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let title = match value.get("title") {
            Some(Value::String(title)) => title.clone(),
            _ => return Err(ValidationError::BlankTitle),
        };

        let content = optional_string(value, "content", ValidationError::InvalidContent)?;
        let summary = optional_string(value, "summary", ValidationError::InvalidSummary)?;
        let category = match value.get("category") {
            None => None,
            Some(Value::String(category)) => Some(category.clone()),
            Some(other) => return Err(ValidationError::InvalidCategory(other.to_string())),
        };

        Ok(Self {
            content,
            summary,
            category,
            ..Self::new(title)
        })
    }
}

/// Compact label with title, category and body lengths. Post text is not
/// repeated in full.
impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post(id={}, title={}, category={}, content_chars={}, summary_chars={})",
            DisplayId(self.id),
            self.title,
            self.category.as_deref().unwrap_or("-"),
            char_len(self.content.as_deref()),
            char_len(self.summary.as_deref()),
        )
    }
}

fn char_len(text: Option<&str>) -> usize {
    text.map_or(0, |text| text.chars().count())
}

fn optional_string(
    value: &Value,
    key: &str,
    wrong_type: ValidationError,
) -> Result<Option<String>, ValidationError> {
    match value.get(key) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(wrong_type),
    }
}
