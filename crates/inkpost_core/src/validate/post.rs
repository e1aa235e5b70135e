//! Post field rules.

use super::ValidationError;
use crate::model::post::{Post, POST_CATEGORIES};

/// A title must contain at least one of these (case-sensitive substring match).
pub const TITLE_MARKERS: &[&str] = &["Won't Believe", "Secret", "Top", "Guess"];

/// Minimum content length, in characters.
pub const CONTENT_MIN_CHARS: usize = 250;

/// Maximum summary length, in characters.
pub const SUMMARY_MAX_CHARS: usize = 250;

/// Checks that `title` is not blank and contains a marker substring.
pub fn validate_title(title: &str) -> Result<&str, ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    if !TITLE_MARKERS.iter().any(|marker| title.contains(marker)) {
        return Err(ValidationError::MissingTitleMarker);
    }
    Ok(title)
}

pub fn validate_content(content: &str) -> Result<&str, ValidationError> {
    if content.chars().count() >= CONTENT_MIN_CHARS {
        Ok(content)
    } else {
        Err(ValidationError::InvalidContent)
    }
}

pub fn validate_summary(summary: &str) -> Result<&str, ValidationError> {
    if summary.chars().count() <= SUMMARY_MAX_CHARS {
        Ok(summary)
    } else {
        Err(ValidationError::InvalidSummary)
    }
}

/// Checks that `category` equals one of [`POST_CATEGORIES`] exactly.
pub fn validate_category(category: &str) -> Result<&str, ValidationError> {
    if POST_CATEGORIES.contains(&category) {
        Ok(category)
    } else {
        Err(ValidationError::InvalidCategory(category.to_string()))
    }
}

/// Runs the rules of every assigned post field in column order.
pub fn validate_post(post: &Post) -> Result<(), ValidationError> {
    validate_title(&post.title)?;
    if let Some(content) = post.content.as_deref() {
        validate_content(content)?;
    }
    if let Some(category) = post.category.as_deref() {
        validate_category(category)?;
    }
    if let Some(summary) = post.summary.as_deref() {
        validate_summary(summary)?;
    }
    Ok(())
}

/// Rejects clearing a column that already holds a value.
///
/// NULL only means "never assigned"; once stored, `content`, `summary` and
/// `category` can be replaced but not unset.
pub fn validate_post_change(stored: &Post, post: &Post) -> Result<(), ValidationError> {
    if stored.content.is_some() && post.content.is_none() {
        return Err(ValidationError::InvalidContent);
    }
    if stored.category.is_some() && post.category.is_none() {
        return Err(ValidationError::InvalidCategory("null".to_string()));
    }
    if stored.summary.is_some() && post.summary.is_none() {
        return Err(ValidationError::InvalidSummary);
    }
    Ok(())
}
