//! Write-time field rules for authors and posts.
//!
//! # Responsibility
//! - Accept or reject a candidate value for one field of one record.
//! - Provide record-level entry points used by the persistence boundary.
//!
//! # Invariants
//! - Every rule is a pure check of the candidate value. The only read is the
//!   name lookup, which callers inject through [`AuthorNameLookup`].
//! - An accepted value is returned unchanged.
//!
//! # Known gap
//! Name uniqueness is checked by a lookup, not by a store constraint. Two
//! writers racing on separate connections can both pass the check and insert
//! the same name. Callers must serialize author writes.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod author;
mod post;

pub use author::{
    validate_author, validate_author_change, validate_author_fields, validate_author_name,
    validate_phone_number, AuthorNameLookup, PHONE_NUMBER_LEN,
};
pub use post::{
    validate_category, validate_content, validate_post, validate_post_change, validate_summary,
    validate_title, CONTENT_MIN_CHARS, SUMMARY_MAX_CHARS, TITLE_MARKERS,
};

/// Rejection of a single field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Author name is empty.
    MissingAuthorName,
    /// Another persisted author already uses this exact name.
    AuthorNameTaken(String),
    /// Phone number is not exactly ten ASCII digits.
    InvalidPhoneNumber,
    /// Title is empty or whitespace only.
    BlankTitle,
    /// Title contains none of [`TITLE_MARKERS`].
    MissingTitleMarker,
    /// Content is shorter than [`CONTENT_MIN_CHARS`] or not a string.
    InvalidContent,
    /// Summary is longer than [`SUMMARY_MAX_CHARS`] or not a string.
    InvalidSummary,
    /// Category is not one of the allowed labels.
    InvalidCategory(String),
}

impl ValidationError {
    /// Column name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingAuthorName | Self::AuthorNameTaken(_) => "name",
            Self::InvalidPhoneNumber => "phone_number",
            Self::BlankTitle | Self::MissingTitleMarker => "title",
            Self::InvalidContent => "content",
            Self::InvalidSummary => "summary",
            Self::InvalidCategory(_) => "category",
        }
    }

    /// Stable machine-readable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingAuthorName => "author_name_missing",
            Self::AuthorNameTaken(_) => "author_name_taken",
            Self::InvalidPhoneNumber => "phone_number_invalid",
            Self::BlankTitle => "title_blank",
            Self::MissingTitleMarker => "title_marker_missing",
            Self::InvalidContent => "content_invalid",
            Self::InvalidSummary => "summary_invalid",
            Self::InvalidCategory(_) => "category_invalid",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAuthorName => write!(f, "Author needs a name"),
            Self::AuthorNameTaken(name) => write!(
                f,
                "The name '{name}' is already taken. Please choose another name."
            ),
            Self::InvalidPhoneNumber => write!(
                f,
                "Phone number must be exactly {PHONE_NUMBER_LEN} digits and contain only numbers."
            ),
            Self::BlankTitle => write!(f, "Post must have a title."),
            Self::MissingTitleMarker => write!(f, "Title must contain clickbait terms."),
            Self::InvalidContent => write!(
                f,
                "Content must be a string with at least {CONTENT_MIN_CHARS} characters."
            ),
            Self::InvalidSummary => write!(
                f,
                "Summary must be a maximum of {SUMMARY_MAX_CHARS} characters."
            ),
            Self::InvalidCategory(_) => {
                write!(f, "Category must be either Fiction or Non-Fiction.")
            }
        }
    }
}

impl Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn every_error_names_its_field() {
        assert_eq!(ValidationError::MissingAuthorName.field(), "name");
        assert_eq!(
            ValidationError::AuthorNameTaken("Ann".to_string()).field(),
            "name"
        );
        assert_eq!(ValidationError::InvalidPhoneNumber.field(), "phone_number");
        assert_eq!(ValidationError::MissingTitleMarker.field(), "title");
        assert_eq!(ValidationError::InvalidSummary.field(), "summary");
        assert_eq!(
            ValidationError::InvalidCategory("Drama".to_string()).field(),
            "category"
        );
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            ValidationError::AuthorNameTaken("Ann".to_string()).to_string(),
            "The name 'Ann' is already taken. Please choose another name."
        );
        assert_eq!(
            ValidationError::InvalidPhoneNumber.to_string(),
            "Phone number must be exactly 10 digits and contain only numbers."
        );
        assert_eq!(
            ValidationError::InvalidContent.to_string(),
            "Content must be a string with at least 250 characters."
        );
    }
}
