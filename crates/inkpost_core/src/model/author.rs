//! Author record.
//!
//! # Responsibility
//! - Hold the column values of one `authors` row.
//! - Decode JSON input where field types are not yet trusted.
//!
//! # Invariants
//! - `name` is unique across persisted authors. The store does not enforce this;
//!   the write path checks it through [`AuthorNameLookup`].
//! - `phone_number`, when set, is exactly ten ASCII digits.

use crate::model::DisplayId;
use crate::validate::{validate_author, AuthorNameLookup, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Store-assigned integer identity of an author row.
pub type AuthorId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// `None` until the record has been inserted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AuthorId>,
    pub name: String,
    /// Omitted from JSON while unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Stays `None` until the first update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Author {
    /// Creates an unsaved author without a phone number.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone_number: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder-style phone number assignment.
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Returns whether the record already has a store identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Runs every author rule, including the name uniqueness lookup.
    pub fn validate<L>(&self, lookup: &L) -> Result<(), L::Error>
    where
        L: AuthorNameLookup + ?Sized,
    {
        validate_author(self, lookup)
    }

    /// Decodes an author from an untyped JSON object.
    ///
    /// A missing or non-string `name` fails with the name rule; a non-string
    /// `phone_number`, including an explicit `null`, fails with the phone rule.
    /// An absent `phone_number` key leaves the field unassigned. Only field types are checked
    /// here, so the result must still pass [`Author::validate`] before it is
    /// written.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let name = match value.get("name") {
            Some(Value::String(name)) => name.clone(),
            _ => return Err(ValidationError::MissingAuthorName),
        };

        let phone_number = match value.get("phone_number") {
            None => None,
            Some(Value::String(phone)) => Some(phone.clone()),
            Some(_) => return Err(ValidationError::InvalidPhoneNumber),
        };

        Ok(Self {
            phone_number,
            ..Self::new(name)
        })
    }
}

/// Compact label, e.g. `Author(id=3, name=Ann)`.
impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Author(id={}, name={})", DisplayId(self.id), self.name)
    }
}
