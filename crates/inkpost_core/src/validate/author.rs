//! Author field rules.

use super::ValidationError;
use crate::model::author::{Author, AuthorId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Exact length of an accepted phone number.
pub const PHONE_NUMBER_LEN: usize = 10;

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone number regex"));

/// Capability to find a persisted author by exact name.
///
/// The error type lets a storage-backed lookup report its own failures while
/// the name rule reports rejections through the same channel.
pub trait AuthorNameLookup {
    type Error: From<ValidationError>;

    /// Returns the id of an existing author whose name equals `name`
    /// (case-sensitive), if any.
    fn find_author_id_by_name(&self, name: &str) -> Result<Option<AuthorId>, Self::Error>;
}

/// In-memory lookup over already persisted authors. Unsaved entries are ignored.
impl AuthorNameLookup for [Author] {
    type Error = ValidationError;

    fn find_author_id_by_name(&self, name: &str) -> Result<Option<AuthorId>, ValidationError> {
        Ok(self
            .iter()
            .filter(|author| author.name == name)
            .find_map(|author| author.id))
    }
}

/// Checks that `name` is non-empty and not used by another author.
///
/// `self_id` is the identity of the record being written. A match on the
/// record's own id is not a conflict; an unsaved record (`None`) conflicts
/// with any match.
pub fn validate_author_name<'a, L>(
    name: &'a str,
    self_id: Option<AuthorId>,
    lookup: &L,
) -> Result<&'a str, L::Error>
where
    L: AuthorNameLookup + ?Sized,
{
    if name.is_empty() {
        return Err(ValidationError::MissingAuthorName.into());
    }

    match lookup.find_author_id_by_name(name)? {
        Some(existing_id) if Some(existing_id) != self_id => {
            Err(ValidationError::AuthorNameTaken(name.to_string()).into())
        }
        _ => Ok(name),
    }
}

/// Checks that `phone_number` is exactly ten ASCII decimal digits.
pub fn validate_phone_number(phone_number: &str) -> Result<&str, ValidationError> {
    if PHONE_NUMBER_RE.is_match(phone_number) {
        Ok(phone_number)
    } else {
        Err(ValidationError::InvalidPhoneNumber)
    }
}

/// Runs the author rules that need no lookup.
///
/// Used on read paths, where uniqueness is a property of the whole table
/// rather than of one row.
pub fn validate_author_fields(author: &Author) -> Result<(), ValidationError> {
    if author.name.is_empty() {
        return Err(ValidationError::MissingAuthorName);
    }
    if let Some(phone_number) = author.phone_number.as_deref() {
        validate_phone_number(phone_number)?;
    }
    Ok(())
}

/// Runs every author rule in column order and returns the first failure.
pub fn validate_author<L>(author: &Author, lookup: &L) -> Result<(), L::Error>
where
    L: AuthorNameLookup + ?Sized,
{
    validate_author_name(&author.name, author.id, lookup)?;
    if let Some(phone_number) = author.phone_number.as_deref() {
        validate_phone_number(phone_number)?;
    }
    Ok(())
}

/// Rejects clearing a phone number that is already stored.
pub fn validate_author_change(stored: &Author, author: &Author) -> Result<(), ValidationError> {
    if stored.phone_number.is_some() && author.phone_number.is_none() {
        return Err(ValidationError::InvalidPhoneNumber);
    }
    Ok(())
}
