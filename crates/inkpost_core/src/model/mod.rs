//! Persisted record shapes for authors and posts.
//!
//! # Responsibility
//! - Define the canonical value types stored in `authors` and `posts`.
//! - Decode loosely-typed JSON input into records without running write rules.
//!
//! # Invariants
//! - `created_at` and `updated_at` are always assigned by the store; `id` is
//!   store-assigned unless an import path supplies one.
//! - Timestamps are Unix epoch milliseconds.
//!
//! # See also
//! - `crate::validate` for the write-time rule set.

use std::fmt::{Display, Formatter};

pub mod author;
pub mod post;

/// Record family, used to label repository errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Author,
    Post,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Author => write!(f, "author"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// Renders an optional store id, `-` while unsaved.
pub(crate) struct DisplayId(pub(crate) Option<i64>);

impl Display for DisplayId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => write!(f, "-"),
        }
    }
}
