//! Use-case services for authors and posts.
//!
//! # Responsibility
//! - Offer field-level create entry points so callers never build SQL.
//! - Keep callers decoupled from the storage implementation.

pub mod author_service;
pub mod post_service;
