//! Core record layer for inkpost.
//! Authors and posts, their write-time rules, and the SQLite boundary that
//! enforces them.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::author::{Author, AuthorId};
pub use model::post::{Post, PostId, POST_CATEGORIES};
pub use model::RecordKind;
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::{RecordListQuery, RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::post_service::{NewPostRequest, PostService};
pub use validate::{AuthorNameLookup, ValidationError};

/// Minimal health-check API for integration checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
