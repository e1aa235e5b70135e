//! Repository contracts and SQLite implementations for authors and posts.
//!
//! # Responsibility
//! - Keep SQL details inside the persistence boundary.
//! - Call the record validator explicitly before every insert or update.
//!
//! # Invariants
//! - A record that fails any rule is never written, not even partially.
//! - Read paths reject corrupt persisted rows instead of masking them.
//! - APIs return semantic errors (`NotFound`) in addition to transport errors.

use crate::db::DbError;
use crate::model::RecordKind;
use crate::validate::ValidationError;
use log::{debug, error, warn};
use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub mod author_repo;
pub mod post_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by author and post persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { kind: RecordKind, id: i64 },
    /// Update or delete was called on a record that has no id.
    MissingId(RecordKind),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::MissingId(kind) => write!(f, "{kind} has not been saved yet"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::MissingId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Stable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.code(),
            Self::Db(err) => err.code(),
            Self::NotFound { .. } => "not_found",
            Self::MissingId(_) => "missing_id",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

/// Pagination options for listing records, ordered by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

impl RecordListQuery {
    /// Appends `ORDER BY`/`LIMIT`/`OFFSET` clauses and their bind values.
    pub(crate) fn append_to(&self, sql: &mut String, bind_values: &mut Vec<Value>) {
        sql.push_str(" ORDER BY id ASC");

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if self.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(self.offset)));
            }
        } else if self.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(self.offset)));
        }
    }
}

/// Emits the outcome of one repository call.
///
/// Field values never reach the log; rejections report field and code only.
pub(crate) fn log_outcome<T>(
    event: &'static str,
    kind: RecordKind,
    started_at: Instant,
    result: &RepoResult<T>,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => debug!(
            "event={event} module=repo status=ok record={kind} duration_ms={duration_ms}"
        ),
        Err(RepoError::Validation(err)) => warn!(
            "event={event} module=repo status=rejected record={kind} duration_ms={duration_ms} field={} error_code={}",
            err.field(),
            err.code()
        ),
        Err(err) => error!(
            "event={event} module=repo status=error record={kind} duration_ms={duration_ms} error_code={} error={}",
            err.code(),
            err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::RecordListQuery;

    #[test]
    fn list_query_without_limit_uses_open_ended_offset() {
        let mut sql = String::from("SELECT id FROM posts");
        let mut binds = Vec::new();
        RecordListQuery {
            limit: None,
            offset: 5,
        }
        .append_to(&mut sql, &mut binds);

        assert!(sql.ends_with("ORDER BY id ASC LIMIT -1 OFFSET ?"));
        assert_eq!(binds.len(), 1);
    }

    #[test]
    fn default_list_query_has_no_bind_values() {
        let mut sql = String::new();
        let mut binds = Vec::new();
        RecordListQuery::default().append_to(&mut sql, &mut binds);

        assert_eq!(sql, " ORDER BY id ASC");
        assert!(binds.is_empty());
    }
}
