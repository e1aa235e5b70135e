//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - Insert and update run the author rules first, using this repository as
//!   the name lookup. Insert never excludes a self id; update also rejects
//!   clearing a stored phone number.
//! - The name check and the write are two statements with no lock between
//!   them. Concurrent writers on separate connections can both insert the
//!   same name; author writes must come from a single writer.

use super::{log_outcome, RecordListQuery, RepoError, RepoResult};
use crate::model::author::{Author, AuthorId};
use crate::model::RecordKind;
use crate::validate::{
    validate_author, validate_author_change, validate_author_fields, validate_author_name,
    AuthorNameLookup,
};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::time::Instant;

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

/// Repository interface for author CRUD operations.
///
/// Every implementation is also the name lookup its own write path validates
/// against.
pub trait AuthorRepository: AuthorNameLookup<Error = RepoError> {
    /// Inserts a new author and returns the stored row.
    fn create_author(&self, author: &Author) -> RepoResult<Author>;
    /// Replaces name and phone number of a persisted author.
    fn update_author(&self, author: &Author) -> RepoResult<Author>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn list_authors(&self, query: &RecordListQuery) -> RepoResult<Vec<Author>>;
    /// Hard-deletes one author. Posts are not touched.
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert(&self, author: &Author) -> RepoResult<Author> {
        // A new row has no identity to exclude, even when the caller supplies an id.
        validate_author_name(&author.name, None, self)?;
        validate_author_fields(author)?;

        self.conn.execute(
            "INSERT INTO authors (id, name, phone_number) VALUES (?1, ?2, ?3);",
            params![author.id, author.name.as_str(), author.phone_number.as_deref()],
        )?;

        self.require_author(self.conn.last_insert_rowid())
    }

    fn update(&self, author: &Author) -> RepoResult<Author> {
        let id = author.id.ok_or(RepoError::MissingId(RecordKind::Author))?;
        let stored = self.get_author(id)?.ok_or(RepoError::NotFound {
            kind: RecordKind::Author,
            id,
        })?;
        validate_author_change(&stored, author)?;
        validate_author(author, self)?;

        let changed = self.conn.execute(
            "UPDATE authors
             SET
                name = ?1,
                phone_number = ?2,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             WHERE id = ?3;",
            params![author.name.as_str(), author.phone_number.as_deref(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Author,
                id,
            });
        }

        self.require_author(id)
    }

    fn require_author(&self, id: AuthorId) -> RepoResult<Author> {
        self.get_author(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("author {id} missing right after write"))
        })
    }
}

impl AuthorNameLookup for SqliteAuthorRepository<'_> {
    type Error = RepoError;

    fn find_author_id_by_name(&self, name: &str) -> RepoResult<Option<AuthorId>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM authors WHERE name = ?1 ORDER BY id ASC LIMIT 1;",
                [name],
                |row| row.get::<_, AuthorId>(0),
            )
            .optional()?;
        Ok(id)
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &Author) -> RepoResult<Author> {
        let started_at = Instant::now();
        let result = self.insert(author);
        log_outcome("author_create", RecordKind::Author, started_at, &result);
        result
    }

    fn update_author(&self, author: &Author) -> RepoResult<Author> {
        let started_at = Instant::now();
        let result = self.update(author);
        log_outcome("author_update", RecordKind::Author, started_at, &result);
        result
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn list_authors(&self, query: &RecordListQuery) -> RepoResult<Vec<Author>> {
        let mut sql = AUTHOR_SELECT_SQL.to_string();
        let mut bind_values = Vec::new();
        query.append_to(&mut sql, &mut bind_values);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut authors = Vec::new();

        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = match self.conn.execute("DELETE FROM authors WHERE id = ?1;", [id]) {
            Ok(0) => Err(RepoError::NotFound {
                kind: RecordKind::Author,
                id,
            }),
            Ok(_) => Ok(()),
            Err(err) => Err(err.into()),
        };
        log_outcome("author_delete", RecordKind::Author, started_at, &result);
        result
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id: AuthorId = row.get("id")?;
    let author = Author {
        id: Some(id),
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    validate_author_fields(&author)
        .map_err(|err| RepoError::InvalidData(format!("authors row {id}: {err}")))?;
    Ok(author)
}
