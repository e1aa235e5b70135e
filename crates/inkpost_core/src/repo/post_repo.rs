//! Post repository contract and SQLite implementation.

use super::{log_outcome, RecordListQuery, RepoError, RepoResult};
use crate::model::post::{Post, PostId};
use crate::model::RecordKind;
use crate::validate::{validate_post, validate_post_change};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::time::Instant;

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    category,
    summary,
    created_at,
    updated_at
FROM posts";

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    fn create_post(&self, post: &Post) -> RepoResult<Post>;
    /// Replaces every assignable column of a persisted post. A column that
    /// already holds a value cannot be cleared.
    fn update_post(&self, post: &Post) -> RepoResult<Post>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list_posts(&self, query: &RecordListQuery) -> RepoResult<Vec<Post>>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert(&self, post: &Post) -> RepoResult<Post> {
        validate_post(post)?;

        self.conn.execute(
            "INSERT INTO posts (id, title, content, category, summary)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                post.id,
                post.title.as_str(),
                post.content.as_deref(),
                post.category.as_deref(),
                post.summary.as_deref(),
            ],
        )?;

        self.require_post(self.conn.last_insert_rowid())
    }

    fn update(&self, post: &Post) -> RepoResult<Post> {
        let id = post.id.ok_or(RepoError::MissingId(RecordKind::Post))?;
        let stored = self.get_post(id)?.ok_or(RepoError::NotFound {
            kind: RecordKind::Post,
            id,
        })?;
        validate_post_change(&stored, post)?;
        validate_post(post)?;

        let changed = self.conn.execute(
            "UPDATE posts
             SET
                title = ?1,
                content = ?2,
                category = ?3,
                summary = ?4,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             WHERE id = ?5;",
            params![
                post.title.as_str(),
                post.content.as_deref(),
                post.category.as_deref(),
                post.summary.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Post,
                id,
            });
        }

        self.require_post(id)
    }

    fn require_post(&self, id: PostId) -> RepoResult<Post> {
        self.get_post(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("post {id} missing right after write")))
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, post: &Post) -> RepoResult<Post> {
        let started_at = Instant::now();
        let result = self.insert(post);
        log_outcome("post_create", RecordKind::Post, started_at, &result);
        result
    }

    fn update_post(&self, post: &Post) -> RepoResult<Post> {
        let started_at = Instant::now();
        let result = self.update(post);
        log_outcome("post_update", RecordKind::Post, started_at, &result);
        result
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn list_posts(&self, query: &RecordListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = POST_SELECT_SQL.to_string();
        let mut bind_values = Vec::new();
        query.append_to(&mut sql, &mut bind_values);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = match self.conn.execute("DELETE FROM posts WHERE id = ?1;", [id]) {
            Ok(0) => Err(RepoError::NotFound {
                kind: RecordKind::Post,
                id,
            }),
            Ok(_) => Ok(()),
            Err(err) => Err(err.into()),
        };
        log_outcome("post_delete", RecordKind::Post, started_at, &result);
        result
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;
    let post = Post {
        id: Some(id),
        title: row.get("title")?,
        content: row.get("content")?,
        summary: row.get("summary")?,
        category: row.get("category")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    validate_post(&post)
        .map_err(|err| RepoError::InvalidData(format!("posts row {id}: {err}")))?;
    Ok(post)
}
