//! Author use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - The service is storage-agnostic.

use crate::model::author::{Author, AuthorId};
use crate::model::RecordKind;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::{RecordListQuery, RepoError, RepoResult};

/// Use-case service wrapper for author CRUD operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an author from field values.
    ///
    /// # Contract
    /// - Fails with `RepoError::Validation` when the name is empty or taken,
    ///   or when the phone number is not ten digits.
    pub fn create_author(
        &self,
        name: impl Into<String>,
        phone_number: Option<&str>,
    ) -> RepoResult<Author> {
        let mut author = Author::new(name);
        author.phone_number = phone_number.map(str::to_string);
        self.repo.create_author(&author)
    }

    /// Stores an already built author, e.g. one decoded by [`Author::from_json`].
    pub fn create_from(&self, author: &Author) -> RepoResult<Author> {
        self.repo.create_author(author)
    }

    /// Renames a persisted author. Keeping the current name is always allowed.
    pub fn rename_author(&self, id: AuthorId, name: impl Into<String>) -> RepoResult<Author> {
        let mut author = self.require(id)?;
        author.name = name.into();
        self.repo.update_author(&author)
    }

    /// Assigns a phone number to a persisted author. A stored number can be
    /// replaced but not cleared.
    pub fn set_phone_number(&self, id: AuthorId, phone_number: &str) -> RepoResult<Author> {
        let mut author = self.require(id)?;
        author.phone_number = Some(phone_number.to_string());
        self.repo.update_author(&author)
    }

    pub fn update_author(&self, author: &Author) -> RepoResult<Author> {
        self.repo.update_author(author)
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn list_authors(&self, query: &RecordListQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(query)
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        self.repo.delete_author(id)
    }

    fn require(&self, id: AuthorId) -> RepoResult<Author> {
        self.repo.get_author(id)?.ok_or(RepoError::NotFound {
            kind: RecordKind::Author,
            id,
        })
    }
}
