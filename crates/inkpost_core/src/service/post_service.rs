//! Post use-case service.

use crate::model::post::{Post, PostId};
use crate::repo::post_repo::PostRepository;
use crate::repo::{RecordListQuery, RepoResult};

/// Use-case service wrapper for post CRUD operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

/// Field values for a new post. Unset optional fields are stored as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPostRequest {
    pub title: String,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
}

impl From<NewPostRequest> for Post {
    fn from(request: NewPostRequest) -> Self {
        Self {
            content: request.content,
            summary: request.summary,
            category: request.category,
            ..Post::new(request.title)
        }
    }
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a post from field values and returns the stored row.
    pub fn create_post(&self, request: NewPostRequest) -> RepoResult<Post> {
        self.repo.create_post(&Post::from(request))
    }

    /// Stores an already built post, e.g. one decoded by [`Post::from_json`].
    pub fn create_from(&self, post: &Post) -> RepoResult<Post> {
        self.repo.create_post(post)
    }

    pub fn update_post(&self, post: &Post) -> RepoResult<Post> {
        self.repo.update_post(post)
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &RecordListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        self.repo.delete_post(id)
    }
}
