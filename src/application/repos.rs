//! Repository traits describing the content store and follow graph adapters.

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::entities::{AuthorRecord, CommentRecord, GroupRecord, PostRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("store timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Read side of the post store.
///
/// Every scan returns posts in feed order: creation time descending with
/// ids descending on ties, so pagination over the result is deterministic.
#[async_trait]
pub trait PostsRepo: Send + Sync {
    async fn scan_all(&self) -> Result<Vec<PostRecord>, RepoError>;

    async fn scan_by_group(&self, group_id: Uuid) -> Result<Vec<PostRecord>, RepoError>;

    async fn scan_by_author(&self, author_id: Uuid) -> Result<Vec<PostRecord>, RepoError>;

    async fn scan_by_authors(
        &self,
        author_ids: &HashSet<Uuid>,
    ) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_post(&self, id: i64) -> Result<Option<PostRecord>, RepoError>;

    /// Comments for one post, insertion order.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentRecord>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    pub image: Option<String>,
    /// Store-assigned when absent.
    pub created_at: Option<OffsetDateTime>,
}

/// Edit surface for a post. Identity, author, and creation time are not
/// part of the params on purpose: they are immutable after creation.
#[derive(Debug, Clone)]
pub struct EditPostParams {
    pub id: i64,
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image: Option<String>,
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    async fn edit_post(&self, params: EditPostParams) -> Result<PostRecord, RepoError>;

    /// Removing an absent post is a no-op.
    async fn delete_post(&self, id: i64) -> Result<(), RepoError>;

    async fn add_comment(
        &self,
        post_id: i64,
        author_id: Uuid,
        text: &str,
    ) -> Result<CommentRecord, RepoError>;
}

#[async_trait]
pub trait GroupsRepo: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<GroupRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupRecord>, RepoError>;
}

#[async_trait]
pub trait AuthorsRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthorRecord>, RepoError>;
}

/// Storage for the directed follow relation. Uniqueness of pairs is the
/// storage invariant; the self-loop ban lives in the follow service.
#[async_trait]
pub trait FollowsRepo: Send + Sync {
    async fn edge_exists(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RepoError>;

    async fn insert_edge(&self, follower_id: Uuid, author_id: Uuid) -> Result<(), RepoError>;

    /// Returns whether an edge was actually removed.
    async fn delete_edge(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RepoError>;

    async fn followed_authors(&self, follower_id: Uuid) -> Result<HashSet<Uuid>, RepoError>;
}
