//! Follow graph mutations and queries.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::application::repos::{AuthorsRepo, FollowsRepo, RepoError};

#[derive(Debug, Error)]
pub enum FollowError {
    #[error("authors cannot follow themselves")]
    SelfFollow,
    #[error("`{entity}` not found")]
    NotFound { entity: &'static str },
    #[error("a signed-in viewer is required")]
    Unauthenticated,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Guards the follow graph's mutation-time invariants: no self-loops, no
/// duplicate edges, and a known author on the far end. Follow changes never
/// touch the feed cache — only the uncached following feed depends on them.
#[derive(Clone)]
pub struct FollowService {
    follows: Arc<dyn FollowsRepo>,
    authors: Arc<dyn AuthorsRepo>,
}

impl FollowService {
    pub fn new(follows: Arc<dyn FollowsRepo>, authors: Arc<dyn AuthorsRepo>) -> Self {
        Self { follows, authors }
    }

    /// Create a follow edge. Idempotent: following an already-followed
    /// author is a no-op, not an error.
    pub async fn follow(&self, viewer_id: Option<Uuid>, author_id: Uuid) -> Result<(), FollowError> {
        let viewer = viewer_id.ok_or(FollowError::Unauthenticated)?;
        if viewer == author_id {
            return Err(FollowError::SelfFollow);
        }
        self.ensure_author_exists(author_id).await?;

        if self.follows.edge_exists(viewer, author_id).await? {
            debug!(%viewer, %author_id, "follow edge already present");
            return Ok(());
        }

        self.follows.insert_edge(viewer, author_id).await?;
        debug!(%viewer, %author_id, "follow edge created");
        Ok(())
    }

    /// Remove a follow edge. Idempotent: unfollowing an author who was
    /// never followed is a no-op.
    pub async fn unfollow(
        &self,
        viewer_id: Option<Uuid>,
        author_id: Uuid,
    ) -> Result<(), FollowError> {
        let viewer = viewer_id.ok_or(FollowError::Unauthenticated)?;
        self.ensure_author_exists(author_id).await?;

        let removed = self.follows.delete_edge(viewer, author_id).await?;
        debug!(%viewer, %author_id, removed, "follow edge removal requested");
        Ok(())
    }

    pub async fn is_following(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, FollowError> {
        self.follows
            .edge_exists(follower_id, author_id)
            .await
            .map_err(FollowError::from)
    }

    async fn ensure_author_exists(&self, author_id: Uuid) -> Result<(), FollowError> {
        if self.authors.find_by_id(author_id).await?.is_none() {
            return Err(FollowError::NotFound { entity: "author" });
        }
        Ok(())
    }
}
