//! Feed assembly: the four paginated post views.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::application::pagination::{FeedPage, paginate};
use crate::application::repos::{AuthorsRepo, FollowsRepo, GroupsRepo, PostsRepo, RepoError};
use crate::cache::GlobalFeedCache;
use crate::domain::entities::{AuthorRecord, CommentRecord, GroupRecord, PostRecord};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("`{entity}` not found")]
    NotFound { entity: &'static str },
    #[error("a signed-in viewer is required")]
    Unauthenticated,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Group feed page plus the group it was scoped to.
#[derive(Debug, Clone)]
pub struct GroupFeed {
    pub group: GroupRecord,
    pub page: FeedPage<PostRecord>,
}

/// Profile feed page plus the author and whether the viewer follows them
/// (`false` when the viewer is anonymous).
#[derive(Debug, Clone)]
pub struct ProfileFeed {
    pub author: AuthorRecord,
    pub following: bool,
    pub page: FeedPage<PostRecord>,
}

/// One post with its comments in insertion order.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: PostRecord,
    pub comments: Vec<CommentRecord>,
}

/// A feed request as it arrives from the routing layer.
#[derive(Debug, Clone)]
pub enum FeedQuery {
    Global {
        page: u32,
    },
    Group {
        slug: String,
        page: u32,
    },
    Profile {
        author_id: Uuid,
        viewer_id: Option<Uuid>,
        page: u32,
    },
    Following {
        viewer_id: Option<Uuid>,
        page: u32,
    },
}

/// The assembled view for a [`FeedQuery`], with per-kind extra context.
#[derive(Debug, Clone)]
pub enum FeedView {
    Global(FeedPage<PostRecord>),
    Group(GroupFeed),
    Profile(ProfileFeed),
    Following(FeedPage<PostRecord>),
}

/// Composes the post store, follow graph, and paginator into the four feed
/// views. Request-scoped and side-effect-free except for the global feed
/// cache slot.
#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostsRepo>,
    groups: Arc<dyn GroupsRepo>,
    authors: Arc<dyn AuthorsRepo>,
    follows: Arc<dyn FollowsRepo>,
    cache: Arc<GlobalFeedCache>,
    page_size: u32,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        groups: Arc<dyn GroupsRepo>,
        authors: Arc<dyn AuthorsRepo>,
        follows: Arc<dyn FollowsRepo>,
        cache: Arc<GlobalFeedCache>,
        page_size: u32,
    ) -> Self {
        Self {
            posts,
            groups,
            authors,
            follows,
            cache,
            page_size,
        }
    }

    pub async fn get_feed(&self, query: FeedQuery) -> Result<FeedView, FeedError> {
        match query {
            FeedQuery::Global { page } => self.global_feed(page).await.map(FeedView::Global),
            FeedQuery::Group { slug, page } => {
                self.group_feed(&slug, page).await.map(FeedView::Group)
            }
            FeedQuery::Profile {
                author_id,
                viewer_id,
                page,
            } => self
                .profile_feed(author_id, viewer_id, page)
                .await
                .map(FeedView::Profile),
            FeedQuery::Following { viewer_id, page } => self
                .following_feed(viewer_id, page)
                .await
                .map(FeedView::Following),
        }
    }

    /// The global feed. Page 1 requests go through the cache slot; every
    /// other page bypasses it and reads the store directly.
    pub async fn global_feed(&self, page: u32) -> Result<FeedPage<PostRecord>, FeedError> {
        if page <= 1 {
            let posts = Arc::clone(&self.posts);
            let page_size = self.page_size;
            return self
                .cache
                .get_or_compute(move || async move {
                    let items = posts.scan_all().await?;
                    Ok(paginate(items, page_size, 1))
                })
                .await;
        }

        let items = self.posts.scan_all().await?;
        Ok(paginate(items, self.page_size, page))
    }

    /// Posts filed under the group with the given slug.
    pub async fn group_feed(&self, slug: &str, page: u32) -> Result<GroupFeed, FeedError> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or(FeedError::NotFound { entity: "group" })?;

        let items = self.posts.scan_by_group(group.id).await?;
        let page = paginate(items, self.page_size, page);
        Ok(GroupFeed { group, page })
    }

    /// Posts by one author, with the viewer's follow state when known.
    pub async fn profile_feed(
        &self,
        author_id: Uuid,
        viewer_id: Option<Uuid>,
        page: u32,
    ) -> Result<ProfileFeed, FeedError> {
        let author = self
            .authors
            .find_by_id(author_id)
            .await?
            .ok_or(FeedError::NotFound { entity: "author" })?;

        let following = match viewer_id {
            Some(viewer) => self.follows.edge_exists(viewer, author.id).await?,
            None => false,
        };

        let items = self.posts.scan_by_author(author.id).await?;
        let page = paginate(items, self.page_size, page);
        Ok(ProfileFeed {
            author,
            following,
            page,
        })
    }

    /// Posts by every author the viewer follows. Never cached, so follow
    /// changes show up on the next request.
    pub async fn following_feed(
        &self,
        viewer_id: Option<Uuid>,
        page: u32,
    ) -> Result<FeedPage<PostRecord>, FeedError> {
        let viewer = viewer_id.ok_or(FeedError::Unauthenticated)?;

        let followed = self.follows.followed_authors(viewer).await?;
        debug!(%viewer, followed = followed.len(), "assembling following feed");
        let items = self.posts.scan_by_authors(&followed).await?;
        Ok(paginate(items, self.page_size, page))
    }

    /// One post with its comments.
    pub async fn post_detail(&self, post_id: i64) -> Result<PostDetail, FeedError> {
        let post = self
            .posts
            .find_post(post_id)
            .await?
            .ok_or(FeedError::NotFound { entity: "post" })?;

        let comments = self.posts.list_comments(post.id).await?;
        Ok(PostDetail { post, comments })
    }

    /// Clear the global feed cache slot. The engine exposes the hook but
    /// never calls it on its own; post writes intentionally leave the slot
    /// alone until the TTL elapses.
    pub fn invalidate_feed_cache(&self) {
        self.cache.invalidate();
    }
}
