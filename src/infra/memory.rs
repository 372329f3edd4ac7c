//! In-memory reference store implementing the repository contracts.
//!
//! Backs the test suite and any embedding that does not bring its own
//! persistence. Scans reproduce the store contract exactly: creation time
//! descending, ties broken by id descending.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{
    AuthorsRepo, CreatePostParams, EditPostParams, FollowsRepo, GroupsRepo, PostsRepo,
    PostsWriteRepo, RepoError,
};
use crate::cache::lock::{rw_read, rw_write};
use crate::domain::entities::{AuthorRecord, CommentRecord, FollowEdge, GroupRecord, PostRecord};
use crate::domain::posts::sort_newest_first;

const SOURCE: &str = "infra::memory";

#[derive(Default)]
struct State {
    posts: Vec<PostRecord>,
    comments: Vec<CommentRecord>,
    groups: Vec<GroupRecord>,
    authors: Vec<AuthorRecord>,
    follows: HashSet<FollowEdge>,
    next_post_id: i64,
    next_comment_id: i64,
}

/// Ordered in-memory content store and follow graph.
///
/// Post and comment ids are assigned from a monotonic sequence under the
/// state lock, so insertion order and id order always agree.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an author. Authors are foreign entities to the engine; only the
    /// store adapter creates them.
    pub fn create_author(&self, username: &str) -> AuthorRecord {
        let author = AuthorRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
        };
        rw_write(&self.state, SOURCE, "create_author")
            .authors
            .push(author.clone());
        author
    }

    /// Seed a group. The slug defaults to a slugified title and must be
    /// unique across groups.
    pub fn create_group(
        &self,
        title: &str,
        slug: Option<&str>,
        description: &str,
    ) -> Result<GroupRecord, RepoError> {
        let slug = match slug {
            Some(value) => value.to_string(),
            None => slug::slugify(title),
        };

        let mut state = rw_write(&self.state, SOURCE, "create_group");
        if state.groups.iter().any(|group| group.slug == slug) {
            return Err(RepoError::invalid_input(format!(
                "group slug `{slug}` already exists"
            )));
        }

        let group = GroupRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug,
            description: description.to_string(),
        };
        state.groups.push(group.clone());
        Ok(group)
    }

    fn sorted_posts<P>(&self, predicate: P) -> Vec<PostRecord>
    where
        P: Fn(&PostRecord) -> bool,
    {
        let state = rw_read(&self.state, SOURCE, "scan");
        let mut posts: Vec<PostRecord> = state
            .posts
            .iter()
            .filter(|post| predicate(post))
            .cloned()
            .collect();
        sort_newest_first(&mut posts);
        posts
    }
}

#[async_trait]
impl PostsRepo for MemoryStore {
    async fn scan_all(&self) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.sorted_posts(|_| true))
    }

    async fn scan_by_group(&self, group_id: Uuid) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.sorted_posts(|post| post.group_id == Some(group_id)))
    }

    async fn scan_by_author(&self, author_id: Uuid) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.sorted_posts(|post| post.author_id == author_id))
    }

    async fn scan_by_authors(
        &self,
        author_ids: &HashSet<Uuid>,
    ) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.sorted_posts(|post| author_ids.contains(&post.author_id)))
    }

    async fn find_post(&self, id: i64) -> Result<Option<PostRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_post");
        Ok(state.posts.iter().find(|post| post.id == id).cloned())
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "list_comments");
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PostsWriteRepo for MemoryStore {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        if params.text.trim().is_empty() {
            return Err(RepoError::invalid_input("post text must not be empty"));
        }

        let mut state = rw_write(&self.state, SOURCE, "create_post");
        state.next_post_id += 1;
        let post = PostRecord {
            id: state.next_post_id,
            author_id: params.author_id,
            group_id: params.group_id,
            text: params.text,
            image: params.image,
            created_at: params.created_at.unwrap_or_else(OffsetDateTime::now_utc),
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn edit_post(&self, params: EditPostParams) -> Result<PostRecord, RepoError> {
        if params.text.trim().is_empty() {
            return Err(RepoError::invalid_input("post text must not be empty"));
        }

        let mut state = rw_write(&self.state, SOURCE, "edit_post");
        let post = state
            .posts
            .iter_mut()
            .find(|post| post.id == params.id)
            .ok_or(RepoError::NotFound)?;

        post.text = params.text;
        post.group_id = params.group_id;
        post.image = params.image;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "delete_post");
        state.posts.retain(|post| post.id != id);
        state.comments.retain(|comment| comment.post_id != id);
        Ok(())
    }

    async fn add_comment(
        &self,
        post_id: i64,
        author_id: Uuid,
        text: &str,
    ) -> Result<CommentRecord, RepoError> {
        if text.trim().is_empty() {
            return Err(RepoError::invalid_input("comment text must not be empty"));
        }

        let mut state = rw_write(&self.state, SOURCE, "add_comment");
        if !state.posts.iter().any(|post| post.id == post_id) {
            return Err(RepoError::NotFound);
        }

        state.next_comment_id += 1;
        let comment = CommentRecord {
            id: state.next_comment_id,
            post_id,
            author_id,
            text: text.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }
}

#[async_trait]
impl GroupsRepo for MemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<GroupRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_group_by_slug");
        Ok(state.groups.iter().find(|group| group.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_group_by_id");
        Ok(state.groups.iter().find(|group| group.id == id).cloned())
    }
}

#[async_trait]
impl AuthorsRepo for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthorRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_author_by_id");
        Ok(state.authors.iter().find(|author| author.id == id).cloned())
    }
}

#[async_trait]
impl FollowsRepo for MemoryStore {
    async fn edge_exists(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RepoError> {
        let state = rw_read(&self.state, SOURCE, "edge_exists");
        Ok(state.follows.contains(&FollowEdge {
            follower_id,
            author_id,
        }))
    }

    async fn insert_edge(&self, follower_id: Uuid, author_id: Uuid) -> Result<(), RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "insert_edge");
        state.follows.insert(FollowEdge {
            follower_id,
            author_id,
        });
        Ok(())
    }

    async fn delete_edge(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "delete_edge");
        Ok(state.follows.remove(&FollowEdge {
            follower_id,
            author_id,
        }))
    }

    async fn followed_authors(&self, follower_id: Uuid) -> Result<HashSet<Uuid>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "followed_authors");
        Ok(state
            .follows
            .iter()
            .filter(|edge| edge.follower_id == follower_id)
            .map(|edge| edge.author_id)
            .collect())
    }
}
