//! Domain entities mirrored from the backing content store.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// A published post. `id` is store-assigned and monotonically increasing;
/// `author_id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: i64,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    pub image: Option<String>,
    pub created_at: OffsetDateTime,
}

/// A topical group posts may be filed under. The slug is the external
/// lookup key and unique across groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRecord {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// An author. Opaque foreign entity; the engine reads it but never creates
/// or mutates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorRecord {
    pub id: Uuid,
    pub username: String,
}

/// A comment attached to a post, returned in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub id: i64,
    pub post_id: i64,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: OffsetDateTime,
}

/// A directed follow edge. The edge set never contains duplicate pairs;
/// self-loops are rejected at mutation time by the follow service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FollowEdge {
    pub follower_id: Uuid,
    pub author_id: Uuid,
}
