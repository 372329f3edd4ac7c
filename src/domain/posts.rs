//! Post ordering rules shared by every scan.

use std::cmp::Ordering;

use crate::domain::entities::PostRecord;

/// Total feed order: creation time descending, id descending on ties.
///
/// The id tiebreak keeps pagination deterministic when two posts share a
/// timestamp: the later-created (higher id) post sorts first.
pub fn feed_order(a: &PostRecord, b: &PostRecord) -> Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

/// Sort posts into feed order in place.
pub fn sort_newest_first(posts: &mut [PostRecord]) {
    posts.sort_by(feed_order);
}
