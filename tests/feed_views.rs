//! Feed assembly against the in-memory store: the four views, their extra
//! context, and pagination behavior at the service boundary.

use std::sync::Arc;

use time::{Duration, macros::datetime};
use uuid::Uuid;

use brezza::application::feed::{FeedError, FeedQuery, FeedService, FeedView};
use brezza::application::repos::{CreatePostParams, PostsWriteRepo, RepoError};
use brezza::cache::{CacheConfig, GlobalFeedCache};
use brezza::infra::memory::MemoryStore;

fn feed_service(store: &Arc<MemoryStore>, page_size: u32) -> FeedService {
    let cache = Arc::new(GlobalFeedCache::new(&CacheConfig::default()));
    FeedService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        cache,
        page_size,
    )
}

async fn create_post(
    store: &MemoryStore,
    author_id: Uuid,
    group_id: Option<Uuid>,
    text: &str,
    created_at: time::OffsetDateTime,
) -> Result<(), RepoError> {
    store
        .create_post(CreatePostParams {
            author_id,
            group_id,
            text: text.to_string(),
            image: None,
            created_at: Some(created_at),
        })
        .await
        .map(|_| ())
}

/// 15 posts by `auth` in G1 with distinct increasing timestamps, then one
/// post by `auth` in G2, newer than all of them.
async fn seed_reference_scenario(store: &MemoryStore) -> (Uuid, String, String) {
    let author = store.create_author("auth").id;
    let g1 = store.create_group("Group One", Some("g1"), "first group").unwrap();
    let g2 = store.create_group("Group Two", Some("g2"), "second group").unwrap();

    let base = datetime!(2023-01-14 01:50 UTC);
    for index in 0..15 {
        create_post(
            store,
            author,
            Some(g1.id),
            &format!("g1 post {index}"),
            base + Duration::seconds(index),
        )
        .await
        .expect("g1 post");
    }
    create_post(
        store,
        author,
        Some(g2.id),
        "g2 post",
        base + Duration::seconds(100),
    )
    .await
    .expect("g2 post");

    (author, g1.slug, g2.slug)
}

#[tokio::test]
async fn global_feed_paginates_newest_first() {
    let store = Arc::new(MemoryStore::new());
    let (_, _, _) = seed_reference_scenario(&store).await;
    let service = feed_service(&store, 10);

    let first = service.global_feed(1).await.expect("page 1");
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_items, 16);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items[0].text, "g2 post");
    // The rest of page 1 is the newest slice of G1, newest first.
    assert_eq!(first.items[1].text, "g1 post 14");
    assert_eq!(first.items[9].text, "g1 post 6");

    let second = service.global_feed(2).await.expect("page 2");
    assert_eq!(second.items.len(), 6);
    assert_eq!(second.items[0].text, "g1 post 5");
    assert_eq!(second.items[5].text, "g1 post 0");
    assert!(!second.has_next());
}

#[tokio::test]
async fn group_feed_scopes_to_the_group_and_returns_it() {
    let store = Arc::new(MemoryStore::new());
    let (_, g1_slug, _) = seed_reference_scenario(&store).await;
    let service = feed_service(&store, 10);

    let first = service.group_feed(&g1_slug, 1).await.expect("page 1");
    assert_eq!(first.group.slug, g1_slug);
    assert_eq!(first.page.items.len(), 10);
    assert_eq!(first.page.total_items, 15);

    let second = service.group_feed(&g1_slug, 2).await.expect("page 2");
    assert_eq!(second.page.items.len(), 5);

    let missing = service.group_feed("no-such-group", 1).await;
    assert!(matches!(
        missing,
        Err(FeedError::NotFound { entity: "group" })
    ));
}

#[tokio::test]
async fn profile_feed_reports_follow_state() {
    let store = Arc::new(MemoryStore::new());
    let (author, _, _) = seed_reference_scenario(&store).await;
    let viewer = store.create_author("viewer").id;
    let service = feed_service(&store, 10);

    let anonymous = service.profile_feed(author, None, 1).await.expect("profile");
    assert_eq!(anonymous.author.username, "auth");
    assert!(!anonymous.following);
    assert_eq!(anonymous.page.total_items, 16);

    let not_following = service
        .profile_feed(author, Some(viewer), 1)
        .await
        .expect("profile");
    assert!(!not_following.following);

    use brezza::application::repos::FollowsRepo;
    store.insert_edge(viewer, author).await.expect("edge");
    let following = service
        .profile_feed(author, Some(viewer), 1)
        .await
        .expect("profile");
    assert!(following.following);

    let missing = service.profile_feed(Uuid::new_v4(), None, 1).await;
    assert!(matches!(
        missing,
        Err(FeedError::NotFound { entity: "author" })
    ));
}

#[tokio::test]
async fn out_of_range_pages_clamp_at_the_service_boundary() {
    let store = Arc::new(MemoryStore::new());
    seed_reference_scenario(&store).await;
    let service = feed_service(&store, 10);

    let clamped_high = service.global_feed(99).await.expect("clamped");
    assert_eq!(clamped_high.page, 2);
    assert_eq!(clamped_high.items.len(), 6);

    let clamped_low = service.global_feed(0).await.expect("clamped");
    assert_eq!(clamped_low.page, 1);
    assert_eq!(clamped_low.items.len(), 10);
}

#[tokio::test]
async fn empty_store_serves_a_single_empty_page() {
    let store = Arc::new(MemoryStore::new());
    let service = feed_service(&store, 10);

    let page = service.global_feed(3).await.expect("empty page");
    assert!(page.items.is_empty());
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn get_feed_dispatches_per_kind() {
    let store = Arc::new(MemoryStore::new());
    let (author, g1_slug, _) = seed_reference_scenario(&store).await;
    let service = feed_service(&store, 10);

    match service.get_feed(FeedQuery::Global { page: 1 }).await.unwrap() {
        FeedView::Global(page) => assert_eq!(page.items.len(), 10),
        other => panic!("unexpected view: {other:?}"),
    }

    match service
        .get_feed(FeedQuery::Group {
            slug: g1_slug,
            page: 2,
        })
        .await
        .unwrap()
    {
        FeedView::Group(feed) => assert_eq!(feed.page.items.len(), 5),
        other => panic!("unexpected view: {other:?}"),
    }

    match service
        .get_feed(FeedQuery::Profile {
            author_id: author,
            viewer_id: None,
            page: 1,
        })
        .await
        .unwrap()
    {
        FeedView::Profile(feed) => assert_eq!(feed.author.username, "auth"),
        other => panic!("unexpected view: {other:?}"),
    }

    let anonymous_following = service
        .get_feed(FeedQuery::Following {
            viewer_id: None,
            page: 1,
        })
        .await;
    assert!(matches!(
        anonymous_following,
        Err(FeedError::Unauthenticated)
    ));
}

#[tokio::test]
async fn post_detail_returns_comments_in_insertion_order() {
    let store = Arc::new(MemoryStore::new());
    let author = store.create_author("auth").id;
    let commenter = store.create_author("reader").id;
    create_post(
        &store,
        author,
        None,
        "a post worth discussing",
        datetime!(2023-06-01 12:00 UTC),
    )
    .await
    .expect("post");
    let service = feed_service(&store, 10);

    let post = service.global_feed(1).await.expect("feed").items[0].clone();
    store
        .add_comment(post.id, commenter, "first!")
        .await
        .expect("comment");
    store
        .add_comment(post.id, author, "thanks for reading")
        .await
        .expect("comment");

    let detail = service.post_detail(post.id).await.expect("detail");
    assert_eq!(detail.post.id, post.id);
    let texts: Vec<&str> = detail
        .comments
        .iter()
        .map(|comment| comment.text.as_str())
        .collect();
    assert_eq!(texts, vec!["first!", "thanks for reading"]);

    let missing = service.post_detail(9999).await;
    assert!(matches!(missing, Err(FeedError::NotFound { entity: "post" })));
}
