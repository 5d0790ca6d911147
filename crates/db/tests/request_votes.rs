//! Repository-level tests for the vote toggle invariants and the comment
//! cascade on request deletion.

use sqlx::PgPool;

use addonforge_db::models::comment::InsertComment;
use addonforge_db::models::request::InsertRequest;
use addonforge_db::models::user::CreateUser;
use addonforge_db::repositories::{CommentRepo, RequestRepo, UserRepo};

async fn seed_user(pool: &PgPool, email: &str, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$fake-hash-for-tests".to_string(),
            display_name: name.to_string(),
            avatar_url: None,
        },
    )
    .await
    .expect("seeding user should succeed")
    .id
}

async fn seed_request(pool: &PgPool, user_id: i64) -> i64 {
    RequestRepo::create(
        pool,
        &InsertRequest {
            title: "Better quest log".to_string(),
            description: "A description that is comfortably over twenty characters.".to_string(),
            category: "UI".to_string(),
            priority: "medium".to_string(),
            user_id,
            user_name: "Medivh".to_string(),
            user_avatar: None,
            tags: None,
        },
    )
    .await
    .expect("seeding request should succeed")
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn counter_always_equals_voter_set_cardinality(pool: PgPool) {
    let alice = seed_user(&pool, "alice@azeroth.example", "Alice").await;
    let bob = seed_user(&pool, "bob@azeroth.example", "Bobby").await;
    let request_id = seed_request(&pool, alice).await;

    // Any interleaving of toggles keeps the pair in lockstep.
    for voter in [alice, bob, alice, alice, bob] {
        let row = RequestRepo::toggle_vote(&pool, request_id, voter)
            .await
            .unwrap()
            .expect("request should exist");
        assert_eq!(row.upvotes as usize, row.upvoted_by.len());
        // No duplicate voter ids.
        let mut deduped = row.upvoted_by.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), row.upvoted_by.len());
    }

    // alice toggled three times (net: in), bob twice (net: out).
    let row = RequestRepo::find_by_id(&pool, request_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.upvotes, 1);
    assert_eq!(row.upvoted_by, vec![alice]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_on_missing_request_returns_none(pool: PgPool) {
    let alice = seed_user(&pool, "alice@azeroth.example", "Alice").await;
    let row = RequestRepo::toggle_vote(&pool, 424242, alice).await.unwrap();
    assert!(row.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_request_cascades_to_its_comments(pool: PgPool) {
    let alice = seed_user(&pool, "alice@azeroth.example", "Alice").await;
    let request_id = seed_request(&pool, alice).await;

    CommentRepo::create(
        &pool,
        &InsertComment {
            request_id,
            user_id: alice,
            user_name: "Alice".to_string(),
            user_avatar: None,
            text: "First!".to_string(),
            is_admin: false,
            parent_id: None,
            reply_to_user_name: None,
        },
    )
    .await
    .expect("comment should insert");
    assert_eq!(CommentRepo::count_all(&pool).await.unwrap(), 1);

    assert!(RequestRepo::delete(&pool, request_id).await.unwrap());
    assert_eq!(CommentRepo::count_all(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reply_target_lookup_only_finds_top_level_comments_of_the_request(pool: PgPool) {
    let alice = seed_user(&pool, "alice@azeroth.example", "Alice").await;
    let request_id = seed_request(&pool, alice).await;
    let other_request = seed_request(&pool, alice).await;

    let top_level = CommentRepo::create(
        &pool,
        &InsertComment {
            request_id,
            user_id: alice,
            user_name: "Alice".to_string(),
            user_avatar: None,
            text: "Top level".to_string(),
            is_admin: false,
            parent_id: None,
            reply_to_user_name: None,
        },
    )
    .await
    .unwrap();

    let reply = CommentRepo::create(
        &pool,
        &InsertComment {
            request_id,
            user_id: alice,
            user_name: "Alice".to_string(),
            user_avatar: None,
            text: "A reply".to_string(),
            is_admin: false,
            parent_id: Some(top_level.id),
            reply_to_user_name: Some("Alice".to_string()),
        },
    )
    .await
    .unwrap();

    // The top-level comment is a valid target for its own request...
    assert!(CommentRepo::find_reply_target(&pool, request_id, top_level.id)
        .await
        .unwrap()
        .is_some());
    // ...but not from another request, and a reply is never a target.
    assert!(CommentRepo::find_reply_target(&pool, other_request, top_level.id)
        .await
        .unwrap()
        .is_none());
    assert!(CommentRepo::find_reply_target(&pool, request_id, reply.id)
        .await
        .unwrap()
        .is_none());
}
