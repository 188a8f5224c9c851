use chrono::{TimeZone, Utc};
use serde_json::json;

use litlens::backend::MemoryBackend;
use litlens::catalog;
use litlens::models::user::ShelfStatus;
use litlens::profile::build_profile;

fn backend() -> MemoryBackend {
    let date = "2026-08-01T00:00:00Z";
    MemoryBackend::new()
        .with_table(
            "books",
            vec![
                json!({
                    "id": "b1", "title": "Dune", "author": "Frank Herbert",
                    "genre": ["sf"], "publisher": "Chilton",
                    "publishedYear": 1965, "coverUrl": null
                }),
                json!({
                    "id": "b2", "title": "Emma", "author": "Jane Austen",
                    "genre": [], "publisher": "John Murray",
                    "publishedYear": 1815, "coverUrl": null
                }),
            ],
        )
        .with_table(
            "bookStatuses",
            vec![
                json!({"userId": "u1", "bookId": "b1", "status": "reading", "updatedAt": date}),
                json!({"userId": "u1", "bookId": "b2", "status": "finished", "updatedAt": date}),
                json!({"userId": "u2", "bookId": "b2", "status": "wantToRead", "updatedAt": date}),
            ],
        )
        .with_table(
            "reviews",
            vec![
                json!({
                    "id": "r1", "bookId": "b2", "userName": "alice", "userAvatar": null,
                    "rating": 4, "title": null, "content": "lovely", "date": date
                }),
                json!({
                    "id": "r2", "bookId": "gone", "userName": "alice", "userAvatar": null,
                    "rating": 2, "title": null, "content": "book vanished", "date": date
                }),
                json!({
                    "id": "r3", "bookId": "b1", "userName": "bob", "userAvatar": null,
                    "rating": 5, "title": null, "content": "not alice's", "date": date
                }),
            ],
        )
}

#[tokio::test]
async fn shelves_group_by_status_for_one_user() {
    let backend = backend();
    let books = catalog::fetch_books(&backend).await.unwrap();
    let rows = catalog::fetch_status_rows(&backend, "u1").await.unwrap();
    let reviews = catalog::fetch_reviews_by_user(&backend, "alice").await.unwrap();

    let profile = build_profile(&rows, &reviews, &books);

    let reading: Vec<_> = profile
        .shelf(ShelfStatus::Reading)
        .into_iter()
        .map(|e| e.book.title.clone())
        .collect();
    assert_eq!(reading, vec!["Dune"]);

    let finished: Vec<_> = profile
        .shelf(ShelfStatus::Finished)
        .into_iter()
        .map(|e| e.book.title.clone())
        .collect();
    assert_eq!(finished, vec!["Emma"]);

    assert!(profile.shelf(ShelfStatus::WantToRead).is_empty());
}

#[tokio::test]
async fn review_history_is_scoped_and_tolerates_deleted_books() {
    let backend = backend();
    let books = catalog::fetch_books(&backend).await.unwrap();
    let rows = catalog::fetch_status_rows(&backend, "u1").await.unwrap();
    let reviews = catalog::fetch_reviews_by_user(&backend, "alice").await.unwrap();

    let profile = build_profile(&rows, &reviews, &books);

    assert_eq!(profile.reviews.len(), 2);
    assert_eq!(profile.reviews[0].book_title.as_deref(), Some("Emma"));
    assert_eq!(profile.reviews[1].book_title, None);
    assert_eq!(
        profile.reviews[1].review.date,
        Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()
    );
}
