/// Table reads and admin mutations against the backend collaborator.
/// Components call these from handlers and apply the results to local
/// signals; nothing here touches UI state.
use serde_json::json;
use uuid::Uuid;

use crate::backend::{decode_rows, BackendApi, BackendError, Filter};
use crate::models::book::Book;
use crate::models::discussion::Discussion;
use crate::models::report::{ReportStatus, ReviewReport};
use crate::models::request::{BookRequest, RequestStatus};
use crate::models::review::Review;
use crate::models::user::{BookStatusRow, UserAccount};

pub async fn fetch_books(api: &dyn BackendApi) -> Result<Vec<Book>, BackendError> {
    decode_rows(api.select("books", "*", &[], None).await?)
}

pub async fn fetch_reviews(api: &dyn BackendApi) -> Result<Vec<Review>, BackendError> {
    decode_rows(api.select("reviews", "*", &[], None).await?)
}

pub async fn fetch_reviews_by_user(
    api: &dyn BackendApi,
    user_name: &str,
) -> Result<Vec<Review>, BackendError> {
    let filters = [Filter::eq("userName", user_name)];
    decode_rows(api.select("reviews", "*", &filters, None).await?)
}

pub async fn fetch_status_rows(
    api: &dyn BackendApi,
    user_id: &str,
) -> Result<Vec<BookStatusRow>, BackendError> {
    let filters = [Filter::eq("userId", user_id)];
    decode_rows(api.select("bookStatuses", "*", &filters, None).await?)
}

pub async fn fetch_reports(api: &dyn BackendApi) -> Result<Vec<ReviewReport>, BackendError> {
    decode_rows(api.select("reviewReports", "*", &[], None).await?)
}

pub async fn fetch_requests(api: &dyn BackendApi) -> Result<Vec<BookRequest>, BackendError> {
    decode_rows(api.select("bookRequests", "*", &[], None).await?)
}

pub async fn fetch_users(api: &dyn BackendApi) -> Result<Vec<UserAccount>, BackendError> {
    decode_rows(api.select("profiles", "*", &[], None).await?)
}

pub async fn fetch_discussions(api: &dyn BackendApi) -> Result<Vec<Discussion>, BackendError> {
    decode_rows(api.select("discussions", "*", &[], None).await?)
}

/// Submit a new review from the book page form.
pub async fn submit_review(
    api: &dyn BackendApi,
    book_id: &str,
    user_name: &str,
    rating: u8,
    title: Option<String>,
    content: String,
) -> Result<Review, BackendError> {
    let review = Review {
        id: Uuid::new_v4().to_string(),
        book_id: book_id.to_string(),
        user_name: user_name.to_string(),
        user_avatar: None,
        rating,
        title,
        content,
        date: chrono::Utc::now(),
    };
    let row = serde_json::to_value(&review)
        .map_err(|e| BackendError::decode(e.to_string()))?;
    api.insert("reviews", row).await?;
    Ok(review)
}

pub async fn delete_review(api: &dyn BackendApi, review_id: &str) -> Result<(), BackendError> {
    api.delete("reviews", &[Filter::eq("id", review_id)]).await
}

pub async fn delete_book(api: &dyn BackendApi, book_id: &str) -> Result<(), BackendError> {
    api.delete("books", &[Filter::eq("id", book_id)]).await
}

/// Resolve a report. `ActionTaken` also deletes the reported review;
/// either way the report reaches a terminal status.
pub async fn resolve_report(
    api: &dyn BackendApi,
    report: &ReviewReport,
    disposition: ReportStatus,
) -> Result<(), BackendError> {
    if disposition == ReportStatus::ActionTaken {
        delete_review(api, &report.review_id).await?;
    }
    api.update(
        "reviewReports",
        &[Filter::eq("id", &report.id)],
        json!({ "status": disposition }),
    )
    .await
}

pub async fn resolve_request(
    api: &dyn BackendApi,
    request_id: &str,
    disposition: RequestStatus,
) -> Result<(), BackendError> {
    api.update(
        "bookRequests",
        &[Filter::eq("id", request_id)],
        json!({ "status": disposition }),
    )
    .await
}

pub async fn set_user_banned(
    api: &dyn BackendApi,
    user_id: &str,
    banned: bool,
) -> Result<(), BackendError> {
    api.update(
        "profiles",
        &[Filter::eq("id", user_id)],
        json!({ "banned": banned }),
    )
    .await
}

pub async fn set_discussion_locked(
    api: &dyn BackendApi,
    discussion_id: &str,
    locked: bool,
) -> Result<(), BackendError> {
    api.update(
        "discussions",
        &[Filter::eq("id", discussion_id)],
        json!({ "locked": locked }),
    )
    .await
}

pub async fn delete_discussion(
    api: &dyn BackendApi,
    discussion_id: &str,
) -> Result<(), BackendError> {
    api.delete("discussions", &[Filter::eq("id", discussion_id)])
        .await
}

/// Upload an avatar image and return its public URL.
pub async fn upload_avatar(
    api: &dyn BackendApi,
    user_id: &str,
    bytes: Vec<u8>,
) -> Result<String, BackendError> {
    api.upload("avatars", &format!("{user_id}.png"), bytes).await
}
