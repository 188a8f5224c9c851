// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,                  // Review ID
    pub book_id: String,             // ID of the book the review is associated with
    pub user_name: String,           // Display name of the reviewer
    pub user_avatar: Option<String>, // Avatar URL of the reviewer
    pub rating: u8,                  // Star rating, always 1..=5
    pub title: Option<String>,       // Optional headline
    pub content: String,             // Content of the review
    pub date: DateTime<Utc>,         // When the review was submitted
}
