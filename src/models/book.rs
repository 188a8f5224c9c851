// src/models/book.rs
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,                 // Catalog ID of the book
    pub title: String,              // Book title
    pub author: String,             // Author display name
    pub genre: Vec<String>,         // Zero or more genre labels
    pub publisher: String,          // Publisher display name
    pub published_year: i32,        // Year of first publication
    pub cover_url: Option<String>,  // Public URL of the cover image, if uploaded
}
