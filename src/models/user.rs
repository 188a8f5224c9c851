// src/models/user.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub banned: bool,
}

/// One row of a user's shelf: which book, and where it sits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookStatusRow {
    pub book_id: String,
    pub status: ShelfStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ShelfStatus {
    WantToRead,
    Reading,
    Finished,
}

impl ShelfStatus {
    pub fn label(self) -> &'static str {
        match self {
            ShelfStatus::WantToRead => "Want to read",
            ShelfStatus::Reading => "Currently reading",
            ShelfStatus::Finished => "Finished",
        }
    }
}
