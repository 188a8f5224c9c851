// src/models/discussion.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A community discussion thread, moderated from the admin panel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub reply_count: u32,
    pub locked: bool,
}
