// src/models/request.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reader's request for a book missing from the catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub additional_notes: Option<String>,
    pub requested_by: String,
    pub request_date: DateTime<Utc>,
    pub status: RequestStatus,
}

/// Terminal once `Approved` or `Rejected`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}
