// src/models/report.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-submitted flag against a review, queued for admin disposition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub id: String,
    pub review_id: String,     // The flagged review
    pub reporter_name: String, // Who flagged it
    pub reason: String,        // Short reason category picked by the reporter
    pub description: String,   // Free-text detail
    pub date: DateTime<Utc>,
    pub status: ReportStatus,
}

/// Terminal once `Dismissed` or `ActionTaken`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Dismissed,
    ActionTaken,
}

impl ReportStatus {
    pub fn is_resolved(self) -> bool {
        matches!(self, ReportStatus::Dismissed | ReportStatus::ActionTaken)
    }
}
