//! Room-change requests: status filter, search and ordering.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::style::Variant;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum RoomChangeStatus {
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "approved")]
    Approved,
    #[serde(alias = "rejected")]
    Rejected,
}

impl RoomChangeStatus {
    pub const ALL: [RoomChangeStatus; 3] = [
        RoomChangeStatus::Pending,
        RoomChangeStatus::Approved,
        RoomChangeStatus::Rejected,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub const fn badge_variant(self) -> Variant {
        match self {
            Self::Pending => Variant::Warning,
            Self::Approved => Variant::Success,
            Self::Rejected => Variant::Danger,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomChangeRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub student_name: String,
    pub current_room: String,
    pub requested_room: String,
    #[serde(default)]
    pub reason: String,
    pub status: RoomChangeStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoomChangeFilter {
    pub status: Option<RoomChangeStatus>,
    pub query: String,
}

impl RoomChangeFilter {
    /// Searches student name, both rooms and the reason.
    pub fn matches(&self, request: &RoomChangeRequest) -> bool {
        if self.status.is_some_and(|status| status != request.status) {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        needle.is_empty()
            || [
                &request.student_name,
                &request.current_room,
                &request.requested_room,
                &request.reason,
            ]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RoomChangeSort {
    #[default]
    Newest,
    Oldest,
    Student,
}

impl RoomChangeSort {
    pub fn compare(self, a: &RoomChangeRequest, b: &RoomChangeRequest) -> Ordering {
        match self {
            Self::Newest => b.created_at.cmp(&a.created_at),
            Self::Oldest => a.created_at.cmp(&b.created_at),
            Self::Student => a
                .student_name
                .to_lowercase()
                .cmp(&b.student_name.to_lowercase()),
        }
        .then_with(|| a.id.cmp(&b.id))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RoomChangeCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomChangeList {
    requests: Vec<RoomChangeRequest>,
    pub filter: RoomChangeFilter,
    pub sort: RoomChangeSort,
}

impl RoomChangeList {
    pub fn new(requests: Vec<RoomChangeRequest>) -> Self {
        Self {
            requests,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> &[RoomChangeRequest] {
        &self.requests
    }

    pub fn visible(&self) -> Vec<&RoomChangeRequest> {
        let mut visible: Vec<_> = self
            .requests
            .iter()
            .filter(|request| self.filter.matches(request))
            .collect();
        visible.sort_by(|a, b| self.sort.compare(a, b));
        visible
    }

    pub fn counts(&self) -> RoomChangeCounts {
        self.requests
            .iter()
            .fold(RoomChangeCounts::default(), |mut counts, request| {
                match request.status {
                    RoomChangeStatus::Pending => counts.pending += 1,
                    RoomChangeStatus::Approved => counts.approved += 1,
                    RoomChangeStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }

    /// Records a decision. Returns false for an unknown id.
    pub fn set_status(&mut self, id: &str, status: RoomChangeStatus) -> bool {
        match self.requests.iter_mut().find(|request| request.id == id) {
            Some(request) => {
                request.status = status;
                true
            }
            None => false,
        }
    }
}
