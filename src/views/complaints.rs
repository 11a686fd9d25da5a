//! Complaint list state: filtering, sorting, derived stats and live merges.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::style::Variant;

use super::feed::FeedMessage;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[serde(alias = "pending")]
    Pending,
    #[serde(rename = "In Progress", alias = "in_progress", alias = "in-progress")]
    InProgress,
    #[serde(alias = "resolved")]
    Resolved,
    #[serde(alias = "closed")]
    Closed,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 4] = [
        ComplaintStatus::Pending,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
        ComplaintStatus::Closed,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&normalized))
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    pub const fn badge_variant(self) -> Variant {
        match self {
            Self::Pending => Variant::Warning,
            Self::InProgress => Variant::Info,
            Self::Resolved => Variant::Success,
            Self::Closed => Variant::Secondary,
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub enum ComplaintPriority {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
    #[serde(alias = "urgent")]
    Urgent,
}

impl ComplaintPriority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    pub const fn tag_variant(self) -> Variant {
        match self {
            Self::Low => Variant::Secondary,
            Self::Medium => Variant::Info,
            Self::High => Variant::Warning,
            Self::Urgent => Variant::Danger,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub priority: ComplaintPriority,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Complaint {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.title.as_str()),
            Some(self.description.as_str()),
            self.category.as_deref(),
            self.room.as_deref(),
            self.student_name.as_deref(),
        ]
        .into_iter()
        .flatten()
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at).max(self.created_at)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ComplaintFilter {
    pub status: Option<ComplaintStatus>,
    pub priority: Option<ComplaintPriority>,
    pub query: String,
}

impl ComplaintFilter {
    pub fn status(mut self, status: Option<ComplaintStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: Option<ComplaintPriority>) -> Self {
        self.priority = priority;
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || !self.query.trim().is_empty()
    }

    /// Case-insensitive substring search over title, description, category,
    /// room and student name.
    pub fn matches(&self, complaint: &Complaint) -> bool {
        if self.status.is_some_and(|status| status != complaint.status) {
            return false;
        }
        if self
            .priority
            .is_some_and(|priority| priority != complaint.priority)
        {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        needle.is_empty()
            || complaint
                .search_fields()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ComplaintSort {
    #[default]
    Newest,
    Oldest,
    /// Most urgent first, newest first within a priority.
    Priority,
    /// Pending, In Progress, Resolved, Closed.
    Status,
}

impl ComplaintSort {
    pub fn compare(self, a: &Complaint, b: &Complaint) -> Ordering {
        let newest = b.created_at.cmp(&a.created_at);
        match self {
            Self::Newest => newest,
            Self::Oldest => a.created_at.cmp(&b.created_at),
            Self::Priority => b.priority.cmp(&a.priority).then(newest),
            Self::Status => a.status.cmp(&b.status).then(newest),
        }
        .then_with(|| a.id.cmp(&b.id))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ComplaintStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
    pub urgent_open: usize,
}

impl ComplaintStats {
    pub fn from_complaints<'a>(complaints: impl IntoIterator<Item = &'a Complaint>) -> Self {
        complaints
            .into_iter()
            .fold(Self::default(), |mut stats, complaint| {
                stats.total += 1;
                match complaint.status {
                    ComplaintStatus::Pending => stats.pending += 1,
                    ComplaintStatus::InProgress => stats.in_progress += 1,
                    ComplaintStatus::Resolved => stats.resolved += 1,
                    ComplaintStatus::Closed => stats.closed += 1,
                }
                if complaint.status.is_open() && complaint.priority == ComplaintPriority::Urgent {
                    stats.urgent_open += 1;
                }
                stats
            })
    }

    pub fn count(&self, status: ComplaintStatus) -> usize {
        match status {
            ComplaintStatus::Pending => self.pending,
            ComplaintStatus::InProgress => self.in_progress,
            ComplaintStatus::Resolved => self.resolved,
            ComplaintStatus::Closed => self.closed,
        }
    }

    pub fn open(&self) -> usize {
        self.pending + self.in_progress
    }

    /// Share of complaints resolved or closed, in percent.
    pub fn resolution_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.resolved + self.closed) as f64 / self.total as f64 * 100.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeOutcome {
    Inserted,
    Updated,
}

/// Complaints loaded over REST plus whatever the live feed has pushed since.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplaintBoard {
    complaints: Vec<Complaint>,
    filter: ComplaintFilter,
    sort: ComplaintSort,
}

impl ComplaintBoard {
    pub fn new(complaints: Vec<Complaint>) -> Self {
        let mut board = Self::default();
        board.replace_all(complaints);
        board
    }

    /// Swaps in a fresh list, keeping the last copy of duplicated ids.
    pub fn replace_all(&mut self, complaints: Vec<Complaint>) {
        self.complaints.clear();
        for complaint in complaints {
            self.upsert(complaint);
        }
    }

    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    pub fn get(&self, id: &str) -> Option<&Complaint> {
        self.complaints.iter().find(|complaint| complaint.id == id)
    }

    pub fn filter(&self) -> &ComplaintFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ComplaintFilter) {
        self.filter = filter;
    }

    pub fn set_status_filter(&mut self, status: Option<ComplaintStatus>) {
        self.filter.status = status;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn clear_filter(&mut self) {
        self.filter = ComplaintFilter::default();
    }

    pub fn sort(&self) -> ComplaintSort {
        self.sort
    }

    pub fn set_sort(&mut self, sort: ComplaintSort) {
        self.sort = sort;
    }

    /// Complaints passing the filter, in sort order.
    pub fn visible(&self) -> Vec<&Complaint> {
        let mut visible: Vec<&Complaint> = self
            .complaints
            .iter()
            .filter(|complaint| self.filter.matches(complaint))
            .collect();
        visible.sort_by(|a, b| self.sort.compare(a, b));
        visible
    }

    /// Stats over every loaded complaint, independent of the filter.
    pub fn stats(&self) -> ComplaintStats {
        ComplaintStats::from_complaints(&self.complaints)
    }

    /// Merges one live update. A `new_complaint` for an id already present
    /// replaces it, so replayed messages never duplicate rows.
    pub fn apply(&mut self, message: FeedMessage) -> MergeOutcome {
        let outcome = self.upsert(message.into_complaint());
        tracing::trace!(?outcome, "feed message merged");
        outcome
    }

    fn upsert(&mut self, complaint: Complaint) -> MergeOutcome {
        match self
            .complaints
            .iter_mut()
            .find(|existing| existing.id == complaint.id)
        {
            Some(existing) => {
                *existing = complaint;
                MergeOutcome::Updated
            }
            None => {
                self.complaints.push(complaint);
                MergeOutcome::Inserted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn complaint(id: &str, status: ComplaintStatus, day: u32) -> Complaint {
        Complaint {
            id: id.to_string(),
            title: format!("Complaint {id}"),
            description: String::new(),
            status,
            priority: ComplaintPriority::Medium,
            category: Some("Plumbing".to_string()),
            room: Some(format!("B-{day}")),
            student_name: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn status_serializes_with_display_names() {
        let json = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let parsed: ComplaintStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(parsed, ComplaintStatus::InProgress);
        assert_eq!(
            ComplaintStatus::from_name("in-progress"),
            Some(ComplaintStatus::InProgress)
        );
        assert_eq!(ComplaintStatus::from_name("escalated"), None);
    }

    #[test]
    fn query_matches_any_text_field() {
        let filter = ComplaintFilter::default().query("plumb");
        assert!(filter.matches(&complaint("1", ComplaintStatus::Pending, 1)));
        let filter = ComplaintFilter::default().query("b-2");
        assert!(!filter.matches(&complaint("1", ComplaintStatus::Pending, 1)));
        assert!(filter.matches(&complaint("2", ComplaintStatus::Pending, 2)));
    }

    #[test]
    fn status_sort_keeps_open_work_on_top() {
        let mut board = ComplaintBoard::new(vec![
            complaint("a", ComplaintStatus::Closed, 5),
            complaint("b", ComplaintStatus::Pending, 1),
            complaint("c", ComplaintStatus::InProgress, 3),
        ]);
        board.set_sort(ComplaintSort::Status);
        let ids: Vec<_> = board.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);

        board.set_sort(ComplaintSort::Newest);
        let ids: Vec<_> = board.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }

    #[test]
    fn stats_count_open_urgent_work() {
        let mut urgent = complaint("u", ComplaintStatus::InProgress, 2);
        urgent.priority = ComplaintPriority::Urgent;
        let mut done = complaint("d", ComplaintStatus::Resolved, 2);
        done.priority = ComplaintPriority::Urgent;
        let stats = ComplaintStats::from_complaints(&[urgent, done]);
        assert_eq!(stats.urgent_open, 1);
        assert_eq!(stats.open(), 1);
        assert_eq!(stats.resolution_rate(), 50.0);
        assert_eq!(ComplaintStats::default().resolution_rate(), 0.0);
    }

    #[test]
    fn duplicate_ids_collapse_on_load() {
        let board = ComplaintBoard::new(vec![
            complaint("x", ComplaintStatus::Pending, 1),
            complaint("x", ComplaintStatus::Resolved, 1),
        ]);
        assert_eq!(board.complaints().len(), 1);
        assert_eq!(board.get("x").map(|c| c.status), Some(ComplaintStatus::Resolved));
    }
}
