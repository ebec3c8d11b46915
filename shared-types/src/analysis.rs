use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Project, TeamMember};

/// A project paired with its distance to the deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ScheduledProject {
    pub project: Project,
    /// Negative when the deadline has passed
    pub days_remaining: i64,
}

/// Number of projects sharing a status value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Facts derived from the loaded records at a given date.
///
/// `overdue` and `urgent` never share a project: urgent covers deadlines from
/// today up to `urgent_within_days`, overdue covers deadlines before today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct DerivedSnapshot {
    pub today: NaiveDate,
    pub urgent_within_days: i64,
    pub total_projects: usize,
    pub total_members: usize,
    pub in_progress_projects: usize,
    pub available_members: Vec<TeamMember>,
    pub overdue: Vec<ScheduledProject>,
    pub urgent: Vec<ScheduledProject>,
    pub overloaded_members: Vec<TeamMember>,
    /// In order of first appearance in the projects table
    pub status_histogram: Vec<StatusCount>,
    pub average_completion: u8,
    pub suggestions: Vec<String>,
}
