//! Data models for the Gantry planner
//!
//! Defines Rust types that map to the SurrealDB schema for tasks,
//! assignments, programmers, and related enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::month::Month;

/// Task lifecycle status
///
/// Represents where a requirement currently sits in the team's workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Unassigned,
    Assigned,
    InProgress,
    Delayed,
    Testing,
    Finished,
    Discarded,
}

impl Status {
    /// Returns the string representation used in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unassigned => "unassigned",
            Status::Assigned => "assigned",
            Status::InProgress => "in_progress",
            Status::Delayed => "delayed",
            Status::Testing => "testing",
            Status::Finished => "finished",
            Status::Discarded => "discarded",
        }
    }

    /// Parse a database string into a status, falling back to `Unassigned`.
    pub fn parse(s: &str) -> Status {
        match s {
            "assigned" => Status::Assigned,
            "in_progress" => Status::InProgress,
            "delayed" => Status::Delayed,
            "testing" => Status::Testing,
            "finished" => Status::Finished,
            "discarded" => Status::Discarded,
            _ => Status::Unassigned,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A requirement task tracked by the planner
///
/// Tasks are never deleted here; discarding a requirement is a status
/// change. Month fields are stored as raw `"YYYY-MM"` keys; unparseable
/// values simply keep the task off the planner grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (SurrealDB record ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,

    /// Requirement text shown on cards and pills
    pub requirement: String,

    /// Module/area label the requirement belongs to
    pub module: String,

    /// Current status
    pub status: Status,

    /// Optional planned start month (`"YYYY-MM"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<String>,

    /// Optional external link (issue tracker, document)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task with required fields
    pub fn new(requirement: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: None,
            requirement: requirement.into(),
            module: module.into(),
            status: Status::Unassigned,
            start_month: None,
            link: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the status of this task
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the planned start month
    pub fn with_start_month(mut self, key: impl Into<String>) -> Self {
        self.start_month = Some(key.into());
        self
    }

    /// Set the external link
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// The record key of this task, if it has been persisted.
    pub fn record_key(&self) -> Option<String> {
        self.id.as_ref().map(|t| t.id.to_string())
    }

    /// The start month parsed into the ordered month form, if valid.
    pub fn start(&self) -> Option<Month> {
        self.start_month.as_deref().and_then(Month::parse)
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.requirement == other.requirement
            && self.module == other.module
            && self.status == other.status
            && self.start_month == other.start_month
            && self.link == other.link
    }
}

impl Eq for Task {}

/// A persisted assignment record: one programmer working a task until an
/// end month.
///
/// Assignments belong to their task and only change through task-level
/// operations (move, resize, planner assignment). A programmer appears at
/// most once per task; reconciliation enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Unique identifier (SurrealDB record ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,

    /// Record key of the task this assignment belongs to
    pub task_id: String,

    /// Record key of the assigned programmer
    pub programmer_id: String,

    /// Month the programmer works until (`"YYYY-MM"`)
    pub end_month: String,
}

impl AssignmentRecord {
    /// Create a new unsaved assignment record.
    pub fn new(
        task_id: impl Into<String>,
        programmer_id: impl Into<String>,
        end_month: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            task_id: task_id.into(),
            programmer_id: programmer_id.into(),
            end_month: end_month.into(),
        }
    }

    /// The record key of this assignment, if it has been persisted.
    pub fn record_key(&self) -> Option<String> {
        self.id.as_ref().map(|t| t.id.to_string())
    }

    /// The end month parsed into the ordered month form, if valid.
    pub fn end(&self) -> Option<Month> {
        Month::parse(&self.end_month)
    }
}

/// A programmer that tasks can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Programmer {
    /// Unique identifier (SurrealDB record ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,

    /// Display name
    pub name: String,

    /// Hex color used for the lane marker (`"#RRGGBB"`)
    pub color: String,
}

impl Programmer {
    /// Create a new unsaved programmer.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: color.into(),
        }
    }

    /// The record key of this programmer, if it has been persisted.
    pub fn record_key(&self) -> Option<String> {
        self.id.as_ref().map(|t| t.id.to_string())
    }
}

/// Reference to a programmer in a desired assignment set.
///
/// `Unassigned` stands in for "nobody": it is never placed on the planner
/// and never persisted as a real assignment record. Reconciliation drops
/// these entries before diffing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProgrammerRef {
    /// No programmer; filtered out of planner lanes and persisted sets.
    Unassigned,
    /// A real programmer, by record key.
    Id(String),
}

impl ProgrammerRef {
    /// Whether this reference points at a real programmer.
    pub fn is_assigned(&self) -> bool {
        matches!(self, ProgrammerRef::Id(_))
    }

    /// The programmer record key, if assigned.
    pub fn key(&self) -> Option<&str> {
        match self {
            ProgrammerRef::Unassigned => None,
            ProgrammerRef::Id(key) => Some(key),
        }
    }
}
