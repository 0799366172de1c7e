//! Task repository for CRUD operations on tasks
//!
//! Provides a repository pattern implementation for task operations,
//! encapsulating SurrealDB queries and providing a clean API.

use crate::error::{DbError, DbResult};
use crate::models::{Status, Task};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{debug, trace};

/// Repository for task CRUD operations
///
/// Encapsulates database queries for tasks, providing a clean API
/// that hides the underlying SurrealDB implementation details.
pub struct TaskRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Update structure for partial task updates
///
/// Only the fields that are set are written; everything else is left
/// untouched (partial merge semantics).
#[derive(Debug, Default)]
pub struct TaskUpdate {
    /// New requirement text (if Some)
    pub requirement: Option<String>,
    /// New module label (if Some)
    pub module: Option<String>,
    /// New status (if Some)
    pub status: Option<Status>,
    /// New start month; `Some(None)` clears the field
    pub start_month: Option<Option<String>>,
    /// New link; `Some(None)` clears the field
    pub link: Option<Option<String>>,
}

impl TaskUpdate {
    /// Create a new empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new requirement text
    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirement = Some(requirement.into());
        self
    }

    /// Set a new module label
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Set the task status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the start month (`"YYYY-MM"`)
    pub fn with_start_month(mut self, key: impl Into<String>) -> Self {
        self.start_month = Some(Some(key.into()));
        self
    }

    /// Clear the start month
    pub fn clear_start_month(mut self) -> Self {
        self.start_month = Some(None);
        self
    }

    /// Set the external link
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(Some(link.into()));
        self
    }

    /// Clear the external link
    pub fn clear_link(mut self) -> Self {
        self.link = Some(None);
        self
    }

    /// Check if any updates are specified
    pub fn has_updates(&self) -> bool {
        self.requirement.is_some()
            || self.module.is_some()
            || self.status.is_some()
            || self.start_month.is_some()
            || self.link.is_some()
    }
}

/// Minimal row for checking task existence
#[derive(Debug, Deserialize)]
struct IdOnly {
    #[allow(dead_code)]
    id: surrealdb::sql::Thing,
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\"', "\\\"")
}

impl<'a> TaskRepository<'a> {
    /// Create a new TaskRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Check if a task with the given ID exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let task: Option<IdOnly> = self
            .client
            .select(("task", id))
            .await
            .map_err(|e| DbError::Query(Box::new(e)))?;
        Ok(task.is_some())
    }

    /// Create a new task and return its record key.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn create(&self, task: &Task) -> DbResult<String> {
        debug!("Creating task: {}", task.requirement);
        trace!("Task data: {:?}", task);

        let start_month_str = match &task.start_month {
            Some(m) => format!("\"{}\"", escape(m)),
            None => "NONE".to_string(),
        };
        let link_str = match &task.link {
            Some(l) => format!("\"{}\"", escape(l)),
            None => "NONE".to_string(),
        };

        let query = format!(
            r#"CREATE task SET
                requirement = $requirement,
                module = $module,
                status = "{}",
                start_month = {},
                link = {}"#,
            task.status.as_str(),
            start_month_str,
            link_str
        );

        let mut result = self
            .client
            .query(&query)
            .bind(("requirement", task.requirement.clone()))
            .bind(("module", task.module.clone()))
            .await?;

        let created: Vec<Task> = result.take(0)?;
        created
            .first()
            .and_then(|t| t.record_key())
            .ok_or_else(|| DbError::ValidationError {
                message: "Task creation returned no record".to_string(),
            })
    }

    /// Get a task by ID.
    ///
    /// # Returns
    ///
    /// `Some(Task)` if found, `None` otherwise.
    pub async fn get(&self, id: &str) -> DbResult<Option<Task>> {
        debug!("Fetching task: {}", id);
        let task: Option<Task> = self.client.select(("task", id)).await.map_err(|e| {
            debug!("Failed to fetch task: {}: {}", id, e);
            DbError::Query(Box::new(e))
        })?;
        Ok(task)
    }

    /// List all tasks, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Task>> {
        let mut result = self
            .client
            .query("SELECT * FROM task ORDER BY created_at ASC")
            .await?;
        let tasks: Vec<Task> = result.take(0)?;
        Ok(tasks)
    }

    /// Apply partial updates to a task.
    ///
    /// Fields not present in `updates` are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn update(&self, id: &str, updates: &TaskUpdate) -> DbResult<()> {
        debug!("Updating task: {}", id);
        trace!("Updates: {:?}", updates);

        if !updates.has_updates() {
            debug!("No updates specified for task: {}", id);
            return Ok(());
        }

        let mut field_updates = Vec::new();

        if let Some(requirement) = &updates.requirement {
            field_updates.push(format!("requirement = \"{}\"", escape(requirement)));
        }

        if let Some(module) = &updates.module {
            field_updates.push(format!("module = \"{}\"", escape(module)));
        }

        if let Some(status) = &updates.status {
            field_updates.push(format!("status = '{}'", status.as_str()));
        }

        if let Some(start_month) = &updates.start_month {
            match start_month {
                Some(key) => field_updates.push(format!("start_month = \"{}\"", escape(key))),
                None => field_updates.push("start_month = NONE".to_string()),
            }
        }

        if let Some(link) = &updates.link {
            match link {
                Some(value) => field_updates.push(format!("link = \"{}\"", escape(value))),
                None => field_updates.push("link = NONE".to_string()),
            }
        }

        field_updates.push("updated_at = time::now()".to_string());

        let query = format!("UPDATE task:{} SET {}", id, field_updates.join(", "));
        self.client.query(&query).await?;
        Ok(())
    }
}
