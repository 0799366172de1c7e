//! Database schema initialization for Gantry
//!
//! Defines the SurrealDB schema for tasks, assignments, and programmers.

use crate::error::DbError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// SQL statements for schema initialization
mod sql {
    /// Define the task table with all fields
    pub const DEFINE_TASK_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS task SCHEMAFULL;

        DEFINE FIELD requirement ON task TYPE string;

        DEFINE FIELD module ON task TYPE string;

        DEFINE FIELD status ON task TYPE string
            ASSERT $value IN ["unassigned", "assigned", "in_progress", "delayed", "testing", "finished", "discarded"];

        DEFINE FIELD start_month ON task TYPE option<string>;

        DEFINE FIELD link ON task TYPE option<string>;

        DEFINE FIELD created_at ON task TYPE datetime DEFAULT time::now();

        DEFINE FIELD updated_at ON task TYPE datetime DEFAULT time::now();
    "#;

    /// Define the assignment table linking programmers to tasks
    pub const DEFINE_ASSIGNMENT_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS assignment SCHEMAFULL;

        DEFINE FIELD task_id ON assignment TYPE string;

        DEFINE FIELD programmer_id ON assignment TYPE string;

        DEFINE FIELD end_month ON assignment TYPE string;

        DEFINE INDEX IF NOT EXISTS assignment_task ON assignment FIELDS task_id;
    "#;

    /// Define the programmer table
    pub const DEFINE_PROGRAMMER_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS programmer SCHEMAFULL;

        DEFINE FIELD name ON programmer TYPE string;

        DEFINE FIELD color ON programmer TYPE string;

        DEFINE INDEX IF NOT EXISTS programmer_name ON programmer FIELDS name UNIQUE;
    "#;
}

/// Initialize the database schema.
///
/// Creates the task, assignment, and programmer tables with all required
/// fields and constraints.
///
/// This function is idempotent - it can be called multiple times safely
/// as it uses `IF NOT EXISTS` clauses.
///
/// # Arguments
///
/// * `client` - Reference to the SurrealDB client
///
/// # Errors
///
/// Returns `DbError::Schema` if any schema definition fails.
pub async fn init_schema(client: &Surreal<Db>) -> Result<(), DbError> {
    client
        .query(sql::DEFINE_TASK_TABLE)
        .await
        .map_err(|e| DbError::Schema(Box::new(e)))?;

    client
        .query(sql::DEFINE_ASSIGNMENT_TABLE)
        .await
        .map_err(|e| DbError::Schema(Box::new(e)))?;

    client
        .query(sql::DEFINE_PROGRAMMER_TABLE)
        .await
        .map_err(|e| DbError::Schema(Box::new(e)))?;

    Ok(())
}
