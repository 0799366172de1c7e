//! Assignment repository and reconciliation
//!
//! Assignments are reconciled, not edited one by one: callers describe the
//! desired final set of (programmer, end-month) pairs for a task, and the
//! repository computes the minimal create/update/delete diff against the
//! persisted records, preserving record identities, and applies it inside a
//! single transaction.

use crate::error::{DbError, DbResult};
use crate::models::{AssignmentRecord, ProgrammerRef};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{debug, trace};

/// One entry in a task's desired assignment set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredAssignment {
    /// Who works on the task. `Unassigned` entries are discarded before
    /// diffing; they never become records.
    pub programmer: ProgrammerRef,
    /// Month the programmer works until (`"YYYY-MM"`)
    pub end_month: String,
}

impl DesiredAssignment {
    /// Desired assignment for a real programmer.
    pub fn to_programmer(programmer_id: impl Into<String>, end_month: impl Into<String>) -> Self {
        Self {
            programmer: ProgrammerRef::Id(programmer_id.into()),
            end_month: end_month.into(),
        }
    }
}

/// The minimal set of writes moving persisted assignments to a desired set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentDiff {
    /// Record keys to delete (programmer no longer in the desired set)
    pub deletes: Vec<String>,
    /// (record key, new end month) pairs to update in place
    pub updates: Vec<(String, String)>,
    /// (programmer id, end month) pairs to create as new records
    pub inserts: Vec<(String, String)>,
}

impl AssignmentDiff {
    /// Whether the diff contains no writes at all.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.updates.is_empty() && self.inserts.is_empty()
    }
}

/// Compute the minimal diff between a task's persisted assignment records
/// and its desired final set.
///
/// Rules:
/// - a persisted record whose programmer is absent from the desired set is
///   deleted;
/// - a persisted record whose programmer appears with a different end-month
///   is updated in place (record id preserved);
/// - a desired programmer with no persisted record becomes an insert.
///
/// A programmer appearing more than once in `desired` collapses to a single
/// entry (last one wins), and `Unassigned` entries are dropped, so the same
/// programmer can never end up with two records on one task.
pub fn diff_assignments(
    existing: &[AssignmentRecord],
    desired: &[DesiredAssignment],
) -> AssignmentDiff {
    // Collapse the desired set: last entry per programmer wins.
    let mut wanted: Vec<(String, String)> = Vec::new();
    for entry in desired {
        let Some(key) = entry.programmer.key() else {
            continue;
        };
        if let Some(slot) = wanted.iter_mut().find(|(k, _)| k == key) {
            slot.1 = entry.end_month.clone();
        } else {
            wanted.push((key.to_string(), entry.end_month.clone()));
        }
    }

    let mut diff = AssignmentDiff::default();

    for record in existing {
        let Some(record_key) = record.record_key() else {
            continue;
        };
        match wanted.iter().find(|(k, _)| *k == record.programmer_id) {
            None => diff.deletes.push(record_key),
            Some((_, end_month)) if *end_month != record.end_month => {
                diff.updates.push((record_key, end_month.clone()));
            }
            Some(_) => {}
        }
    }

    for (programmer_id, end_month) in &wanted {
        let already = existing.iter().any(|r| r.programmer_id == *programmer_id);
        if !already {
            diff.inserts.push((programmer_id.clone(), end_month.clone()));
        }
    }

    diff
}

/// Repository for assignment records
pub struct AssignmentRepository<'a> {
    client: &'a Surreal<Db>,
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\"', "\\\"")
}

impl<'a> AssignmentRepository<'a> {
    /// Create a new AssignmentRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// List every assignment record.
    pub async fn list(&self) -> DbResult<Vec<AssignmentRecord>> {
        let mut result = self.client.query("SELECT * FROM assignment").await?;
        let records: Vec<AssignmentRecord> = result.take(0)?;
        Ok(records)
    }

    /// List the assignment records belonging to one task.
    pub async fn list_for_task(&self, task_id: &str) -> DbResult<Vec<AssignmentRecord>> {
        let mut result = self
            .client
            .query("SELECT * FROM assignment WHERE task_id = $task_id")
            .bind(("task_id", task_id.to_string()))
            .await?;
        let records: Vec<AssignmentRecord> = result.take(0)?;
        Ok(records)
    }

    /// Create a single assignment record and return its record key.
    pub async fn create(&self, record: &AssignmentRecord) -> DbResult<String> {
        debug!(
            "Creating assignment: task {} -> programmer {} until {}",
            record.task_id, record.programmer_id, record.end_month
        );
        let query = format!(
            r#"CREATE assignment SET
                task_id = "{}",
                programmer_id = "{}",
                end_month = "{}""#,
            escape(&record.task_id),
            escape(&record.programmer_id),
            escape(&record.end_month)
        );
        let mut result = self.client.query(&query).await?;
        let created: Vec<AssignmentRecord> = result.take(0)?;
        created
            .first()
            .and_then(|r| r.record_key())
            .ok_or_else(|| DbError::ValidationError {
                message: "Assignment creation returned no record".to_string(),
            })
    }

    /// Delete a single assignment record by key.
    pub async fn delete(&self, record_key: &str) -> DbResult<()> {
        debug!("Deleting assignment: {}", record_key);
        let query = format!("DELETE assignment:{}", record_key);
        self.client.query(&query).await?;
        Ok(())
    }

    /// Reconcile a task's persisted assignments with a desired final set.
    ///
    /// Computes the minimal diff (see [`diff_assignments`]) and applies all
    /// of it inside one transaction: from the caller's perspective either
    /// every write lands or none does.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the transaction fails; no partial state
    /// is left behind.
    pub async fn reconcile(
        &self,
        task_id: &str,
        desired: &[DesiredAssignment],
        existing: &[AssignmentRecord],
    ) -> DbResult<()> {
        let diff = diff_assignments(existing, desired);
        if diff.is_empty() {
            debug!("Assignments already reconciled for task: {}", task_id);
            return Ok(());
        }

        debug!(
            "Reconciling assignments for task {}: {} delete(s), {} update(s), {} insert(s)",
            task_id,
            diff.deletes.len(),
            diff.updates.len(),
            diff.inserts.len()
        );
        trace!("Diff: {:?}", diff);

        let mut statements = vec!["BEGIN TRANSACTION".to_string()];
        for record_key in &diff.deletes {
            statements.push(format!("DELETE assignment:{}", record_key));
        }
        for (record_key, end_month) in &diff.updates {
            statements.push(format!(
                "UPDATE assignment:{} SET end_month = \"{}\"",
                record_key,
                escape(end_month)
            ));
        }
        for (programmer_id, end_month) in &diff.inserts {
            statements.push(format!(
                r#"CREATE assignment SET task_id = "{}", programmer_id = "{}", end_month = "{}""#,
                escape(task_id),
                escape(programmer_id),
                escape(end_month)
            ));
        }
        statements.push("COMMIT TRANSACTION".to_string());

        self.client.query(statements.join(";\n")).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use surrealdb::sql::Thing;

    fn saved_record(key: &str, task_id: &str, programmer_id: &str, end: &str) -> AssignmentRecord {
        AssignmentRecord {
            id: Some(Thing::from(("assignment", key))),
            task_id: task_id.to_string(),
            programmer_id: programmer_id.to_string(),
            end_month: end.to_string(),
        }
    }

    #[test]
    fn test_diff_update_delete_insert() {
        // Existing: P1 until 2024-01, P2 until 2024-02.
        // Desired:  P1 until 2024-03, P3 until 2024-02.
        let existing = vec![
            saved_record("a1", "t1", "p1", "2024-01"),
            saved_record("a2", "t1", "p2", "2024-02"),
        ];
        let desired = vec![
            DesiredAssignment::to_programmer("p1", "2024-03"),
            DesiredAssignment::to_programmer("p3", "2024-02"),
        ];

        let diff = diff_assignments(&existing, &desired);
        assert_eq!(diff.updates, vec![("a1".to_string(), "2024-03".to_string())]);
        assert_eq!(diff.deletes, vec!["a2".to_string()]);
        assert_eq!(
            diff.inserts,
            vec![("p3".to_string(), "2024-02".to_string())]
        );
    }

    #[test]
    fn test_diff_no_changes_is_empty() {
        let existing = vec![saved_record("a1", "t1", "p1", "2024-01")];
        let desired = vec![DesiredAssignment::to_programmer("p1", "2024-01")];
        assert!(diff_assignments(&existing, &desired).is_empty());
    }

    #[test]
    fn test_diff_duplicate_programmer_last_wins() {
        let existing = vec![saved_record("a1", "t1", "p1", "2024-01")];
        let desired = vec![
            DesiredAssignment::to_programmer("p1", "2024-02"),
            DesiredAssignment::to_programmer("p1", "2024-05"),
        ];

        let diff = diff_assignments(&existing, &desired);
        // One update to the final value, no duplicate insert.
        assert_eq!(diff.updates, vec![("a1".to_string(), "2024-05".to_string())]);
        assert!(diff.inserts.is_empty());
        assert!(diff.deletes.is_empty());
    }

    #[test]
    fn test_diff_unassigned_entries_are_dropped() {
        let existing: Vec<AssignmentRecord> = Vec::new();
        let desired = vec![
            DesiredAssignment {
                programmer: ProgrammerRef::Unassigned,
                end_month: "2024-04".to_string(),
            },
            DesiredAssignment::to_programmer("p1", "2024-04"),
        ];

        let diff = diff_assignments(&existing, &desired);
        assert_eq!(
            diff.inserts,
            vec![("p1".to_string(), "2024-04".to_string())]
        );
    }

    #[test]
    fn test_diff_empty_desired_deletes_everything() {
        let existing = vec![
            saved_record("a1", "t1", "p1", "2024-01"),
            saved_record("a2", "t1", "p2", "2024-02"),
        ];
        let diff = diff_assignments(&existing, &[]);
        assert_eq!(diff.deletes, vec!["a1".to_string(), "a2".to_string()]);
        assert!(diff.updates.is_empty());
        assert!(diff.inserts.is_empty());
    }

    #[tokio::test]
    async fn test_create_list_and_delete() {
        let db = test_utils::create_test_db().await.unwrap();
        let repo = AssignmentRepository::new(&db);

        let key = repo
            .create(&AssignmentRecord::new("t1", "p1", "2024-06"))
            .await
            .unwrap();

        let records = repo.list_for_task("t1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].programmer_id, "p1");
        assert_eq!(records[0].end_month, "2024-06");

        repo.delete(&key).await.unwrap();
        assert!(repo.list_for_task("t1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_for_task_filters_other_tasks() {
        let db = test_utils::create_test_db().await.unwrap();
        let repo = AssignmentRepository::new(&db);

        repo.create(&AssignmentRecord::new("t1", "p1", "2024-06"))
            .await
            .unwrap();
        repo.create(&AssignmentRecord::new("t2", "p1", "2024-07"))
            .await
            .unwrap();

        let records = repo.list_for_task("t1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].task_id, "t1");

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_reconcile_applies_full_diff() {
        let db = test_utils::create_test_db().await.unwrap();
        let repo = AssignmentRepository::new(&db);

        repo.create(&AssignmentRecord::new("t1", "p1", "2024-01"))
            .await
            .unwrap();
        repo.create(&AssignmentRecord::new("t1", "p2", "2024-02"))
            .await
            .unwrap();

        let existing = repo.list_for_task("t1").await.unwrap();
        let p1_key = existing
            .iter()
            .find(|r| r.programmer_id == "p1")
            .and_then(|r| r.record_key())
            .unwrap();

        let desired = vec![
            DesiredAssignment::to_programmer("p1", "2024-03"),
            DesiredAssignment::to_programmer("p3", "2024-02"),
        ];
        repo.reconcile("t1", &desired, &existing).await.unwrap();

        let after = repo.list_for_task("t1").await.unwrap();
        assert_eq!(after.len(), 2);

        let p1 = after.iter().find(|r| r.programmer_id == "p1").unwrap();
        assert_eq!(p1.end_month, "2024-03");
        // Record identity preserved through the in-place update
        assert_eq!(p1.record_key().unwrap(), p1_key);

        assert!(after.iter().all(|r| r.programmer_id != "p2"));

        let p3 = after.iter().find(|r| r.programmer_id == "p3").unwrap();
        assert_eq!(p3.end_month, "2024-02");
    }

    #[tokio::test]
    async fn test_reconcile_noop_when_already_in_sync() {
        let db = test_utils::create_test_db().await.unwrap();
        let repo = AssignmentRepository::new(&db);

        repo.create(&AssignmentRecord::new("t1", "p1", "2024-01"))
            .await
            .unwrap();
        let existing = repo.list_for_task("t1").await.unwrap();
        let key_before = existing[0].record_key().unwrap();

        let desired = vec![DesiredAssignment::to_programmer("p1", "2024-01")];
        repo.reconcile("t1", &desired, &existing).await.unwrap();

        let after = repo.list_for_task("t1").await.unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].record_key().unwrap(), key_before);
    }
}
