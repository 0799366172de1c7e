//! Programmer repository
//!
//! Programmers are the grouping key for planner lanes and the target of
//! move gestures. They are managed externally; the planner only needs to
//! list them and resolve names to record keys.

use crate::error::{DbError, DbResult};
use crate::models::Programmer;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::debug;

/// Repository for programmer records
pub struct ProgrammerRepository<'a> {
    client: &'a Surreal<Db>,
}

impl<'a> ProgrammerRepository<'a> {
    /// Create a new ProgrammerRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// List all programmers, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Programmer>> {
        let mut result = self
            .client
            .query("SELECT * FROM programmer ORDER BY name ASC")
            .await?;
        let programmers: Vec<Programmer> = result.take(0)?;
        Ok(programmers)
    }

    /// Create a new programmer and return its record key.
    pub async fn create(&self, programmer: &Programmer) -> DbResult<String> {
        debug!("Creating programmer: {}", programmer.name);
        let mut result = self
            .client
            .query("CREATE programmer SET name = $name, color = $color")
            .bind(("name", programmer.name.clone()))
            .bind(("color", programmer.color.clone()))
            .await?;
        let created: Vec<Programmer> = result.take(0)?;
        created
            .first()
            .and_then(|p| p.record_key())
            .ok_or_else(|| DbError::ValidationError {
                message: "Programmer creation returned no record".to_string(),
            })
    }

    /// Find a programmer by display name.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Programmer>> {
        let mut result = self
            .client
            .query("SELECT * FROM programmer WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let programmers: Vec<Programmer> = result.take(0)?;
        Ok(programmers.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[tokio::test]
    async fn test_create_and_list_ordered_by_name() {
        let db = test_utils::create_test_db().await.unwrap();
        let repo = ProgrammerRepository::new(&db);

        repo.create(&Programmer::new("Marta", "#ef4444")).await.unwrap();
        repo.create(&Programmer::new("Ada", "#22c55e")).await.unwrap();

        let programmers = repo.list().await.unwrap();
        assert_eq!(programmers.len(), 2);
        assert_eq!(programmers[0].name, "Ada");
        assert_eq!(programmers[1].name, "Marta");
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let db = test_utils::create_test_db().await.unwrap();
        let repo = ProgrammerRepository::new(&db);

        let key = repo.create(&Programmer::new("Ada", "#22c55e")).await.unwrap();

        let found = repo.find_by_name("Ada").await.unwrap().unwrap();
        assert_eq!(found.name, "Ada");
        assert_eq!(found.record_key().unwrap(), key);

        assert!(repo.find_by_name("Nobody").await.unwrap().is_none());
    }
}
