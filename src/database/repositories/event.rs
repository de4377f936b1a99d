//! Event history repository implementation
//!
//! Append-only log of created events in the `events` table. An event row
//! is inserted at creation and sealed at archival; archival matches the
//! row by its `(type, created_at)` natural key.

use std::time::Duration;
use std::future::Future;
use sqlx::{Pool, Sqlite};
use tracing::warn;
use crate::utils::errors::{RaidBuddyError, Result};

/// Upper bound on any single history write; persistence is best-effort
/// and must never stall the interactive path.
const STATEMENT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct EventRepository {
    pool: Pool<Sqlite>,
}

impl EventRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Record a freshly created event. Returns the new row id.
    pub async fn record_created(
        &self,
        event_type: &str,
        created_by: i64,
        created_at_ms: i64,
    ) -> Result<i64> {
        let result = bounded(
            sqlx::query(
                "INSERT INTO events (type, created_by, created_at, archived_at, data) VALUES (?, ?, ?, NULL, '{}')"
            )
            .bind(event_type)
            .bind(created_by.to_string())
            .bind(created_at_ms)
            .execute(&self.pool),
        )
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Seal an event row: stamp the archival time and freeze the final
    /// registrations snapshot.
    pub async fn record_archived(
        &self,
        event_type: &str,
        created_at_ms: i64,
        archived_at_ms: i64,
        data: &str,
    ) -> Result<()> {
        // The (type, created_at) pair is the natural key of an event run
        let result = bounded(
            sqlx::query(
                "UPDATE events SET archived_at = ?, data = ? WHERE created_at = ? AND type = ?"
            )
            .bind(archived_at_ms)
            .bind(data)
            .bind(created_at_ms)
            .bind(event_type)
            .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            warn!(
                event_type = event_type,
                created_at_ms = created_at_ms,
                "Archive update matched no event record"
            );
        }

        Ok(())
    }
}

/// Bound a persistence future by the statement timeout
async fn bounded<F, T>(fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(STATEMENT_TIMEOUT, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(RaidBuddyError::PersistenceUnavailable(
            "statement timed out".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::Row;

    async fn repository() -> EventRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::database::connection::run_migrations(&pool).await.unwrap();
        EventRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_then_archive_roundtrip() {
        let repo = repository().await;

        let id = repo.record_created("zvz", 42, 1_000).await.unwrap();
        assert!(id > 0);

        repo.record_archived("zvz", 1_000, 5_000, r#"{"Tank":[]}"#)
            .await
            .unwrap();

        let row = sqlx::query("SELECT type, created_by, created_at, archived_at, data FROM events WHERE id = ?")
            .bind(id)
            .fetch_one(&repo.pool)
            .await
            .unwrap();

        assert_eq!(row.get::<String, _>("type"), "zvz");
        assert_eq!(row.get::<String, _>("created_by"), "42");
        assert_eq!(row.get::<i64, _>("created_at"), 1_000);
        assert_eq!(row.get::<i64, _>("archived_at"), 5_000);
        assert_eq!(row.get::<String, _>("data"), r#"{"Tank":[]}"#);
    }

    #[tokio::test]
    async fn test_archived_at_null_until_archived() {
        let repo = repository().await;
        let id = repo.record_created("arena", 7, 2_000).await.unwrap();

        let row = sqlx::query("SELECT archived_at, data FROM events WHERE id = ?")
            .bind(id)
            .fetch_one(&repo.pool)
            .await
            .unwrap();

        assert_eq!(row.get::<Option<i64>, _>("archived_at"), None);
        assert_eq!(row.get::<String, _>("data"), "{}");
    }

    #[tokio::test]
    async fn test_archive_matches_by_natural_key() {
        let repo = repository().await;
        repo.record_created("zvz", 1, 1_000).await.unwrap();
        repo.record_created("zvz", 1, 2_000).await.unwrap();

        repo.record_archived("zvz", 2_000, 9_000, "{}").await.unwrap();

        let rows = sqlx::query("SELECT created_at, archived_at FROM events ORDER BY created_at")
            .fetch_all(&repo.pool)
            .await
            .unwrap();
        assert_eq!(rows[0].get::<Option<i64>, _>("archived_at"), None);
        assert_eq!(rows[1].get::<Option<i64>, _>("archived_at"), Some(9_000));
    }

    #[tokio::test]
    async fn test_archive_of_unknown_record_is_not_an_error() {
        let repo = repository().await;
        // Logged, but best-effort: no failure surfaced
        repo.record_archived("ganking", 123, 456, "{}").await.unwrap();
    }
}
