//! Read-only database access and lyrics count queries
//!
//! The monitor only ever reads aggregate counts from the `songs` table; all
//! connections are opened read-only so a misbehaving tool cannot touch the
//! catalog the fetch process is writing.

use crate::progress::ProgressSnapshot;
use crate::{Error, Result};
use chrono::{Duration, Local};
use sqlx::SqlitePool;
use std::path::Path;

/// Connect to the catalog database in read-only mode
///
/// Refuses to create a database: a missing file is an operator error and is
/// reported with the path rather than silently opened as an empty store.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "Database not found: {} (run the catalog ingester first)",
            db_path.display()
        )));
    }

    // mode=ro: read-only mode. The fetch process writes this file while we
    // poll it, so immutable=1 must NOT be set: it would let SQLite cache
    // pages and report stale counts.
    let db_url = format!("sqlite://{}?mode=ro", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    // Verify read-only by attempting a write (should fail)
    #[cfg(debug_assertions)]
    {
        let write_test = sqlx::query("CREATE TABLE _test_write (id INTEGER)")
            .execute(&pool)
            .await;
        if write_test.is_ok() {
            panic!("SAFETY VIOLATION: Database connection is not read-only!");
        }
    }

    Ok(pool)
}

/// Aggregate lyrics counts from one point-in-time read of the `songs` table
#[derive(Debug, Clone, Copy)]
pub struct LyricsCounts {
    /// Total rows in the catalog
    pub total: i64,
    /// Rows with a non-null lyrics payload
    pub with_lyrics: i64,
    /// Rows whose lyrics landed within the last hour
    pub recent: i64,
}

/// Query the three aggregate counts
///
/// The queries are independent reads; `lyrics` only ever transitions
/// null -> non-null, so the counts are monotone across calls and safe to
/// read without coordination with the fetch process.
pub async fn fetch_lyrics_counts(pool: &SqlitePool) -> Result<LyricsCounts> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;

    let with_lyrics: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM songs WHERE lyrics IS NOT NULL")
            .fetch_one(pool)
            .await?;

    // The fetcher stamps lyrics_fetched_at with a local-time
    // "YYYY-MM-DD HH:MM:SS" string; compare against the same format.
    let cutoff = (Local::now() - Duration::hours(1))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let recent: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM songs WHERE lyrics IS NOT NULL AND lyrics_fetched_at > ?",
    )
    .bind(cutoff)
    .fetch_one(pool)
    .await?;

    Ok(LyricsCounts {
        total,
        with_lyrics,
        recent,
    })
}

/// One snapshot: counts folded into progress arithmetic
pub async fn snapshot(pool: &SqlitePool) -> Result<ProgressSnapshot> {
    Ok(ProgressSnapshot::from_counts(
        fetch_lyrics_counts(pool).await?,
    ))
}
