//! Integration tests for read-only database access and count queries
//!
//! Builds a throwaway catalog database with a writable connection, closes
//! it, then exercises the read-only path the monitor uses.

use chrono::{Duration, Local};
use lyrdb_common::db::{connect_readonly, fetch_lyrics_counts, snapshot};
use sqlx::SqlitePool;
use std::path::Path;

async fn create_catalog(db_path: &Path, rows: &[(Option<&str>, Option<String>)]) {
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePool::connect(&db_url)
        .await
        .expect("Should create test database");

    sqlx::query(
        "CREATE TABLE songs (
            id INTEGER PRIMARY KEY,
            title TEXT,
            artist TEXT,
            url TEXT,
            views INTEGER,
            lyrics TEXT,
            lyrics_fetched_at TEXT
        )",
    )
    .execute(&pool)
    .await
    .expect("Should create songs table");

    for (i, (lyrics, fetched_at)) in rows.iter().enumerate() {
        sqlx::query(
            "INSERT INTO songs (title, artist, lyrics, lyrics_fetched_at) VALUES (?, ?, ?, ?)",
        )
        .bind(format!("Song {}", i))
        .bind("Artist")
        .bind(*lyrics)
        .bind(fetched_at.as_deref())
        .execute(&pool)
        .await
        .expect("Should insert row");
    }

    pool.close().await;
}

fn local_timestamp(ago: Duration) -> String {
    (Local::now() - ago).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[tokio::test]
async fn test_connect_readonly_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("missing.db");

    let result = connect_readonly(&db_path).await;
    let err = result.err().expect("Missing database should be an error");
    assert!(
        err.to_string().contains("missing.db"),
        "Error should name the path: {}",
        err
    );
}

#[tokio::test]
async fn test_readonly_connection_refuses_writes() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");
    create_catalog(&db_path, &[(None, None)]).await;

    let pool = connect_readonly(&db_path)
        .await
        .expect("Should connect in read-only mode");

    let result = sqlx::query("UPDATE songs SET lyrics = 'oops'")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "Write should fail on a read-only connection");
}

#[tokio::test]
async fn test_counts_total_and_with_lyrics() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");
    create_catalog(
        &db_path,
        &[
            (Some("some lyrics"), Some(local_timestamp(Duration::minutes(5)))),
            (Some("more lyrics"), Some(local_timestamp(Duration::hours(3)))),
            (None, None),
        ],
    )
    .await;

    let pool = connect_readonly(&db_path).await.unwrap();
    let counts = fetch_lyrics_counts(&pool).await.unwrap();

    assert_eq!(counts.total, 3);
    assert_eq!(counts.with_lyrics, 2);
    // Only the 5-minutes-ago row falls inside the one-hour window
    assert_eq!(counts.recent, 1);
}

#[tokio::test]
async fn test_counts_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");
    create_catalog(&db_path, &[]).await;

    let pool = connect_readonly(&db_path).await.unwrap();
    let snap = snapshot(&pool).await.unwrap();

    assert!(snap.is_empty());
    assert_eq!(snap.percentage(), 0.0);
    assert_eq!(snap.eta_minutes(1.5), None);
}

#[tokio::test]
async fn test_snapshot_folds_counts() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");

    let mut rows: Vec<(Option<&str>, Option<String>)> = Vec::new();
    for _ in 0..4 {
        rows.push((Some("lyrics"), Some(local_timestamp(Duration::hours(2)))));
    }
    for _ in 0..6 {
        rows.push((None, None));
    }
    create_catalog(&db_path, &rows).await;

    let pool = connect_readonly(&db_path).await.unwrap();
    let snap = snapshot(&pool).await.unwrap();

    assert_eq!(snap.total, 10);
    assert_eq!(snap.completed, 4);
    assert_eq!(snap.remaining(), 6);
    assert_eq!(snap.percentage(), 40.0);
}
