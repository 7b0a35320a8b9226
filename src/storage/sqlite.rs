//! SQLite-backed review store.
//!
//! Owns a single long-lived connection behind `Arc<Mutex<_>>`. Synchronous
//! rusqlite calls run under `tokio::task::spawn_blocking` so they never block
//! the async runtime; each operation acquires the lock for exactly one
//! logical transaction and releases it when the guard drops.

use chrono::Utc;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{Connection, ToSql, params};
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::info;

use crate::sentiment::Sentiment;

/// Review classified and stamped, ready to be persisted.
#[derive(Debug, Clone)]
pub struct ReviewToSave {
    pub text: String,
    pub sentiment: Sentiment,
    pub created_at: String,
}

impl ReviewToSave {
    /// Stamp the creation timestamp: UTC ISO-8601, microsecond precision,
    /// no timezone suffix. Never user-supplied.
    pub fn new(text: String, sentiment: Sentiment) -> Self {
        Self {
            text,
            sentiment,
            created_at: Utc::now()
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
        }
    }
}

/// Persisted review with its store-assigned identifier.
#[derive(Debug, Clone, Serialize)]
pub struct SavedReview {
    pub id: i64,
    pub text: String,
    pub sentiment: Sentiment,
    pub created_at: String,
}

/// Store error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("blocking task failed: {0}")]
    TaskJoin(String),
}

impl ToSql for Sentiment {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Sentiment {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<Sentiment>()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// SQLite review store.
pub struct ReviewStore {
    /// Database connection. Exposed as `pub(crate)` for test access to
    /// simulate storage faults.
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl ReviewStore {
    /// Open (or create) the store at the given path and ensure the schema
    /// exists. Schema creation is idempotent and never touches existing data.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self::from_connection(Connection::open(path)?)?;
        info!(path = %path.display(), "Review store opened");
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        // WAL keeps readers unblocked during writes. SQLite reports "memory"
        // for in-memory databases, which is fine for tests.
        let _journal_mode: String =
            conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                sentiment TEXT NOT NULL,
                created_at TEXT NOT NULL
            );",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Persist a review and return it with its assigned identifier.
    ///
    /// Runs as one explicit transaction. A fault rolls the write back in
    /// full (no partial row) and propagates to the caller.
    pub async fn save(&self, review: ReviewToSave) -> Result<SavedReview, StoreError> {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().unwrap();
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO reviews (text, sentiment, created_at) VALUES (?1, ?2, ?3)",
                params![review.text, review.sentiment, review.created_at],
            )?;
            let id = tx.last_insert_rowid();

            tx.commit()?;

            Ok(SavedReview {
                id,
                text: review.text,
                sentiment: review.sentiment,
                created_at: review.created_at,
            })
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }

    /// List saved reviews, optionally restricted to one sentiment.
    ///
    /// No ORDER BY: a scan of this append-only table returns ascending
    /// rowid, i.e. insertion order.
    pub async fn list(&self, sentiment: Option<Sentiment>) -> Result<Vec<SavedReview>, StoreError> {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();

            let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<SavedReview> {
                Ok(SavedReview {
                    id: row.get(0)?,
                    text: row.get(1)?,
                    sentiment: row.get(2)?,
                    created_at: row.get(3)?,
                })
            };

            let reviews = match sentiment {
                Some(sentiment) => {
                    let mut stmt = conn.prepare(
                        "SELECT id, text, sentiment, created_at FROM reviews
                         WHERE sentiment = ?1",
                    )?;
                    let rows = stmt.query_map(params![sentiment], map_row)?;
                    rows.collect::<rusqlite::Result<Vec<_>>>()?
                }
                None => {
                    let mut stmt =
                        conn.prepare("SELECT id, text, sentiment, created_at FROM reviews")?;
                    let rows = stmt.query_map([], map_row)?;
                    rows.collect::<rusqlite::Result<Vec<_>>>()?
                }
            };

            Ok(reviews)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }

    /// Total number of stored reviews.
    pub async fn count(&self) -> Result<u64, StoreError> {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            let count: u64 = conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }
}
