//! SQLite storage for the comment corpus and its sentiment scores.
//!
//! `posts` is owned by the ingestion side and read here only; `scores` is
//! written exclusively through the idempotent upsert below. There is no job
//! queue: pending work is defined entirely by the anti-join between the two
//! tables, which is what makes interrupted runs resumable.

use crate::classify::Sentiment;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// One row awaiting classification for the target model.
#[derive(Debug, Clone)]
pub struct PendingPost {
    pub post_id: String,
    pub text: String,
}

/// One staged classification result; the model identity is supplied at upsert.
#[derive(Debug, Clone)]
pub struct ScoreEntry {
    pub post_id: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("open database at {}", path.as_ref().display()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS posts (
                post_id    TEXT PRIMARY KEY,
                text       TEXT,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS scores (
                post_id         TEXT NOT NULL,
                model_name      TEXT NOT NULL,
                sentiment_label TEXT NOT NULL CHECK (sentiment_label IN ('pos', 'neu', 'neg')),
                sentiment_score REAL NOT NULL,
                PRIMARY KEY (post_id, model_name)
            );
            ",
        )?;
        Ok(())
    }

    /// Producer-side insert matching the ingestion contract: duplicate
    /// `post_id`s are ignored, existing rows are never mutated. Returns the
    /// number of rows actually inserted.
    pub fn insert_posts<'a, I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>, &'a str)>,
    {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR IGNORE INTO posts (post_id, text, created_at) VALUES (?1, ?2, ?3)",
            )?;
            for (post_id, text, created_at) in rows {
                inserted += stmt.execute(params![post_id, text, created_at])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Count posts with non-empty text and no score under `model`. Snapshot
    /// for progress reporting; the driver's control flow never depends on it.
    pub fn count_pending(&self, model: &str) -> Result<u64> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*)
             FROM posts p
             LEFT JOIN scores s ON s.post_id = p.post_id AND s.model_name = ?1
             WHERE s.post_id IS NULL AND p.text IS NOT NULL AND length(p.text) > 0",
            params![model],
            |row| row.get(0),
        )?;
        Ok(n as u64)
    }

    /// Fetch one page of pending posts, oldest first (`post_id` breaks ties so
    /// the scan order is fully deterministic). Each call re-evaluates the
    /// anti-join, so rows scored by a prior page fall out on their own; an
    /// empty result means no work remains.
    pub fn select_pending(&self, model: &str, limit: usize) -> Result<Vec<PendingPost>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT p.post_id, p.text
             FROM posts p
             LEFT JOIN scores s ON s.post_id = p.post_id AND s.model_name = ?1
             WHERE s.post_id IS NULL AND p.text IS NOT NULL AND length(p.text) > 0
             ORDER BY p.created_at ASC, p.post_id ASC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![model, limit as i64], |row| {
            Ok(PendingPost { post_id: row.get(0)?, text: row.get(1)? })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Idempotent upsert keyed by `(post_id, model_name)`: replaying a batch
    /// replaces rows, never duplicates them.
    pub fn upsert_scores(&self, model: &str, entries: &[ScoreEntry]) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR REPLACE INTO scores (post_id, model_name, sentiment_label, sentiment_score)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for e in entries {
            stmt.execute(params![e.post_id, model, e.sentiment.as_str(), e.confidence])?;
        }
        Ok(())
    }

    /// Read back one score row. Used by reporting consumers and tests; the
    /// scoring pipeline itself only ever touches `scores` via the anti-join
    /// and the upsert.
    pub fn score_for(&self, post_id: &str, model: &str) -> Result<Option<(String, f64)>> {
        let row = self
            .conn
            .query_row(
                "SELECT sentiment_label, sentiment_score
                 FROM scores WHERE post_id = ?1 AND model_name = ?2",
                params![post_id, model],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(row)
    }

    /// Open the write transaction the driver stages upserts into. Staged rows
    /// are visible to `select_pending` on this connection before they commit,
    /// which is what lets the pager advance past them.
    pub fn begin(&self) -> Result<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    /// Durability checkpoint: flush staged upserts and reopen the transaction.
    pub fn checkpoint(&self) -> Result<()> {
        self.conn.execute_batch("COMMIT; BEGIN")?;
        Ok(())
    }

    /// Final flush at the end of a run.
    pub fn commit(&self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    /// Discard staged-but-uncommitted upserts after a failed cycle. Committed
    /// pages stand; everything else is rediscovered as pending on the next run.
    pub fn rollback(&self) -> Result<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    /// Row counts per user table, for a quick pre-run inspection log.
    pub fn table_counts(&self) -> Result<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM \"{name}\""), [], |row| row.get(0))?;
            out.push((name, n as u64));
        }
        Ok(out)
    }
}
