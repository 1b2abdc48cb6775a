//! SQLite-backed video store.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tracing::info;

use crate::error::StoreError;
use crate::state::VideoEntry;

use super::VideoStore;

/// Current database schema version
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Migration descriptions
const MIGRATION_DESCRIPTIONS: &[&str] = &["Initial contest_videos schema"];

const CREATE_MIGRATIONS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL,
    description TEXT NOT NULL
)
"#;

const CREATE_CONTEST_VIDEOS_TABLE_SQL: &str = r#"
CREATE TABLE contest_videos (
    seq INTEGER PRIMARY KEY AUTOINCREMENT, -- registration order
    video_id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    creator TEXT NOT NULL,
    archive_reference TEXT NOT NULL,
    votes INTEGER NOT NULL,
    gross_lamports INTEGER NOT NULL,
    voter_ledger TEXT NOT NULL, -- JSON object, wallet -> votes
    registered_at TEXT NOT NULL
)
"#;

const CREATE_DB_INDEXES: &[&str] =
    &["CREATE INDEX idx_contest_videos_votes ON contest_videos(votes)"];

/// Durable store keyed by `video_id`, registration order tracked by the
/// autoincrement `seq` column.
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and run migrations.
    pub fn open(db_path: &str) -> Result<Self, StoreError> {
        info!("Initializing contest database at {:?}", db_path);
        let connection = Connection::open(db_path)?;
        connection.execute("PRAGMA foreign_keys = ON", [])?;
        run_migrations(&connection)?;
        Ok(Self { connection })
    }

    /// Private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let connection = Connection::open_in_memory()?;
        run_migrations(&connection)?;
        Ok(Self { connection })
    }

    fn from_row(row: &Row) -> rusqlite::Result<VideoEntry> {
        let voter_ledger_json: String = row.get("voter_ledger")?;
        let voter_ledger = serde_json::from_str(&voter_ledger_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let registered_at: String = row.get("registered_at")?;
        let registered_at = DateTime::parse_from_rfc3339(&registered_at)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    8,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?
            .with_timezone(&Utc);

        Ok(VideoEntry {
            video_id: row.get("video_id")?,
            title: row.get("title")?,
            creator: row.get("creator")?,
            archive_reference: row.get("archive_reference")?,
            votes: row.get("votes")?,
            gross_lamports: row.get("gross_lamports")?,
            voter_ledger,
            registered_at,
        })
    }
}

impl VideoStore for SqliteStore {
    fn get(&self, video_id: &str) -> Result<Option<VideoEntry>, StoreError> {
        let mut stmt = self
            .connection
            .prepare("SELECT * FROM contest_videos WHERE video_id = ?")?;
        let mut rows = stmt.query_map(params![video_id], Self::from_row)?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    fn put(&mut self, entry: VideoEntry) -> Result<(), StoreError> {
        // Upsert instead of INSERT OR REPLACE: a replace would reassign
        // `seq` and lose the registration order.
        self.connection.execute(
            "INSERT INTO contest_videos \
             (video_id, title, creator, archive_reference, votes, gross_lamports, voter_ledger, registered_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(video_id) DO UPDATE SET \
             votes = excluded.votes, \
             gross_lamports = excluded.gross_lamports, \
             voter_ledger = excluded.voter_ledger",
            params![
                entry.video_id,
                entry.title,
                entry.creator,
                entry.archive_reference,
                entry.votes,
                entry.gross_lamports,
                serde_json::to_string(&entry.voter_ledger)?,
                entry.registered_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn for_each_ordered(&self, f: &mut dyn FnMut(&VideoEntry)) -> Result<(), StoreError> {
        let mut stmt = self
            .connection
            .prepare("SELECT * FROM contest_videos ORDER BY seq")?;
        let rows = stmt.query_map([], Self::from_row)?;
        for row in rows {
            f(&row?);
        }
        Ok(())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .connection
            .query_row("SELECT COUNT(*) FROM contest_videos", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.connection.execute("DELETE FROM contest_videos", [])?;
        self.connection.execute(
            "DELETE FROM sqlite_sequence WHERE name = 'contest_videos'",
            [],
        )?;
        Ok(())
    }
}

/// Run all pending database migrations
fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(CREATE_MIGRATIONS_TABLE_SQL, [])?;

    let current_version: i32 = conn
        .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get::<_, Option<i32>>(0)
        })?
        .unwrap_or(0);
    info!("Current contest database version: {}", current_version);

    if current_version < CURRENT_SCHEMA_VERSION {
        apply_migration_v1(conn)?;
    }

    Ok(())
}

/// Apply migration version 1: initial tables and indexes.
fn apply_migration_v1(conn: &Connection) -> Result<(), StoreError> {
    info!("Applying migration v1: {}", MIGRATION_DESCRIPTIONS[0]);

    conn.execute_batch("BEGIN")?;
    let result = (|| -> Result<(), StoreError> {
        conn.execute(CREATE_CONTEST_VIDEOS_TABLE_SQL, [])?;
        for index_sql in CREATE_DB_INDEXES {
            conn.execute(index_sql, [])?;
        }
        conn.execute(
            "INSERT INTO schema_migrations (version, applied_at, description) VALUES (?, ?, ?)",
            params![1, Utc::now().to_rfc3339(), MIGRATION_DESCRIPTIONS[0]],
        )?;
        Ok(())
    })();

    match result {
        Ok(()) => conn.execute_batch("COMMIT")?,
        Err(e) => {
            conn.execute_batch("ROLLBACK")?;
            return Err(e);
        }
    }

    Ok(())
}
