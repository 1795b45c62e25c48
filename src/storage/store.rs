use std::path::Path;

use chrono::NaiveDateTime;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use diesel::sqlite::SqliteConnection;
use log::info;

use crate::entry::ClipboardEntry;
use crate::error::{Error, Result};

use super::dao;
use super::models::{format_timestamp, NewClipboardRow};

/// Value of `PRAGMA user_version` once the schema is fully migrated.
const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS clipboard (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    timestamp TEXT NOT NULL
)";

/// Durable clipboard history.
///
/// The `Store` owns the only open connection and every mutating operation
/// takes `&mut self`, so writes are serialized by construction: whichever
/// thread owns the value is the writer context.
pub struct Store {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

#[derive(QueryableByName)]
struct UserVersionRow {
    #[diesel(sql_type = Integer)]
    user_version: i32,
}

#[derive(QueryableByName)]
struct TableColumnRow {
    #[diesel(sql_type = Text)]
    name: String,
}

impl Store {
    /// Open or create the history database at `path` and bring the schema up
    /// to date. Any failure here is fatal: without a store there is no
    /// history to track.
    pub fn open(path: &Path) -> Result<Self> {
        let database_url = path.to_string_lossy();
        let mut conn = SqliteConnection::establish(&database_url).map_err(|e| {
            Error::StorageUnavailable(format!("cannot open {}: {}", path.display(), e))
        })?;

        migrate(&mut conn).map_err(|e| {
            Error::StorageUnavailable(format!("cannot migrate {}: {}", path.display(), e))
        })?;

        Ok(Self { conn })
    }

    /// Up to `limit` entries, newest first.
    pub fn load_recent(&mut self, limit: usize) -> Result<Vec<ClipboardEntry>> {
        let rows = dao::load_recent(&mut self.conn, limit as i64)?;
        Ok(rows.into_iter().map(ClipboardEntry::from).collect())
    }

    /// Append a row and return the fully populated entry, id assigned.
    pub fn insert(&mut self, content: &str, timestamp: NaiveDateTime) -> Result<ClipboardEntry> {
        let row = dao::insert_entry(
            &mut self.conn,
            &NewClipboardRow {
                content,
                timestamp: format_timestamp(timestamp),
            },
        )?;
        Ok(ClipboardEntry {
            id: row.id,
            content: row.content,
            timestamp,
        })
    }

    /// Rewrite content for an existing id. A vanished id is a no-op, not an
    /// error.
    pub fn update(&mut self, id: i32, new_content: &str) -> Result<()> {
        dao::update_content(&mut self.conn, id, new_content)?;
        Ok(())
    }

    pub fn delete(&mut self, id: i32) -> Result<()> {
        dao::delete_entry(&mut self.conn, id)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        dao::clear_entries(&mut self.conn)?;
        Ok(())
    }
}

/// One-time schema check at open, keyed on `PRAGMA user_version`.
///
/// Version 0 covers both a fresh database and one created by releases that
/// predate the timestamp column; the column inspection tells the two apart.
/// Backfilled rows get "now", the best creation time still available.
fn migrate(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(CREATE_TABLE_SQL)?;

    let version = diesel::sql_query("PRAGMA user_version")
        .get_result::<UserVersionRow>(conn)?
        .user_version;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    let columns: Vec<TableColumnRow> =
        diesel::sql_query("PRAGMA table_info(clipboard)").load(conn)?;
    if !columns.iter().any(|column| column.name == "timestamp") {
        info!("migrating clipboard table: adding timestamp column");
        conn.batch_execute("ALTER TABLE clipboard ADD COLUMN timestamp TEXT")?;
        let now = format_timestamp(chrono::Local::now().naive_local());
        diesel::sql_query("UPDATE clipboard SET timestamp = ? WHERE timestamp IS NULL")
            .bind::<Text, _>(now)
            .execute(conn)?;
    }

    conn.batch_execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
    Ok(())
}
