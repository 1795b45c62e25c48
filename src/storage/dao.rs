//! Connection-level operations on the `clipboard` table. Callers own the
//! connection and the error mapping; everything here is a plain query.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::models::{ClipboardRow, NewClipboardRow};
use super::schema::clipboard;

pub fn insert_entry(
    conn: &mut SqliteConnection,
    row: &NewClipboardRow<'_>,
) -> QueryResult<ClipboardRow> {
    diesel::insert_into(clipboard::table)
        .values(row)
        .returning(ClipboardRow::as_returning())
        .get_result(conn)
}

/// Newest first, up to `limit` rows. An empty table yields an empty vec.
pub fn load_recent(conn: &mut SqliteConnection, limit: i64) -> QueryResult<Vec<ClipboardRow>> {
    clipboard::table
        .order(clipboard::id.desc())
        .limit(limit)
        .select(ClipboardRow::as_select())
        .load(conn)
}

/// Returns the number of affected rows; 0 when the id no longer exists.
pub fn update_content(
    conn: &mut SqliteConnection,
    id: i32,
    new_content: &str,
) -> QueryResult<usize> {
    diesel::update(clipboard::table.find(id))
        .set(clipboard::content.eq(new_content))
        .execute(conn)
}

pub fn delete_entry(conn: &mut SqliteConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(clipboard::table.find(id)).execute(conn)
}

pub fn clear_entries(conn: &mut SqliteConnection) -> QueryResult<usize> {
    diesel::delete(clipboard::table).execute(conn)
}
