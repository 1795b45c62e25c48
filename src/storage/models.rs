use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;

use crate::entry::ClipboardEntry;

/// Timestamp wire format, `2026-08-07T14:03:21.123456`. Matches what earlier
/// releases wrote, so existing rows parse unchanged; `%.f` accepts both
/// fractional and whole-second values.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::storage::schema::clipboard)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClipboardRow {
    pub id: i32,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::storage::schema::clipboard)]
pub struct NewClipboardRow<'a> {
    pub content: &'a str,
    pub timestamp: String,
}

pub(crate) fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Rows backfilled by a schema migration, or written by hand, may not parse.
/// Substitute "now" rather than dropping the row.
pub(crate) fn parse_timestamp(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).unwrap_or_else(|_| {
        warn!("unparseable timestamp {:?} in clipboard table, substituting now", raw);
        chrono::Local::now().naive_local()
    })
}

impl From<ClipboardRow> for ClipboardEntry {
    fn from(row: ClipboardRow) -> Self {
        ClipboardEntry {
            id: row.id,
            content: row.content,
            timestamp: parse_timestamp(&row.timestamp),
        }
    }
}
