use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One recorded clipboard snapshot.
///
/// `id` is assigned by the store and stays stable for the lifetime of the
/// row. `content` is the dedup identity at insertion time but may be edited
/// by the user afterwards. `timestamp` is set once at insertion and never
/// changes, including across edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub id: i32,
    pub content: String,
    pub timestamp: NaiveDateTime,
}

impl ClipboardEntry {
    /// Short creation time for list cells, e.g. `Aug 07, 14:03:21`.
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%b %d, %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formatted_time_is_short_and_stable() {
        let entry = ClipboardEntry {
            id: 1,
            content: "hello".into(),
            timestamp: NaiveDate::from_ymd_opt(2026, 8, 7)
                .unwrap()
                .and_hms_opt(14, 3, 21)
                .unwrap(),
        };
        assert_eq!(entry.formatted_time(), "Aug 07, 14:03:21");
    }
}
