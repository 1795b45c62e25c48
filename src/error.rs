use thiserror::Error;

/// Failures surfaced by the clipboard-history core.
///
/// Only `StorageUnavailable` is fatal: without a database there is no
/// history to track, so startup must fail loudly. Everything else is a
/// per-operation failure that the runtime logs and skips; the next poll
/// cycle is the retry.
#[derive(Debug, Error)]
pub enum Error {
    /// The durable store could not be opened, created or migrated.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A single insert/update/delete/clear failed. The in-memory view must
    /// not be touched for the failed operation.
    #[error("storage write failed: {0}")]
    StorageWrite(#[from] diesel::result::Error),

    /// The OS clipboard could not be read this cycle.
    #[error("clipboard read failed: {0}")]
    ClipboardRead(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_write_wraps_diesel_error() {
        let err: Error = diesel::result::Error::NotFound.into();
        assert!(matches!(err, Error::StorageWrite(_)));
        assert!(err.to_string().contains("storage write failed"));
    }

    #[test]
    fn display_carries_context() {
        let err = Error::StorageUnavailable("cannot open /tmp/x.db".into());
        assert!(err.to_string().contains("/tmp/x.db"));
    }
}
