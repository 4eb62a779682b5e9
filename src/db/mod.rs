use std::path::PathBuf;
use std::time::Duration;

use rusqlite::Connection;

use crate::error::Result;

mod contacts;
mod filter;
mod schema;
mod segments;

pub use filter::{FilterMap, FilterValue};
pub use segments::Segments;

/// Handle to the contact store.
///
/// Holds only the database path: every operation opens a fresh scoped
/// connection, ensures the schema, and drops the connection on return
/// (release on all exit paths via RAII). There is no cross-operation
/// transaction state; callers under concurrent write load get whatever
/// single-statement guarantees SQLite provides.
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    /// Open the store at its default per-user location, creating it if
    /// needed and bringing the schema up to date.
    pub fn open() -> Result<Self> {
        Self::open_at(Self::default_path()?)
    }

    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self { db_path: path };
        // Fail fast if the file cannot be opened or migrated.
        store.conn()?;
        Ok(store)
    }

    pub fn path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Fresh connection with the schema ensured. Every store operation
    /// goes through here.
    pub(crate) fn conn(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        schema::ensure(&conn)?;
        Ok(conn)
    }

    fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not locate a config directory",
            )
        })?;
        Ok(config_dir.join("leadbook").join("contacts.db"))
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    /// Store backed by a temp directory; keep the guard alive for the test.
    pub(crate) fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_at(dir.path().join("contacts.db")).unwrap();
        (dir, store)
    }
}
