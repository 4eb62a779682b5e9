use std::collections::HashSet;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::Field;

pub(crate) const TABLE: &str = "contacts";

/// Ensure the contact table exists and carries every declared column.
///
/// Migration is additive-only and idempotent: columns are never dropped or
/// renamed, and an up-to-date schema makes this a create-if-missing plus a
/// `PRAGMA table_info` check. Runs on every connection acquisition, so it
/// must stay cheap on the happy path. Concurrent callers against the same
/// file serialize on the connection's busy timeout.
pub(crate) fn ensure(conn: &Connection) -> Result<()> {
    let columns: Vec<String> = Field::ALL
        .iter()
        .map(|f| format!("{} TEXT", f.key()))
        .collect();
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            {},
            created_at TEXT DEFAULT (datetime('now')),
            updated_at TEXT
        );",
        TABLE,
        columns.join(",\n            ")
    ))?;

    // Repair schema drift: the declared column list may have grown since
    // the table was created. Existing data is never touched.
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", TABLE))?;
    let existing: HashSet<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<_>>()?;
    for &field in &Field::ALL {
        if !existing.contains(field.key()) {
            conn.execute_batch(&format!(
                "ALTER TABLE {} ADD COLUMN {} TEXT;",
                TABLE,
                field.key()
            ))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", TABLE)).unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure(&conn).unwrap();
        let first = column_names(&conn);
        ensure(&conn).unwrap();
        assert_eq!(column_names(&conn), first);
        // id + 21 fields + 2 timestamps
        assert_eq!(first.len(), 24);
    }

    #[test]
    fn test_ensure_adds_missing_columns_without_data_loss() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT,
                phone_number TEXT,
                created_at TEXT DEFAULT (datetime('now')),
                updated_at TEXT
            );
            INSERT INTO contacts (full_name, phone_number) VALUES ('Thandi', '555');",
        )
        .unwrap();

        ensure(&conn).unwrap();

        let cols = column_names(&conn);
        for &field in &Field::ALL {
            assert!(cols.iter().any(|c| c == field.key()), "missing {}", field.key());
        }
        let (name, city): (String, Option<String>) = conn
            .query_row("SELECT full_name, city FROM contacts", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(name, "Thandi");
        assert_eq!(city, None);
    }
}
