use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::{filter, schema::TABLE, FilterMap, Store};
use crate::error::Result;
use crate::models::{tags, Contact, ContactFields, ContactPatch, Field};

impl Store {
    // ==================== CREATE ====================

    /// Append a batch of records, one row per draft. Attributes left empty
    /// persist as empty strings; the tag attribute is normalized on write.
    /// Returns the number of rows inserted. There is no conflict-key merge:
    /// every draft becomes a new record with a fresh id.
    pub fn insert_many(&self, drafts: &[ContactFields]) -> Result<usize> {
        if drafts.is_empty() {
            return Ok(0);
        }
        let conn = self.conn()?;
        let keys: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE,
            keys.join(", "),
            vec!["?"; keys.len()].join(", ")
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut inserted = 0;
        for draft in drafts {
            let values: Vec<String> = Field::ALL
                .iter()
                .map(|&field| {
                    if field == Field::Tags {
                        tags::normalize(draft.get(field))
                    } else {
                        draft.get(field).to_string()
                    }
                })
                .collect();
            inserted += stmt.execute(params_from_iter(values.iter()))?;
        }
        Ok(inserted)
    }

    pub fn insert_one(&self, draft: &ContactFields) -> Result<usize> {
        self.insert_many(std::slice::from_ref(draft))
    }

    // ==================== READ ====================

    /// Filtered, searched listing, newest first. Empty filters and an empty
    /// query return every record. Predicate semantics live in the filter
    /// module: filters AND across attributes, search tokens AND across the
    /// searchable columns.
    pub fn list(&self, filters: &FilterMap, search: &str) -> Result<Vec<Contact>> {
        let conn = self.conn()?;
        let predicate = filter::compile(filters, search);
        let sql = format!("SELECT * FROM {}{} ORDER BY id DESC", TABLE, predicate.sql);
        let mut stmt = conn.prepare(&sql)?;
        let contacts = stmt
            .query_map(params_from_iter(predicate.params.iter()), row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contacts)
    }

    /// Every record, newest first. Kept as its own path rather than
    /// delegating to `list` so export can diverge (streaming, redaction)
    /// without entangling the filtered read.
    pub fn export_all(&self) -> Result<Vec<Contact>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT * FROM {} ORDER BY id DESC", TABLE))?;
        let contacts = stmt
            .query_map([], row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contacts)
    }

    /// Distinct non-empty values of one attribute, ascending. Feeds the
    /// presentation layer's filter drop-downs.
    pub fn distinct_values(&self, field: Field) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT DISTINCT {0} FROM {1} WHERE {0} IS NOT NULL AND {0} <> '' ORDER BY 1 ASC",
            field.key(),
            TABLE
        );
        let mut stmt = conn.prepare(&sql)?;
        let values = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(values)
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", TABLE), [], |row| {
            row.get(0)
        })?;
        Ok(n as u64)
    }

    /// Row counts grouped by one attribute's value (empty and NULL values
    /// land in the "" bucket), largest bucket first. Drives KPI tiles.
    pub fn count_by(&self, field: Field) -> Result<Vec<(String, u64)>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT COALESCE({0}, '') AS v, COUNT(*) FROM {1} GROUP BY v ORDER BY 2 DESC, 1 ASC",
            field.key(),
            TABLE
        );
        let mut stmt = conn.prepare(&sql)?;
        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get::<_, i64>(1)? as u64)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(counts)
    }

    // ==================== UPDATE ====================

    /// Apply partial edits by id. A patch without an id (or id 0) or
    /// without any attributes is skipped silently — intentional leniency
    /// toward half-filled rows from an edit grid, not an error. Only the
    /// attributes present in a patch are written; `updated_at` is refreshed
    /// on every applied patch. Returns total rows affected.
    ///
    /// Patches run as independent statements, not one transaction; a batch
    /// can land partially if the store fails midway.
    pub fn update_rows(&self, patches: &[ContactPatch]) -> Result<usize> {
        if patches.is_empty() {
            return Ok(0);
        }
        let conn = self.conn()?;
        let mut updated = 0;
        for patch in patches {
            let id = match patch.id {
                Some(id) if id > 0 => id,
                _ => continue,
            };
            if patch.is_empty() {
                continue;
            }
            let set_clause = patch
                .fields()
                .keys()
                .map(|f| format!("{} = ?", f.key()))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "UPDATE {} SET {}, updated_at = datetime('now') WHERE id = ?",
                TABLE, set_clause
            );
            let values: Vec<String> = patch
                .fields()
                .iter()
                .map(|(&field, value)| {
                    if field == Field::Tags {
                        tags::normalize(value)
                    } else {
                        value.clone()
                    }
                })
                .collect();
            let mut sql_params: Vec<&dyn rusqlite::ToSql> =
                values.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
            sql_params.push(&id);
            updated += conn.execute(&sql, params_from_iter(sql_params))?;
        }
        Ok(updated)
    }

    /// Set arithmetic over the tag attribute of each listed record: parse
    /// the stored string into a token set, insert every trimmed non-empty
    /// `add` token, then discard every `remove` token — so a tag named in
    /// both lists ends up removed. Ids are processed independently (unknown
    /// ids are skipped); there is no cross-id transaction, so a store-fatal
    /// failure can leave earlier ids updated.
    pub fn update_tags(&self, ids: &[i64], add: &[String], remove: &[String]) -> Result<()> {
        let conn = self.conn()?;
        for &id in ids {
            let current: Option<Option<String>> = conn
                .query_row(
                    &format!("SELECT tags FROM {} WHERE id = ?", TABLE),
                    [id],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(stored) = current else {
                continue;
            };
            let mut set = tags::parse_set(stored.as_deref().unwrap_or(""));
            for tag in add {
                let tag = tag.trim();
                if !tag.is_empty() {
                    set.insert(tag.to_string());
                }
            }
            for tag in remove {
                set.remove(tag.trim());
            }
            conn.execute(
                &format!(
                    "UPDATE {} SET tags = ?, updated_at = datetime('now') WHERE id = ?",
                    TABLE
                ),
                params![tags::join_set(&set), id],
            )?;
        }
        Ok(())
    }
}

fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
    let mut fields = ContactFields::default();
    for &field in &Field::ALL {
        let value: Option<String> = row.get(field.key())?;
        fields.set(field, value.unwrap_or_default());
    }
    Ok(Contact {
        id: row.get("id")?,
        fields,
        created_at: row
            .get::<_, Option<String>>("created_at")?
            .unwrap_or_default(),
        updated_at: row.get("updated_at")?,
    })
}
