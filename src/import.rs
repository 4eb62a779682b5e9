//! CSV import: parse a spreadsheet, map its headers onto contact fields,
//! and build insert drafts. The caller owns the mapping UI and any XLSX
//! decoding; this module only consumes header → cell text rows.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{ContactFields, Field};

/// Field → source column header. Fields absent from the mapping stay at
/// their empty-string default in the built drafts.
pub type ColumnMapping = BTreeMap<Field, String>;

/// A parsed spreadsheet: trimmed headers plus rows of header → cell text.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

/// Read a CSV stream into a [`Sheet`]. Ragged rows are tolerated; missing
/// cells read back as empty strings.
pub fn read_csv<R: Read>(reader: R) -> Result<Sheet> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            row.insert(header.clone(), record.get(i).unwrap_or("").to_string());
        }
        rows.push(row);
    }
    Ok(Sheet { headers, rows })
}

/// Best-guess mapping from source headers to fields: an exact label match
/// wins, otherwise a header whose lowercased, underscored form equals the
/// column key. Unmatched fields are left unmapped for the caller to fix.
pub fn guess_mapping(headers: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for &field in &Field::ALL {
        if let Some(header) = headers.iter().find(|h| h.as_str() == field.label()) {
            mapping.insert(field, header.clone());
        } else if let Some(header) = headers
            .iter()
            .find(|h| h.to_lowercase().replace(' ', "_") == field.key())
        {
            mapping.insert(field, header.clone());
        }
    }
    mapping
}

/// Build insert drafts from raw rows: copy only the mapped columns,
/// trimming cell text and normalizing date-valued fields to `YYYY-MM-DD`
/// where parseable (unparseable dates pass through as received).
pub fn build_drafts(rows: &[HashMap<String, String>], mapping: &ColumnMapping) -> Vec<ContactFields> {
    rows.iter()
        .map(|row| {
            let mut draft = ContactFields::default();
            for (&field, source) in mapping {
                let raw = row.get(source).map(String::as_str).unwrap_or("");
                let value = if field.is_date() {
                    normalize_date(raw)
                } else {
                    raw.trim().to_string()
                };
                draft.set(field, value);
            }
            draft
        })
        .collect()
}

/// Normalize common date spellings to ISO `YYYY-MM-DD`. Text that matches
/// none of the accepted formats is returned trimmed but otherwise as-is —
/// the store accepts any string and the caller decides what to do with it.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%d-%m-%Y",
        "%d.%m.%Y",
        "%d %b %Y",
        "%d %B %Y",
        "%b %d, %Y",
        "%B %d, %Y",
    ];
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    // timestamp-shaped input: keep the date part
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
