//! CSV export: human labels as the header row, attributes in declared
//! column order, `id` excluded.

use std::io::Write;

use crate::error::Result;
use crate::models::{Contact, Field};

pub fn write_csv<W: Write>(contacts: &[Contact], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(Field::ALL.iter().map(|f| f.label()))?;
    for contact in contacts {
        wtr.write_record(Field::ALL.iter().map(|&field| contact.get(field)))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(contacts: &[Contact]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(contacts, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactFields;

    fn contact(id: i64, name: &str) -> Contact {
        Contact {
            id,
            fields: ContactFields::default().with(Field::FullName, name),
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_header_row_uses_labels_without_id() {
        let csv = to_csv_string(&[]).unwrap();
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("Date Captured,State,Country"));
        assert!(header.ends_with("Email Address,Tags"));
        assert!(!header.contains("id"));
    }

    #[test]
    fn test_rows_follow_declared_order() {
        let csv = to_csv_string(&[contact(7, "Thabo"), contact(3, "Anna")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Thabo"));
        assert!(lines[2].contains("Anna"));
        // the surrogate id never leaks into the export
        assert!(!lines[1].contains('7'));
    }
}
