//! Compiles a structured filter map plus a free-text query into a SQL
//! predicate. Column names come exclusively from the closed [`Field`] enum;
//! every value travels as a bound parameter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Field;

/// A filter value: one permitted value (exact equality) or several
/// (membership). Serializes untagged so segment documents hold plain
/// strings and arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl FilterValue {
    fn is_empty(&self) -> bool {
        match self {
            FilterValue::One(v) => v.is_empty(),
            FilterValue::Many(vs) => vs.is_empty(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::One(v.to_string())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(vs: Vec<String>) -> Self {
        FilterValue::Many(vs)
    }
}

/// A saved or ad hoc filter: attribute → permitted value(s). Clauses are
/// ANDed across attributes; list values are ORed within one attribute.
pub type FilterMap = BTreeMap<Field, FilterValue>;

/// A compiled predicate: `sql` is empty or starts with `" WHERE "`, and
/// `params` carries one bound value per placeholder.
pub(crate) struct Predicate {
    pub sql: String,
    pub params: Vec<String>,
}

/// Compose the WHERE clause for `list`.
///
/// Structured filters match exact strings (case-sensitive); the free-text
/// query is split on whitespace and every token must case-insensitively
/// substring-match at least one searchable attribute. Empty filter values
/// are dropped entirely, not treated as "must be empty".
pub(crate) fn compile(filters: &FilterMap, search: &str) -> Predicate {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    for (field, value) in filters {
        if value.is_empty() {
            continue;
        }
        match value {
            FilterValue::One(v) => {
                clauses.push(format!("{} = ?", field.key()));
                params.push(v.clone());
            }
            FilterValue::Many(vs) => {
                let marks = vec!["?"; vs.len()].join(",");
                clauses.push(format!("{} IN ({})", field.key(), marks));
                params.extend(vs.iter().cloned());
            }
        }
    }

    for token in search.split_whitespace() {
        let pattern = format!("%{}%", escape_like(&token.to_lowercase()));
        let alternatives: Vec<String> = Field::SEARCHABLE
            .iter()
            .map(|f| format!("LOWER({}) LIKE ? ESCAPE '\\'", f.key()))
            .collect();
        clauses.push(format!("({})", alternatives.join(" OR ")));
        params.extend(std::iter::repeat(pattern).take(Field::SEARCHABLE.len()));
    }

    let sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    Predicate { sql, params }
}

/// Escape LIKE metacharacters (% _ \) so tokens match literally.
fn escape_like(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_compile_to_nothing() {
        let predicate = compile(&FilterMap::new(), "");
        assert_eq!(predicate.sql, "");
        assert!(predicate.params.is_empty());
    }

    #[test]
    fn test_scalar_and_list_clauses() {
        let mut filters = FilterMap::new();
        filters.insert(Field::Country, "South Africa".into());
        filters.insert(
            Field::LeadTemperature,
            vec!["Hot".to_string(), "Warm".to_string()].into(),
        );
        let predicate = compile(&filters, "");
        // map iterates in declared column order: country before lead_temperature
        assert_eq!(
            predicate.sql,
            " WHERE country = ? AND lead_temperature IN (?,?)"
        );
        assert_eq!(predicate.params, vec!["South Africa", "Hot", "Warm"]);
    }

    #[test]
    fn test_empty_values_are_dropped() {
        let mut filters = FilterMap::new();
        filters.insert(Field::Country, "".into());
        filters.insert(Field::City, FilterValue::Many(vec![]));
        let predicate = compile(&filters, "");
        assert_eq!(predicate.sql, "");
    }

    #[test]
    fn test_search_tokens_and_across_fields_or() {
        let predicate = compile(&FilterMap::new(), "john cape");
        // two tokens, each probing all ten searchable fields
        assert_eq!(predicate.params.len(), 20);
        assert!(predicate.sql.contains(") AND ("));
        assert!(predicate.sql.contains("LOWER(full_name) LIKE ? ESCAPE '\\'"));
        assert_eq!(predicate.params[0], "%john%");
        assert_eq!(predicate.params[10], "%cape%");
    }

    #[test]
    fn test_like_metacharacters_escaped() {
        let predicate = compile(&FilterMap::new(), "100%_done");
        assert_eq!(predicate.params[0], "%100\\%\\_done%");
    }

    #[test]
    fn test_filter_value_serde_untagged() {
        let one: FilterValue = serde_json::from_str("\"Hot\"").unwrap();
        assert_eq!(one, FilterValue::One("Hot".to_string()));
        let many: FilterValue = serde_json::from_str("[\"Hot\",\"Warm\"]").unwrap();
        assert_eq!(
            many,
            FilterValue::Many(vec!["Hot".to_string(), "Warm".to_string()])
        );
    }
}
