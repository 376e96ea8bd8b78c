//! Resolution of human-authored headers to the canonical schema.

use std::collections::BTreeMap;

use log::debug;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::config::{Field, SchemaError};
use crate::table::{RawTable, Record, Roster};

/// Which column of the original table holds each canonical field.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ColumnMapping {
    columns: BTreeMap<Field, (usize, String)>,
}

impl ColumnMapping {
    /// The original header for this field.
    pub fn header(&self, field: Field) -> Option<&str> {
        self.columns.get(&field).map(|(_, h)| h.as_str())
    }

    /// The position of the column in the original table.
    pub fn index(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).map(|(idx, _)| *idx)
    }

    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .filter(|f| !self.columns.contains_key(f))
            .cloned()
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

/// Lowercases, trims and removes the accents of a header.
pub fn fold_header(header: &str) -> String {
    header
        .to_lowercase()
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn starts_with_synonym(folded: &str, synonyms: &[&str]) -> bool {
    synonyms.iter().any(|s| folded.starts_with(s))
}

fn word_starts_with_synonym(folded: &str, synonyms: &[&str]) -> bool {
    folded
        .split(|c: char| c.is_whitespace() || matches!(c, '_' | '-' | '/' | '.'))
        .any(|word| !word.is_empty() && starts_with_synonym(word, synonyms))
}

/// Maps each canonical field to the first header that starts with one of its
/// synonyms.
///
/// Only when no header starts with a synonym, a header in which one of the
/// words starts with a synonym is accepted instead (`Employee Name`).
/// Fields without a match are absent from the mapping.
pub fn resolve(headers: &[String]) -> ColumnMapping {
    let folded: Vec<String> = headers.iter().map(|h| fold_header(h)).collect();
    let mut columns: BTreeMap<Field, (usize, String)> = BTreeMap::new();
    for field in Field::ALL {
        let synonyms = field.synonyms();
        let found = folded
            .iter()
            .position(|h| starts_with_synonym(h, synonyms))
            .or_else(|| {
                folded
                    .iter()
                    .position(|h| word_starts_with_synonym(h, synonyms))
            });
        match found {
            Some(idx) => {
                debug!("resolve: {} -> {:?} (column {})", field, headers[idx], idx);
                columns.insert(field, (idx, headers[idx].clone()));
            }
            None => {
                debug!("resolve: no header found for {}", field);
            }
        }
    }
    ColumnMapping { columns }
}

/// Renames the table to the canonical schema.
///
/// The columns that are not part of the mapping are kept as extra columns,
/// in their original order.
pub fn apply_mapping(table: &RawTable, mapping: &ColumnMapping) -> Result<Roster, SchemaError> {
    let missing = mapping.missing();
    if !missing.is_empty() {
        return Err(SchemaError::MissingFields(missing));
    }
    let mapped: Vec<usize> = mapping.columns.values().map(|(idx, _)| *idx).collect();
    let extra_indexes: Vec<usize> = (0..table.headers.len())
        .filter(|idx| !mapped.contains(idx))
        .collect();

    let records: Vec<Record> = table
        .rows
        .iter()
        .map(|row| {
            let cell = |idx: usize| row.get(idx).and_then(|c| c.to_text());
            let mut record = Record {
                extra: extra_indexes.iter().map(|idx| cell(*idx)).collect(),
                ..Record::default()
            };
            for (field, (idx, _)) in mapping.columns.iter() {
                *record.get_mut(*field) = cell(*idx);
            }
            record
        })
        .collect();

    Ok(Roster {
        extra_columns: extra_indexes
            .iter()
            .map(|idx| table.headers[*idx].clone())
            .collect(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn headers(hs: &[&str]) -> Vec<String> {
        hs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn folding_removes_case_and_accents() {
        assert_eq!(fold_header("  Função "), "funcao");
        assert_eq!(fold_header("LÍDER"), "lider");
        assert_eq!(fold_header("Responsável"), "responsavel");
    }

    #[test]
    fn resolves_english_headers() {
        let m = resolve(&headers(&["Date", "Employee Name", "Role", "Responsavel", "Manager"]));
        assert!(m.is_complete());
        assert_eq!(m.header(Field::Date), Some("Date"));
        assert_eq!(m.header(Field::Name), Some("Employee Name"));
        assert_eq!(m.header(Field::Role), Some("Role"));
        assert_eq!(m.header(Field::Lead), Some("Responsavel"));
        assert_eq!(m.header(Field::Supervisor), Some("Manager"));
    }

    #[test]
    fn accents_and_case_do_not_matter() {
        let with_accent = resolve(&headers(&["Função"]));
        let without = resolve(&headers(&["funcao"]));
        assert_eq!(with_accent.index(Field::Role), Some(0));
        assert_eq!(without.index(Field::Role), Some(0));
    }

    #[test]
    fn prefix_match() {
        let m = resolve(&headers(&["supervisor_regional"]));
        assert_eq!(m.header(Field::Supervisor), Some("supervisor_regional"));
    }

    #[test]
    fn leftmost_header_wins() {
        let m = resolve(&headers(&["Cargo", "Role", "Nome", "Name"]));
        assert_eq!(m.header(Field::Role), Some("Cargo"));
        assert_eq!(m.header(Field::Name), Some("Nome"));
    }

    #[test]
    fn whole_header_prefix_takes_precedence_over_words() {
        let m = resolve(&headers(&["Nome do Supervisor", "Supervisor"]));
        assert_eq!(m.header(Field::Supervisor), Some("Supervisor"));
    }

    #[test]
    fn missing_fields_are_reported() {
        let m = resolve(&headers(&["DT", "Nome", "Observações"]));
        assert_eq!(m.missing(), vec![Field::Role, Field::Lead, Field::Supervisor]);
        let table = RawTable {
            headers: headers(&["DT", "Nome", "Observações"]),
            rows: vec![],
        };
        assert_eq!(
            apply_mapping(&table, &m),
            Err(SchemaError::MissingFields(vec![
                Field::Role,
                Field::Lead,
                Field::Supervisor
            ]))
        );
    }

    #[test]
    fn extra_columns_are_kept() {
        let table = RawTable {
            headers: headers(&["Obs", "DT", "Nome", "Cargo", "Encarregado", "Supervisor"]),
            rows: vec![vec![
                Cell::Text("turno B".to_string()),
                Cell::Text("01/02/2024".to_string()),
                Cell::Text("Ana".to_string()),
                Cell::Empty,
                Cell::Text("Joao".to_string()),
            ]],
        };
        let roster = apply_mapping(&table, &resolve(&table.headers)).unwrap();
        assert_eq!(roster.extra_columns, vec!["Obs".to_string()]);
        let r = &roster.records[0];
        assert_eq!(r.extra, vec![Some("turno B".to_string())]);
        assert_eq!(r.date.as_deref(), Some("01/02/2024"));
        assert_eq!(r.role, None);
        // The row is shorter than the header.
        assert_eq!(r.supervisor, None);
    }
}
