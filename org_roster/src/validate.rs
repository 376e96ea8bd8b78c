use std::collections::HashSet;

use log::debug;

use crate::config::Field;
use crate::table::{Record, Roster};

pub const EMPTY_TABLE_MESSAGE: &str = "❌ Planilha está vazia";

/// The outcome of the checks on a roster.
///
/// Warnings are advisory: the caller may still go on with a roster that has
/// warnings, but never with an empty one.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ValidationReport {
    pub valid: bool,
    pub warnings: Vec<String>,
    pub empty_table: bool,
}

impl ValidationReport {
    /// Whether the caller may proceed by ignoring the warnings.
    pub fn can_override(&self) -> bool {
        !self.empty_table
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Number of rows that repeat an earlier row exactly.
pub fn count_duplicates(records: &[Record]) -> usize {
    let mut seen: HashSet<&Record> = HashSet::new();
    records.iter().filter(|r| !seen.insert(*r)).count()
}

/// Checks a roster for emptiness, blank required values and duplicated rows.
pub fn validate(roster: &Roster) -> ValidationReport {
    if roster.is_empty() {
        return ValidationReport {
            valid: false,
            warnings: vec![EMPTY_TABLE_MESSAGE.to_string()],
            empty_table: true,
        };
    }

    let mut warnings: Vec<String> = Vec::new();
    for field in Field::REQUIRED_VALUES {
        let blanks = roster
            .records
            .iter()
            .filter(|r| is_blank(r.get(field)))
            .count();
        if blanks > 0 {
            warnings.push(format!(
                "⚠️ {} valores vazios na coluna '{}'",
                blanks,
                field.column_name()
            ));
        }
    }

    let duplicates = count_duplicates(&roster.records);
    if duplicates > 0 {
        warnings.push(format!("⚠️ {} linhas duplicadas encontradas", duplicates));
    }

    debug!("validate: {} rows, warnings: {:?}", roster.len(), warnings);
    ValidationReport {
        valid: warnings.is_empty(),
        warnings,
        empty_table: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Record {
        Record::new("01/02/2024", name, "Pedreiro", "Joao", "Marta")
    }

    #[test]
    fn empty_roster_stops_immediately() {
        let report = validate(&Roster::default());
        assert!(!report.valid);
        assert!(!report.can_override());
        assert_eq!(report.warnings, vec!["❌ Planilha está vazia".to_string()]);
    }

    #[test]
    fn clean_roster_is_valid() {
        let report = validate(&Roster::new(vec![record("Ana"), record("Bia")]));
        assert!(report.valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn counts_blank_values_per_column() {
        let mut records: Vec<Record> = ["Ana", "Bia", "Caio", "Dani"].iter().map(|n| record(n)).collect();
        for r in records.iter_mut().take(3) {
            r.role = None;
        }
        records[3].supervisor = Some("  ".to_string());
        let report = validate(&Roster::new(records));
        assert!(!report.valid);
        assert!(report.can_override());
        assert_eq!(
            report.warnings,
            vec![
                "⚠️ 3 valores vazios na coluna 'funcao'".to_string(),
                "⚠️ 1 valores vazios na coluna 'supervisor'".to_string(),
            ]
        );
    }

    #[test]
    fn counts_duplicates() {
        let report = validate(&Roster::new(vec![
            record("Ana"),
            record("Ana"),
            record("Bia"),
            record("Ana"),
        ]));
        assert_eq!(
            report.warnings,
            vec!["⚠️ 2 linhas duplicadas encontradas".to_string()]
        );
    }

    #[test]
    fn blank_date_is_not_a_warning() {
        let mut r = record("Ana");
        r.date = None;
        assert!(validate(&Roster::new(vec![r])).valid);
    }
}
