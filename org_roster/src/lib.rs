/*!
Column mapping, validation and organogram generation for daily team rosters.

A roster is a spreadsheet in which every row places one person, on one date,
under a lead ("encarregado") who reports to a supervisor. The headers are
written by people, so this crate first finds which column holds which
field, then cleans and checks the rows, and finally renders the three-level
hierarchy of a date in the DOT language, or compares two dates.

```
use org_roster::*;

let table = RawTable {
    headers: vec!["DT".into(), "Nome".into(), "Cargo".into(), "Encarregado".into(), "Supervisor".into()],
    rows: vec![vec![
        Cell::Text("01/02/2024".into()),
        Cell::Text(" Ana ".into()),
        Cell::Text("Pedreira".into()),
        Cell::Text("Joao".into()),
        Cell::Text("Marta".into()),
    ]],
};
let prepared = prepare(&table)?;
assert!(prepared.report.valid);

let day = prepared.roster.slice("01/02/2024");
let dot = render(&day, &ChartConfig::default());
assert!(dot.starts_with("digraph Organograma {"));
# Ok::<(), SchemaError>(())
```

See the [quick_start] module for a walk-through with the command line tool.
*/

mod chart;
mod clean;
mod compare;
mod config;
mod schema;
mod table;
mod validate;

pub mod quick_start;

use log::info;

pub use crate::chart::{
    escape_label, render, render_hierarchy, supervisor_color, Hierarchy, LeadGroup, Member,
    SupervisorGroup,
};
pub use crate::clean::{normalize, parse_date, DATE_FORMAT};
pub use crate::compare::{compare, trends, value_counts, Comparison, SliceStats, TrendPoint, Trends};
pub use crate::config::*;
pub use crate::schema::{apply_mapping, fold_header, resolve, ColumnMapping};
pub use crate::table::{Cell, RawTable, Record, Roster, SliceFilter};
pub use crate::validate::{count_duplicates, validate, ValidationReport, EMPTY_TABLE_MESSAGE};

/// A roster that went through the whole import pipeline.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Prepared {
    pub mapping: ColumnMapping,
    pub roster: Roster,
    pub report: ValidationReport,
}

/// Resolves the headers, renames the columns, cleans the rows and checks them.
///
/// Fails only if some canonical field has no column. Data quality problems
/// are reported in `Prepared::report`.
pub fn prepare(table: &RawTable) -> Result<Prepared, SchemaError> {
    info!(
        "Preparing table with {} rows, headers: {:?}",
        table.rows.len(),
        table.headers
    );
    let mapping = resolve(&table.headers);
    let renamed = apply_mapping(table, &mapping)?;
    let roster = normalize(&renamed);
    let report = validate(&roster);
    info!(
        "Prepared {} rows ({} before cleaning), {} warnings",
        roster.len(),
        renamed.len(),
        report.warnings.len()
    );
    Ok(Prepared {
        mapping,
        roster,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn import_reports_blank_role() {
        init();
        let table = RawTable {
            headers: ["DT", "Nome", "Cargo", "Encarregado", "Supervisor"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![
                vec![text("01/02/2024"), text("Ana"), text("Pedreira"), text("Joao"), text("Marta")],
                vec![text("01/02/2024"), text("Bia"), Cell::Empty, text("Joao"), text("Marta")],
                vec![text("01/02/2024"), text("Caio"), text("Servente"), text("Luis"), text("Paulo")],
            ],
        };
        let prepared = prepare(&table).unwrap();
        assert!(prepared.mapping.is_complete());
        assert_eq!(prepared.roster.len(), 3);
        assert!(!prepared.report.valid);
        assert_eq!(
            prepared.report.warnings,
            vec!["⚠️ 1 valores vazios na coluna 'funcao'".to_string()]
        );
    }

    #[test]
    fn import_fails_on_missing_columns() {
        init();
        let table = RawTable {
            headers: vec!["Nome".to_string(), "Cargo".to_string()],
            rows: vec![],
        };
        assert_eq!(
            prepare(&table),
            Err(SchemaError::MissingFields(vec![
                Field::Date,
                Field::Lead,
                Field::Supervisor
            ]))
        );
    }

    #[test]
    fn import_of_header_only_table_is_empty() {
        init();
        let table = RawTable {
            headers: ["Data", "Nome", "Função", "Líder", "Gestor"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![],
        };
        let prepared = prepare(&table).unwrap();
        assert!(prepared.report.empty_table);
        assert_eq!(prepared.report.warnings, vec![EMPTY_TABLE_MESSAGE.to_string()]);
    }

    #[test]
    fn native_dates_and_duplicates() {
        init();
        let date = Cell::Date(chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let row = vec![date, text("Ana "), text("Pedreira"), text("Joao"), text("Marta")];
        let table = RawTable {
            headers: ["Dia", "Pessoa", "Position", "Leader", "Chefe"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![row.clone(), row],
        };
        let prepared = prepare(&table).unwrap();
        assert_eq!(prepared.roster.len(), 1);
        assert_eq!(prepared.roster.records[0].date.as_deref(), Some("05/03/2024"));
        assert!(prepared.report.valid);
    }
}
