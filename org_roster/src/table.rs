// ********* Tables ***********

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::clean::parse_date;
use crate::config::Field;

/// A cell as read from a spreadsheet, before any interpretation.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// Coerces the cell to text. Empty cells stay empty.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Int(i) => Some(i.to_string()),
            // Spreadsheets store most integers as floats.
            Cell::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                Some(format!("{}", *f as i64))
            }
            Cell::Float(f) => Some(f.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// A table of unconstrained shape: the headers of the first row and the
/// cells of every following row.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// One person on one date.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Default)]
pub struct Record {
    pub date: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub lead: Option<String>,
    pub supervisor: Option<String>,
    /// Values of the columns that are not part of the schema, in the order of
    /// `Roster::extra_columns`.
    pub extra: Vec<Option<String>>,
}

impl Record {
    pub fn new(date: &str, name: &str, role: &str, lead: &str, supervisor: &str) -> Record {
        Record {
            date: Some(date.to_string()),
            name: Some(name.to_string()),
            role: Some(role.to_string()),
            lead: Some(lead.to_string()),
            supervisor: Some(supervisor.to_string()),
            extra: Vec::new(),
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Date => &self.date,
            Field::Name => &self.name,
            Field::Role => &self.role,
            Field::Lead => &self.lead,
            Field::Supervisor => &self.supervisor,
        };
        value.as_deref()
    }

    pub(crate) fn get_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Date => &mut self.date,
            Field::Name => &mut self.name,
            Field::Role => &mut self.role,
            Field::Lead => &mut self.lead,
            Field::Supervisor => &mut self.supervisor,
        }
    }

    /// All the values, canonical fields first, in the order of `Roster::columns`.
    pub fn values(&self) -> Vec<Option<&str>> {
        let mut res: Vec<Option<&str>> = Field::ALL.iter().map(|f| self.get(*f)).collect();
        res.extend(self.extra.iter().map(|v| v.as_deref()));
        res
    }
}

/// Restricts a roster to some supervisors and roles. An empty list keeps everything.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SliceFilter {
    pub supervisors: Vec<String>,
    pub roles: Vec<String>,
}

impl SliceFilter {
    fn accepts(&self, record: &Record) -> bool {
        let in_list = |list: &[String], value: Option<&str>| {
            list.is_empty() || value.map_or(false, |v| list.iter().any(|x| x == v))
        };
        in_list(&self.supervisors, record.supervisor.as_deref())
            && in_list(&self.roles, record.role.as_deref())
    }
}

/// A table with the canonical schema.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Roster {
    pub extra_columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Roster {
    pub fn new(records: Vec<Record>) -> Roster {
        Roster {
            extra_columns: Vec::new(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The canonical column names followed by the extra columns.
    pub fn columns(&self) -> Vec<String> {
        let mut res: Vec<String> = Field::ALL
            .iter()
            .map(|f| f.column_name().to_string())
            .collect();
        res.extend(self.extra_columns.iter().cloned());
        res
    }

    /// The distinct non-blank values of a field, by order of first appearance.
    pub fn unique_values(&self, field: Field) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.get(field))
            .filter(|v| !v.is_empty() && seen.insert(*v))
            .collect()
    }

    pub fn count_unique(&self, field: Field) -> usize {
        self.unique_values(field).len()
    }

    /// The distinct dates, oldest first. Dates that cannot be read go last.
    pub fn dates(&self) -> Vec<String> {
        let mut dates: Vec<(Option<NaiveDate>, usize, &str)> = self
            .unique_values(Field::Date)
            .into_iter()
            .enumerate()
            .map(|(idx, d)| (parse_date(d), idx, d))
            .collect();
        dates.sort_by_key(|(parsed, idx, _)| (parsed.is_none(), *parsed, *idx));
        dates.into_iter().map(|(_, _, d)| d.to_string()).collect()
    }

    pub fn latest_date(&self) -> Option<String> {
        self.dates()
            .into_iter()
            .filter(|d| parse_date(d).is_some())
            .last()
    }

    /// The date slice: all the records of one date.
    pub fn slice(&self, date: &str) -> Roster {
        self.retain(|r| r.date.as_deref() == Some(date))
    }

    pub fn filter(&self, filter: &SliceFilter) -> Roster {
        self.retain(|r| filter.accepts(r))
    }

    fn retain<F: Fn(&Record) -> bool>(&self, keep: F) -> Roster {
        Roster {
            extra_columns: self.extra_columns.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}
