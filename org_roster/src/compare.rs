//! Statistics on date slices, comparisons between two dates and trends.

use std::collections::BTreeSet;

use log::debug;

use crate::config::Field;
use crate::table::Roster;

/// Aggregate counts for one date slice.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SliceStats {
    pub date: String,
    /// Number of rows in the slice.
    pub people: usize,
    pub supervisors: usize,
    pub leads: usize,
    pub roles: usize,
}

impl SliceStats {
    pub fn of(date: &str, slice: &Roster) -> SliceStats {
        SliceStats {
            date: date.to_string(),
            people: slice.len(),
            supervisors: slice.count_unique(Field::Supervisor),
            leads: slice.count_unique(Field::Lead),
            roles: slice.count_unique(Field::Role),
        }
    }
}

/// Differences between two dates of the same roster.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Comparison {
    pub before: SliceStats,
    pub after: SliceStats,
    /// Present at the first date, absent at the second.
    pub departed: BTreeSet<String>,
    /// Present at the second date, absent at the first.
    pub arrived: BTreeSet<String>,
}

fn names(slice: &Roster) -> BTreeSet<String> {
    slice
        .unique_values(Field::Name)
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn compare(roster: &Roster, date_a: &str, date_b: &str) -> Comparison {
    let slice_a = roster.slice(date_a);
    let slice_b = roster.slice(date_b);
    let names_a = names(&slice_a);
    let names_b = names(&slice_b);
    let res = Comparison {
        before: SliceStats::of(date_a, &slice_a),
        after: SliceStats::of(date_b, &slice_b),
        departed: names_a.difference(&names_b).cloned().collect(),
        arrived: names_b.difference(&names_a).cloned().collect(),
    };
    debug!(
        "compare: {} -> {}: {} departed, {} arrived",
        date_a,
        date_b,
        res.departed.len(),
        res.arrived.len()
    );
    res
}

/// Distinct counts for one date, as used for the evolution over time.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TrendPoint {
    pub date: String,
    pub names: usize,
    pub supervisors: usize,
    pub leads: usize,
    pub roles: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Trends {
    /// One point per date, oldest first.
    pub evolution: Vec<TrendPoint>,
    /// Number of rows per role, most frequent first.
    pub roles: Vec<(String, usize)>,
    /// Number of rows per supervisor, most frequent first.
    pub supervisors: Vec<(String, usize)>,
}

/// Counts the rows per value, most frequent first. Ties keep the order of
/// first appearance.
pub fn value_counts(roster: &Roster, field: Field) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = roster
        .unique_values(field)
        .into_iter()
        .map(|v| (v.to_string(), 0))
        .collect();
    for value in roster.records.iter().filter_map(|r| r.get(field)) {
        if let Some(entry) = counts.iter_mut().find(|(v, _)| v.as_str() == value) {
            entry.1 += 1;
        }
    }
    // Stable sort.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn trends(roster: &Roster) -> Trends {
    let evolution: Vec<TrendPoint> = roster
        .dates()
        .into_iter()
        .map(|date| {
            let slice = roster.slice(&date);
            TrendPoint {
                names: slice.count_unique(Field::Name),
                supervisors: slice.count_unique(Field::Supervisor),
                leads: slice.count_unique(Field::Lead),
                roles: slice.count_unique(Field::Role),
                date,
            }
        })
        .collect();
    Trends {
        evolution,
        roles: value_counts(roster, Field::Role),
        supervisors: value_counts(roster, Field::Supervisor),
    }
}
