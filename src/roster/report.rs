// The JSON summaries and the console reports.

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

use crate::roster::*;

fn counts_to_json(counts: &[(String, usize)]) -> Vec<JSValue> {
    counts
        .iter()
        .map(|(value, count)| json!({"value": value, "count": count}))
        .collect()
}

pub fn slice_stats_js(stats: &SliceStats) -> JSValue {
    json!({
        "date": stats.date,
        "people": stats.people,
        "supervisors": stats.supervisors,
        "leads": stats.leads,
        "roles": stats.roles,
    })
}

pub fn import_summary_js(prepared: &Prepared) -> JSValue {
    let mut mapping: JSMap<String, JSValue> = JSMap::new();
    for field in Field::ALL.iter() {
        if let Some(header) = prepared.mapping.header(*field) {
            mapping.insert(field.column_name().to_string(), json!(header));
        }
    }
    let roster = &prepared.roster;
    json!({
        "mapping": mapping,
        "records": roster.len(),
        "people": roster.count_unique(Field::Name),
        "dates": roster.dates(),
        "extraColumns": roster.extra_columns,
        "valid": prepared.report.valid,
        "warnings": prepared.report.warnings,
    })
}

pub fn trends_js(trends: &Trends) -> JSValue {
    let evolution: Vec<JSValue> = trends
        .evolution
        .iter()
        .map(|p| {
            json!({
                "date": p.date,
                "names": p.names,
                "supervisors": p.supervisors,
                "leads": p.leads,
                "roles": p.roles,
            })
        })
        .collect();
    json!({
        "evolution": evolution,
        "roles": counts_to_json(&trends.roles),
        "supervisors": counts_to_json(&trends.supervisors),
    })
}

pub fn comparison_js(comparison: &Comparison) -> JSValue {
    json!({
        "before": slice_stats_js(&comparison.before),
        "after": slice_stats_js(&comparison.after),
        "departed": comparison.departed,
        "arrived": comparison.arrived,
    })
}

pub fn to_pretty_json(js: &JSValue) -> RosterResult<String> {
    serde_json::to_string_pretty(js).context(SerializingJsonSnafu {})
}

pub fn print_slice_stats(stats: &SliceStats) {
    println!("📅 {}", stats.date);
    println!("👥 Total de Pessoas: {}", stats.people);
    println!("👔 Supervisores: {}", stats.supervisors);
    println!("👷 Encarregados: {}", stats.leads);
    println!("🔧 Funções: {}", stats.roles);
}

fn format_delta(before: usize, after: usize) -> String {
    let delta = after as i64 - before as i64;
    format!("{} -> {} ({:+})", before, after, delta)
}

fn format_names(names: &std::collections::BTreeSet<String>) -> String {
    if names.is_empty() {
        "nenhuma".to_string()
    } else {
        names.iter().cloned().collect::<Vec<String>>().join(", ")
    }
}

pub fn comparison_lines(comparison: &Comparison) -> Vec<String> {
    let (a, b) = (&comparison.before, &comparison.after);
    vec![
        format!("📅 {} -> {}", a.date, b.date),
        format!("👥 Total de Pessoas: {}", format_delta(a.people, b.people)),
        format!("👔 Supervisores: {}", format_delta(a.supervisors, b.supervisors)),
        format!("👷 Encarregados: {}", format_delta(a.leads, b.leads)),
        format!("🔧 Funções: {}", format_delta(a.roles, b.roles)),
        format!(
            "🔴 Saídas ({}): {}",
            comparison.departed.len(),
            format_names(&comparison.departed)
        ),
        format!(
            "🟢 Entradas ({}): {}",
            comparison.arrived.len(),
            format_names(&comparison.arrived)
        ),
    ]
}

pub fn print_comparison(comparison: &Comparison) {
    for line in comparison_lines(comparison) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Roster {
        Roster::new(vec![
            Record::new("01/02/2024", "Ana", "Pedreira", "Joao", "Marta"),
            Record::new("01/02/2024", "Bia", "Servente", "Joao", "Marta"),
            Record::new("02/02/2024", "Ana", "Pedreira", "Joao", "Marta"),
            Record::new("02/02/2024", "Caio", "Servente", "Luis", "Paulo"),
        ])
    }

    #[test]
    fn comparison_report() {
        let comparison = compare(&sample(), "01/02/2024", "02/02/2024");
        let lines = comparison_lines(&comparison);
        assert_eq!(lines[0], "📅 01/02/2024 -> 02/02/2024");
        assert_eq!(lines[1], "👥 Total de Pessoas: 2 -> 2 (+0)");
        assert_eq!(lines[2], "👔 Supervisores: 1 -> 2 (+1)");
        assert_eq!(lines[5], "🔴 Saídas (1): Bia");
        assert_eq!(lines[6], "🟢 Entradas (1): Caio");

        let js = comparison_js(&comparison);
        assert_eq!(js["departed"], json!(["Bia"]));
        assert_eq!(js["after"]["leads"], json!(2));
    }

    #[test]
    fn no_departures() {
        let comparison = compare(&sample(), "02/02/2024", "02/02/2024");
        let lines = comparison_lines(&comparison);
        assert_eq!(lines[5], "🔴 Saídas (0): nenhuma");
    }

    #[test]
    fn trends_summary() {
        let js = trends_js(&trends(&sample()));
        assert_eq!(js["evolution"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(js["evolution"][1]["supervisors"], json!(2));
        assert_eq!(js["roles"][0], json!({"value": "Pedreira", "count": 2}));
        assert_eq!(js["supervisors"][0], json!({"value": "Marta", "count": 3}));
    }

    #[test]
    fn import_summary() {
        let table = RawTable {
            headers: ["Data", "Nome", "Função", "Líder", "Gestor"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![vec![
                Cell::Text("01/02/2024".to_string()),
                Cell::Text("Ana".to_string()),
                Cell::Empty,
                Cell::Text("Joao".to_string()),
                Cell::Text("Marta".to_string()),
            ]],
        };
        let prepared = prepare(&table).unwrap();
        let js = import_summary_js(&prepared);
        assert_eq!(js["mapping"]["encarregado"], json!("Líder"));
        assert_eq!(js["records"], json!(1));
        assert_eq!(js["dates"], json!(["01/02/2024"]));
        assert_eq!(js["valid"], json!(false));
        assert!(to_pretty_json(&js).unwrap().contains("\"warnings\""));
    }
}
