//! Generation of the organogram in the DOT language.
//!
//! The output only depends on the order of the rows: supervisors, leads and
//! persons appear in the order in which they are first seen.

use log::{debug, warn};

use crate::config::{ChartConfig, SUPERVISOR_PALETTE};
use crate::table::Roster;

const EDGE_COLOR: &str = "#666666";

/// A person under a lead.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Member {
    pub name: String,
    pub role: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LeadGroup {
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SupervisorGroup {
    pub name: String,
    pub leads: Vec<LeadGroup>,
}

/// The three levels of a date slice: supervisors, their leads and the
/// persons under each lead.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Hierarchy {
    pub supervisors: Vec<SupervisorGroup>,
}

impl Hierarchy {
    /// Groups the rows. Rows without a supervisor, a lead or a name have no
    /// place in the tree and are skipped.
    pub fn from_roster(roster: &Roster) -> Hierarchy {
        let mut supervisors: Vec<SupervisorGroup> = Vec::new();
        for (idx, r) in roster.records.iter().enumerate() {
            let (sup, lead, name) = match (&r.supervisor, &r.lead, &r.name) {
                (Some(s), Some(l), Some(n)) => (s, l, n),
                _ => {
                    warn!("Hierarchy: skipping incomplete row {}: {:?}", idx, r);
                    continue;
                }
            };
            let sup_group = match supervisors.iter().position(|g| g.name == *sup) {
                Some(pos) => &mut supervisors[pos],
                None => {
                    supervisors.push(SupervisorGroup {
                        name: sup.clone(),
                        leads: Vec::new(),
                    });
                    let last = supervisors.len() - 1;
                    &mut supervisors[last]
                }
            };
            let lead_group = match sup_group.leads.iter().position(|g| g.name == *lead) {
                Some(pos) => &mut sup_group.leads[pos],
                None => {
                    sup_group.leads.push(LeadGroup {
                        name: lead.clone(),
                        members: Vec::new(),
                    });
                    let last = sup_group.leads.len() - 1;
                    &mut sup_group.leads[last]
                }
            };
            lead_group.members.push(Member {
                name: name.clone(),
                role: r.role.clone().unwrap_or_default(),
            });
        }
        Hierarchy { supervisors }
    }
}

/// Escapes a label so that it can be put between double quotes.
pub fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('&', "&amp;")
}

/// The color of the supervisor at this position.
pub fn supervisor_color(index: usize) -> &'static str {
    SUPERVISOR_PALETTE[index % SUPERVISOR_PALETTE.len()]
}

/// Renders the organogram of a roster, usually a single date slice.
///
/// Nodes are identified by their escaped label: two persons with the same
/// name in the same slice share one node.
pub fn render(roster: &Roster, config: &ChartConfig) -> String {
    let hierarchy = Hierarchy::from_roster(roster);
    debug!(
        "render: {} rows, {} supervisors, layout {}",
        roster.len(),
        hierarchy.supervisors.len(),
        config.layout.as_str()
    );
    render_hierarchy(&hierarchy, config)
}

pub fn render_hierarchy(hierarchy: &Hierarchy, config: &ChartConfig) -> String {
    let mut dot = String::from("digraph Organograma {\n");
    dot.push_str(&format!("  rankdir={};\n", config.layout.as_str()));
    dot.push_str("  compound=true;\n");
    dot.push_str("  bgcolor=\"white\";\n");
    dot.push_str("  node [fontname=\"Helvetica\", style=filled, fontsize=10];\n");
    dot.push_str(&format!(
        "  edge [color=\"{}\", arrowsize=0.8];\n\n",
        EDGE_COLOR
    ));

    for (idx, sup) in hierarchy.supervisors.iter().enumerate() {
        let color = supervisor_color(idx);
        let sup_id = escape_label(&sup.name);

        dot.push_str(&format!("  subgraph cluster_{} {{\n", idx));
        dot.push_str(&format!("    label=\"{}\";\n", sup_id));
        dot.push_str("    style=filled;\n");
        // Translucent version of the supervisor color.
        dot.push_str(&format!("    fillcolor=\"{}30\";\n", color));
        dot.push_str(&format!("    color=\"{}\";\n", color));
        dot.push_str("    penwidth=2;\n");
        dot.push_str(&format!(
            "    \"{}\" [shape=ellipse, fillcolor=\"{}\", fontcolor=\"white\", fontsize=12, penwidth=2];\n",
            sup_id, color
        ));

        for lead in sup.leads.iter() {
            let lead_id = escape_label(&lead.name);
            dot.push_str(&format!(
                "    \"{}\" [shape=box, fillcolor=\"{}\", style=\"filled,rounded\", penwidth=1.5];\n",
                lead_id,
                config.lead_color()
            ));
            dot.push_str(&format!(
                "    \"{}\" -> \"{}\" [style=bold, color=\"{}\"];\n",
                sup_id, lead_id, color
            ));

            for member in lead.members.iter() {
                let name = escape_label(&member.name);
                let role = escape_label(&member.role);
                dot.push_str(&format!(
                    "    \"{}\" [shape=box, fillcolor=\"{}\", label=\"{}\\n({})\", style=\"filled,rounded\"];\n",
                    name,
                    config.person_color(),
                    name,
                    role
                ));
                dot.push_str(&format!(
                    "    \"{}\" -> \"{}\" [color=\"{}\"];\n",
                    lead_id, name, EDGE_COLOR
                ));
            }
        }

        dot.push_str("  }\n\n");
    }

    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutDirection, DEFAULT_LEAD_COLOR};
    use crate::table::Record;

    fn record(name: &str, role: &str, lead: &str, sup: &str) -> Record {
        Record::new("01/02/2024", name, role, lead, sup)
    }

    fn sample() -> Roster {
        Roster::new(vec![
            record("Ana", "Pedreiro", "Joao", "Marta"),
            record("Caio", "Servente", "Luis", "Paulo"),
            record("Bia", "Servente", "Joao", "Marta"),
            record("Dani", "Eletricista", "Rita", "Marta"),
        ])
    }

    /// Checks that the quoted strings are closed and the braces balanced.
    fn assert_well_formed(dot: &str) {
        let mut in_string = false;
        let mut escaped = false;
        let mut depth: i32 = 0;
        for c in dot.chars() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    '\n' => panic!("raw newline inside a string"),
                    _ => {}
                }
            } else {
                match c {
                    '"' => in_string = true,
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
                assert!(depth >= 0);
            }
        }
        assert!(!in_string);
        assert_eq!(depth, 0);
    }

    #[test]
    fn hierarchy_follows_first_appearance() {
        let h = Hierarchy::from_roster(&sample());
        let sups: Vec<&str> = h.supervisors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(sups, vec!["Marta", "Paulo"]);
        let leads: Vec<&str> = h.supervisors[0]
            .leads
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(leads, vec!["Joao", "Rita"]);
        let members: Vec<&str> = h.supervisors[0].leads[0]
            .members
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(members, vec!["Ana", "Bia"]);
    }

    #[test]
    fn incomplete_rows_are_skipped() {
        let mut r = record("Eva", "Servente", "Joao", "Marta");
        r.lead = None;
        let h = Hierarchy::from_roster(&Roster::new(vec![r]));
        assert!(h.supervisors.is_empty());
    }

    #[test]
    fn renders_expected_document() {
        let roster = Roster::new(vec![record("Ana", "Pedreiro", "Joao", "Marta")]);
        let dot = render(&roster, &ChartConfig::default());
        let expected = r##"digraph Organograma {
  rankdir=LR;
  compound=true;
  bgcolor="white";
  node [fontname="Helvetica", style=filled, fontsize=10];
  edge [color="#666666", arrowsize=0.8];

  subgraph cluster_0 {
    label="Marta";
    style=filled;
    fillcolor="#FF6B6B30";
    color="#FF6B6B";
    penwidth=2;
    "Marta" [shape=ellipse, fillcolor="#FF6B6B", fontcolor="white", fontsize=12, penwidth=2];
    "Joao" [shape=box, fillcolor="#FFE66D", style="filled,rounded", penwidth=1.5];
    "Marta" -> "Joao" [style=bold, color="#FF6B6B"];
    "Ana" [shape=box, fillcolor="#A8E6CF", label="Ana\n(Pedreiro)", style="filled,rounded"];
    "Joao" -> "Ana" [color="#666666"];
  }

}
"##;
        assert_eq!(dot, expected);
        assert_well_formed(&dot);
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = ChartConfig {
            layout: LayoutDirection::TopToBottom,
            lead_color: Some("#123456".to_string()),
            person_color: None,
        };
        let first = render(&sample(), &config);
        let second = render(&sample(), &config);
        assert_eq!(first, second);
        assert!(first.contains("rankdir=TB;"));
        assert!(first.contains("fillcolor=\"#123456\""));
        assert!(!first.contains(DEFAULT_LEAD_COLOR));
    }

    #[test]
    fn escapes_labels() {
        assert_eq!(escape_label("Ana \"Nina\""), "Ana \\\"Nina\\\"");
        assert_eq!(escape_label("a\nb"), "a\\nb");
        assert_eq!(escape_label("P&D"), "P&amp;D");
        assert_eq!(escape_label("c:\\"), "c:\\\\");

        let roster = Roster::new(vec![
            record("Ana \"Nina\" Souza", "Pedreira\nChefe", "Jo&ao", "Marta\\"),
        ]);
        let dot = render(&roster, &ChartConfig::default());
        assert!(dot.contains("\"Ana \\\"Nina\\\" Souza\" [shape=box"));
        assert!(dot.contains("label=\"Ana \\\"Nina\\\" Souza\\n(Pedreira\\nChefe)\""));
        assert!(dot.contains("\"Jo&amp;ao\""));
        assert_well_formed(&dot);
    }

    #[test]
    fn palette_cycles_after_seven_supervisors() {
        let records: Vec<Record> = (0..9)
            .map(|i| record(&format!("P{}", i), "Servente", &format!("L{}", i), &format!("S{}", i)))
            .collect();
        let dot = render(&Roster::new(records), &ChartConfig::default());
        assert_eq!(supervisor_color(0), supervisor_color(7));
        assert_eq!(supervisor_color(1), supervisor_color(8));
        assert_ne!(supervisor_color(0), supervisor_color(1));
        assert!(dot.contains(&format!(
            "\"S7\" [shape=ellipse, fillcolor=\"{}\"",
            SUPERVISOR_PALETTE[0]
        )));
        assert!(dot.contains("subgraph cluster_8 {"));
        assert_well_formed(&dot);
    }

    #[test]
    fn same_name_collapses_to_one_node_id() {
        let roster = Roster::new(vec![
            record("Ana", "Pedreiro", "Joao", "Marta"),
            record("Ana", "Servente", "Rita", "Marta"),
        ]);
        let dot = render(&roster, &ChartConfig::default());
        assert!(dot.contains("\"Joao\" -> \"Ana\""));
        assert!(dot.contains("\"Rita\" -> \"Ana\""));
    }
}
