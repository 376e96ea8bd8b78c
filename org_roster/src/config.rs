// ********* Canonical schema ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The five semantic columns that every usable roster must expose.
///
/// The declaration order is also the order in which the resolver tries the
/// fields, which matters when one header could satisfy several of them.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Field {
    Date,
    Name,
    Role,
    /// The direct lead of a person ("encarregado").
    Lead,
    /// The manager owning a set of leads.
    Supervisor,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Date,
        Field::Name,
        Field::Role,
        Field::Lead,
        Field::Supervisor,
    ];

    /// The fields that may not be left blank.
    pub const REQUIRED_VALUES: [Field; 4] = [Field::Name, Field::Role, Field::Lead, Field::Supervisor];

    /// The name of the column once the roster has been renamed.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Date => "data",
            Field::Name => "nome",
            Field::Role => "funcao",
            Field::Lead => "encarregado",
            Field::Supervisor => "supervisor",
        }
    }

    /// Accepted header prefixes, already lowercased and without accents.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Field::Date => &["data", "date", "dt", "dia"],
            Field::Name => &["nome", "name", "funcionario", "pessoa"],
            Field::Role => &["funcao", "cargo", "position", "role"],
            Field::Lead => &[
                "encarregado",
                "responsavel",
                "lider",
                "leader",
                "supervisor_direto",
            ],
            Field::Supervisor => &["supervisor", "gestor", "coordenador", "manager", "chefe"],
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// Raised when the headers of a table do not cover all the canonical fields.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SchemaError {
    MissingFields(Vec<Field>),
}

impl Error for SchemaError {}

impl Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::MissingFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.column_name()).collect();
                write!(f, "Colunas não encontradas: {}", names.join(", "))
            }
        }
    }
}

// ********* Chart configuration **********

/// Colors cycled through for the supervisors, by order of first appearance.
pub const SUPERVISOR_PALETTE: [&str; 7] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8CA",
];

pub const DEFAULT_LEAD_COLOR: &str = "#FFE66D";
pub const DEFAULT_PERSON_COLOR: &str = "#A8E6CF";

/// The direction in which the edges of the organogram flow.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum LayoutDirection {
    LeftToRight,
    TopToBottom,
    RightToLeft,
    BottomToTop,
}

impl LayoutDirection {
    /// The value of the `rankdir` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutDirection::LeftToRight => "LR",
            LayoutDirection::TopToBottom => "TB",
            LayoutDirection::RightToLeft => "RL",
            LayoutDirection::BottomToTop => "BT",
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParseLayoutError(pub String);

impl Error for ParseLayoutError {}

impl Display for ParseLayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown layout direction {:?} (expected LR, TB, RL or BT)",
            self.0
        )
    }
}

impl FromStr for LayoutDirection {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LR" => Ok(LayoutDirection::LeftToRight),
            "TB" => Ok(LayoutDirection::TopToBottom),
            "RL" => Ok(LayoutDirection::RightToLeft),
            "BT" => Ok(LayoutDirection::BottomToTop),
            _ => Err(ParseLayoutError(s.to_string())),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChartConfig {
    pub layout: LayoutDirection,
    pub lead_color: Option<String>,
    pub person_color: Option<String>,
}

impl ChartConfig {
    pub const DEFAULT_CONFIG: ChartConfig = ChartConfig {
        layout: LayoutDirection::LeftToRight,
        lead_color: None,
        person_color: None,
    };

    pub fn lead_color(&self) -> &str {
        self.lead_color.as_deref().unwrap_or(DEFAULT_LEAD_COLOR)
    }

    pub fn person_color(&self) -> &str {
        self.person_color.as_deref().unwrap_or(DEFAULT_PERSON_COLOR)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig::DEFAULT_CONFIG
    }
}
