use crate::args::Args;
use crate::roster::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The optional JSON settings file.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Relative paths are resolved from the directory of the settings file.
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "csvDelimiter")]
    pub csv_delimiter: Option<char>,
    pub layout: Option<String>,
    #[serde(rename = "leadColor")]
    pub lead_color: Option<String>,
    #[serde(rename = "personColor")]
    pub person_color: Option<String>,
    #[serde(rename = "proceedWithWarnings")]
    pub proceed_with_warnings: Option<bool>,
}

pub fn read_config(path: &str) -> RosterResult<RosterConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: RosterConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Excel,
    Csv,
}

impl InputType {
    fn parse(s: &str) -> RosterResult<InputType> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(InputType::Excel),
            "csv" => Ok(InputType::Csv),
            _ => UnknownInputTypeSnafu { input_type: s }.fail(),
        }
    }

    fn from_extension(path: &str) -> InputType {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputType::Csv,
            _ => InputType::Excel,
        }
    }
}

/// The command line options merged with the settings file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub input_path: String,
    pub input_type: InputType,
    pub worksheet: Option<String>,
    pub csv_delimiter: u8,
    pub force: bool,
    pub layout: Option<String>,
    pub lead_color: Option<String>,
    pub person_color: Option<String>,
}

impl Settings {
    pub fn build(args: &Args) -> RosterResult<Settings> {
        let (config, config_dir) = match &args.config {
            Some(path) => {
                info!("Reading settings from {:?}", path);
                let config = read_config(path)?;
                let dir = Path::new(path).parent().map(Path::to_path_buf);
                (config, dir)
            }
            None => (RosterConfig::default(), None),
        };
        Settings::merge(args, config, config_dir)
    }

    fn merge(args: &Args, config: RosterConfig, config_dir: Option<PathBuf>) -> RosterResult<Settings> {
        let input_path = match (&args.input, &config.file_path) {
            (Some(p), _) => p.clone(),
            (None, Some(p)) => match config_dir {
                Some(dir) => dir.join(p).display().to_string(),
                None => p.clone(),
            },
            (None, None) => return MissingInputSnafu {}.fail(),
        };
        let input_type = match args.input_type.as_ref().or(config.input_type.as_ref()) {
            Some(t) => InputType::parse(t)?,
            None => InputType::from_extension(&input_path),
        };
        let csv_delimiter = match config.csv_delimiter {
            Some(c) if c.is_ascii() => c as u8,
            Some(c) => whatever!("The csv delimiter must be an ASCII character, got {:?}", c),
            None => b',',
        };

        let layout = match &args.command {
            Command::Chart { layout: Some(l), .. } => Some(l.clone()),
            _ => config.layout,
        };
        let (lead_color, person_color) = match &args.command {
            Command::Chart {
                lead_color,
                person_color,
                ..
            } => (
                lead_color.clone().or(config.lead_color),
                person_color.clone().or(config.person_color),
            ),
            _ => (config.lead_color, config.person_color),
        };

        Ok(Settings {
            input_path,
            input_type,
            worksheet: args
                .excel_worksheet_name
                .clone()
                .or(config.excel_worksheet_name),
            csv_delimiter,
            force: args.force || config.proceed_with_warnings.unwrap_or(false),
            layout,
            lead_color,
            person_color,
        })
    }

    pub fn chart_config(&self) -> RosterResult<ChartConfig> {
        let layout = match &self.layout {
            Some(l) => l
                .parse::<LayoutDirection>()
                .context(InvalidLayoutSnafu {})?,
            None => LayoutDirection::LeftToRight,
        };
        Ok(ChartConfig {
            layout,
            lead_color: self.lead_color.clone(),
            person_color: self.person_color.clone(),
        })
    }
}
