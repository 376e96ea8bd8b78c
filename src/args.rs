use clap::{Parser, Subcommand};

/// Turns the daily team spreadsheets into organograms, comparisons and trends.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the settings (input file, worksheet, chart colors, ...).
    /// The options given on the command line override the settings in this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The spreadsheet with the roster. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx or csv, default inferred from the file extension) The type of the input.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// If passed as an argument, the commands go on even if the roster has warnings
    /// (blank values, duplicated rows). An empty roster is always rejected.
    #[clap(long, takes_value = false)]
    pub force: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Reads, cleans and checks the roster, and prints a summary.
    Import {
        /// (file path, optional) Writes the cleaned roster to this file (.xlsx or .csv).
        #[clap(short, long, value_parser)]
        out: Option<String>,
    },
    /// Lists the dates of the roster, oldest first.
    Dates,
    /// Renders the organogram of one date in the DOT format.
    Chart {
        /// (DD/MM/YYYY, default the most recent date) The date to draw.
        #[clap(short, long, value_parser)]
        date: Option<String>,

        /// (LR, TB, RL or BT, default LR) The direction of the chart.
        #[clap(long, value_parser)]
        layout: Option<String>,

        /// (color, default #FFE66D) The fill color of the leads.
        #[clap(long, value_parser)]
        lead_color: Option<String>,

        /// (color, default #A8E6CF) The fill color of the persons.
        #[clap(long, value_parser)]
        person_color: Option<String>,

        /// (repeatable) Only keeps the teams of these supervisors.
        #[clap(long, value_parser)]
        supervisor: Vec<String>,

        /// (repeatable) Only keeps the persons with these roles.
        #[clap(long, value_parser)]
        role: Vec<String>,

        /// (file path or 'stdout', default organograma_<date>.dot) Where to write the chart.
        #[clap(short, long, value_parser)]
        out: Option<String>,

        /// (file path, optional) Also writes the rows of the chart to a spreadsheet.
        /// Without a value, the file is named equipe_<date>.xlsx.
        #[clap(long, value_parser)]
        export: Option<Option<String>>,

        /// (file path) A reference chart. If provided, the command fails when the rendered chart differs.
        #[clap(short, long, value_parser)]
        reference: Option<String>,

        /// If passed as an argument, the statistics of the date are not printed.
        #[clap(long, takes_value = false)]
        no_stats: bool,
    },
    /// Computes the evolution of the teams over time and the distributions by role and supervisor.
    Trends {
        /// (file path or 'stdout', default stdout) Where to write the JSON summary.
        #[clap(short, long, value_parser)]
        out: Option<String>,
    },
    /// Compares two dates: team sizes, departures and arrivals.
    Compare {
        /// (DD/MM/YYYY, default the second most recent date) The first date.
        #[clap(long, value_parser)]
        from: Option<String>,

        /// (DD/MM/YYYY, default the most recent date) The second date.
        #[clap(long, value_parser)]
        to: Option<String>,

        /// (file path or 'stdout', optional) Also writes the comparison in JSON format.
        #[clap(short, long, value_parser)]
        out: Option<String>,
    },
}
