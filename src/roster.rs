use log::{debug, info, warn};

use org_roster::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use text_diff::print_diff;

use crate::args::{Args, Command};
use crate::roster::config_reader::*;
use crate::roster::io_export::*;
use crate::roster::report::*;

pub mod config_reader;
pub mod io_csv;
pub mod io_excel;
pub mod io_export;
pub mod report;

#[derive(Debug, Snafu)]
pub enum RosterError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The spreadsheet {path} has no worksheet or no header row"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error writing file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error writing file {path}"))]
    WritingExcel {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the settings in {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No input file: use --input or set filePath in the settings"))]
    MissingInput {},
    #[snafu(display("Unknown input type {input_type:?} (expected xlsx or csv)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("{source}"))]
    InvalidLayout { source: ParseLayoutError },

    #[snafu(display("{source}"))]
    MissingColumns { source: SchemaError },
    #[snafu(display("{}", EMPTY_TABLE_MESSAGE))]
    EmptyRoster {},
    #[snafu(display("{count} warning(s) found in the roster, use --force to proceed anyway"))]
    RosterWarnings { count: usize },
    #[snafu(display("Nenhum registro para a data {date} (datas: {available})"))]
    UnknownDate { date: String, available: String },
    #[snafu(display("The roster has no readable date"))]
    NoDates {},
    #[snafu(display("É necessário ter pelo menos 2 datas para comparação"))]
    NotEnoughDates {},
    #[snafu(display("Selecione datas diferentes para comparação ({date})"))]
    SameDates { date: String },
    #[snafu(display("The chart differs from the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RosterResult<T> = Result<T, RosterError>;

/// Reads the input and runs it through the import pipeline.
fn load_roster(settings: &Settings) -> RosterResult<Prepared> {
    info!(
        "Attempting to read roster file {:?} ({:?})",
        settings.input_path, settings.input_type
    );
    let table = match settings.input_type {
        InputType::Excel => {
            io_excel::read_excel(&settings.input_path, settings.worksheet.as_deref())?
        }
        InputType::Csv => io_csv::read_csv(&settings.input_path, settings.csv_delimiter)?,
    };
    debug!("load_roster: headers: {:?}", table.headers);
    let prepared = prepare(&table).context(MissingColumnsSnafu {})?;
    info!("mapping: {:?}", prepared.mapping);
    Ok(prepared)
}

/// Stops on an empty roster, and on warnings unless forced.
fn check_report(report: &ValidationReport, force: bool) -> RosterResult<()> {
    for w in report.warnings.iter() {
        warn!("{}", w);
    }
    ensure!(report.can_override(), EmptyRosterSnafu {});
    if !report.valid {
        ensure!(
            force,
            RosterWarningsSnafu {
                count: report.warnings.len()
            }
        );
        warn!("Proceeding despite {} warning(s)", report.warnings.len());
    }
    Ok(())
}

/// Rewrites a date given on the command line in the form used by the roster.
fn canonical_date(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format(DATE_FORMAT).to_string(),
        None => date.trim().to_string(),
    }
}

/// The roster, once the report allows going on with it.
fn checked_roster(prepared: &Prepared, force: bool) -> RosterResult<&Roster> {
    check_report(&prepared.report, force)?;
    Ok(&prepared.roster)
}

fn check_date(roster: &Roster, date: &str) -> RosterResult<()> {
    let dates = roster.dates();
    ensure!(
        dates.iter().any(|d| d == date),
        UnknownDateSnafu {
            date,
            available: dates.join(", "),
        }
    );
    Ok(())
}

fn run_import(prepared: &Prepared, settings: &Settings, out: &Option<String>) -> RosterResult<()> {
    if !prepared.report.warnings.is_empty() {
        println!("⚠️ Avisos encontrados:");
        for w in prepared.report.warnings.iter() {
            println!("- {}", w);
        }
    }
    check_report(&prepared.report, settings.force)?;

    let summary = import_summary_js(prepared);
    println!("{}", to_pretty_json(&summary)?);

    if let Some(path) = out {
        write_table(path, &prepared.roster)?;
        info!("Wrote the cleaned roster to {}", path);
    }
    Ok(())
}

fn run_dates(roster: &Roster) -> RosterResult<()> {
    for d in roster.dates() {
        println!("{}", d);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_chart(
    roster: &Roster,
    settings: &Settings,
    date: &Option<String>,
    filter: &SliceFilter,
    out: &Option<String>,
    export: &Option<Option<String>>,
    reference: &Option<String>,
    show_stats: bool,
) -> RosterResult<()> {
    let date = match date {
        Some(d) => canonical_date(d),
        None => roster.latest_date().context(NoDatesSnafu {})?,
    };
    check_date(roster, &date)?;

    let day = roster.slice(&date);
    if show_stats {
        print_slice_stats(&SliceStats::of(&date, &day));
    }
    let selected = day.filter(filter);
    if selected.is_empty() {
        warn!("Nenhum registro para essa data com os filtros escolhidos");
    }

    let config = settings.chart_config()?;
    let dot = render(&selected, &config);

    let dot_path = out
        .clone()
        .unwrap_or_else(|| export_file_name("organograma", &date, "dot"));
    write_output(&dot_path, &dot)?;
    info!("Wrote the chart of {} to {}", date, dot_path);

    if let Some(export_path) = export {
        let path = export_path
            .clone()
            .unwrap_or_else(|| export_file_name("equipe", &date, "xlsx"));
        write_table(&path, &selected)?;
        info!("Wrote {} rows to {}", selected.len(), path);
    }

    // The reference chart, if provided for comparison
    if let Some(reference_path) = reference {
        let expected = fs::read_to_string(reference_path).context(OpeningFileSnafu {
            path: reference_path.clone(),
        })?;
        if expected != dot {
            warn!("Found differences with the reference chart");
            print_diff(expected.as_str(), dot.as_str(), "\n");
            return ReferenceMismatchSnafu {
                path: reference_path.clone(),
            }
            .fail();
        }
    }
    Ok(())
}

fn run_trends(roster: &Roster, out: &Option<String>) -> RosterResult<()> {
    let js = trends_js(&trends(roster));
    let pretty = to_pretty_json(&js)?;
    write_output(out.as_deref().unwrap_or(STDOUT), &pretty)
}

fn run_compare(
    roster: &Roster,
    from: &Option<String>,
    to: &Option<String>,
    out: &Option<String>,
) -> RosterResult<()> {
    let dates = roster.dates();
    let from = from.as_deref().map(canonical_date);
    let to = to.as_deref().map(canonical_date);
    let (date_a, date_b) = match (from, to) {
        (Some(a), Some(b)) => (a, b),
        (from, to) => {
            ensure!(dates.len() >= 2, NotEnoughDatesSnafu {});
            let n = dates.len();
            (
                from.unwrap_or_else(|| dates[n - 2].clone()),
                to.unwrap_or_else(|| dates[n - 1].clone()),
            )
        }
    };
    ensure!(date_a != date_b, SameDatesSnafu { date: date_a });
    check_date(roster, &date_a)?;
    check_date(roster, &date_b)?;

    let comparison = compare(roster, &date_a, &date_b);
    print_comparison(&comparison);

    if let Some(path) = out {
        let pretty = to_pretty_json(&comparison_js(&comparison))?;
        write_output(path, &pretty)?;
    }
    Ok(())
}

pub fn run(args: &Args) -> RosterResult<()> {
    let settings = Settings::build(args)?;
    info!("settings: {:?}", settings);

    let prepared = load_roster(&settings)?;

    let checked = || checked_roster(&prepared, settings.force);
    match &args.command {
        Command::Import { out } => run_import(&prepared, &settings, out),
        Command::Dates => run_dates(checked()?),
        Command::Chart {
            date,
            supervisor,
            role,
            out,
            export,
            reference,
            no_stats,
            ..
        } => {
            let filter = SliceFilter {
                supervisors: supervisor.clone(),
                roles: role.clone(),
            };
            run_chart(
                checked()?,
                &settings,
                date,
                &filter,
                out,
                export,
                reference,
                !no_stats,
            )
        }
        Command::Trends { out } => run_trends(checked()?, out),
        Command::Compare { from, to, out } => run_compare(checked()?, from, to, out),
    }
}
