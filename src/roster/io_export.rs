// Writers for the charts and the rosters.

use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::roster::*;

/// The output path that means the standard output.
pub const STDOUT: &str = "stdout";

/// Sheet name of the exported rosters.
pub const EXPORT_SHEET_NAME: &str = "Equipe";

/// `equipe_01-02-2024.xlsx` for the date 01/02/2024.
pub fn export_file_name(prefix: &str, date: &str, extension: &str) -> String {
    format!("{}_{}.{}", prefix, date.replace('/', "-"), extension)
}

pub fn write_output(path: &str, content: &str) -> RosterResult<()> {
    if path == STDOUT {
        let mut out = std::io::stdout().lock();
        out.write_all(content.as_bytes())
            .context(WritingOutputSnafu { path })?;
        if !content.ends_with('\n') {
            out.write_all(b"\n").context(WritingOutputSnafu { path })?;
        }
        Ok(())
    } else {
        fs::write(path, content).context(WritingOutputSnafu { path })
    }
}

pub fn write_excel(path: &str, roster: &Roster) -> RosterResult<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(EXPORT_SHEET_NAME)
        .context(WritingExcelSnafu { path })?;

    for (col, header) in roster.columns().iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .context(WritingExcelSnafu { path })?;
    }
    for (idx, record) in roster.records.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, value) in record.values().into_iter().enumerate() {
            if let Some(v) = value {
                sheet
                    .write_string(row, col as u16, v)
                    .context(WritingExcelSnafu { path })?;
            }
        }
    }
    workbook.save(path).context(WritingExcelSnafu { path })?;
    Ok(())
}

pub fn write_csv(path: &str, roster: &Roster) -> RosterResult<()> {
    let mut wtr = csv::Writer::from_path(path).context(CsvWriteSnafu { path })?;
    wtr.write_record(roster.columns())
        .context(CsvWriteSnafu { path })?;
    for record in roster.records.iter() {
        let values: Vec<&str> = record
            .values()
            .into_iter()
            .map(|v| v.unwrap_or(""))
            .collect();
        wtr.write_record(&values).context(CsvWriteSnafu { path })?;
    }
    wtr.flush().context(WritingOutputSnafu { path })?;
    Ok(())
}

/// Writes a roster as csv or xlsx depending on the extension of the path.
pub fn write_table(path: &str, roster: &Roster) -> RosterResult<()> {
    debug!("write_table: {} rows to {:?}", roster.len(), path);
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => write_csv(path, roster),
        _ => write_excel(path, roster),
    }
}
