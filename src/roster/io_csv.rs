// Primitives for reading CSV files.

use crate::roster::*;

fn read_field(s: &str) -> Cell {
    if s.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(s.to_string())
    }
}

/// Reads the first line as the headers. All the values are read as text.
pub fn read_csv(path: &str, delimiter: u8) -> RosterResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let headers: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { path, lineno: 1usize })?
        .iter()
        // Spreadsheet exports often start with a byte order mark.
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    debug!("read_csv: header: {:?}", headers);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        if line.iter().all(|s| s.trim().is_empty()) {
            debug!("read_csv: skipping blank line {}", lineno);
            continue;
        }
        rows.push(line.iter().map(read_field).collect());
    }
    info!("read_csv: {} rows in {}", rows.len(), path);
    Ok(RawTable { headers, rows })
}
