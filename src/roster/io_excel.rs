// Primitives for reading Excel files.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use chrono::{Duration, NaiveDate};

use crate::roster::*;

// Day zero of the spreadsheet date serials (1900 date system).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    // Beyond 31/12/9999 the serial is not a date.
    if !(0.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_signed(Duration::days(serial.floor() as i64))
}

pub fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Int(i) => Cell::Int(*i),
        DataType::Float(f) => Cell::Float(*f),
        DataType::Bool(b) => Cell::Bool(*b),
        DataType::DateTime(serial) => match excel_serial_to_date(*serial) {
            Some(d) => Cell::Date(d),
            None => Cell::Float(*serial),
        },
        DataType::Empty => Cell::Empty,
        _ => {
            warn!("read_cell: could not understand cell {:?}", cell);
            Cell::Empty
        }
    }
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> RosterResult<calamine::Range<DataType>> {
    debug!(
        "read_excel: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet_name {
        let wrange = workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    }
}

/// Reads the first row as the headers and every following row as data.
pub fn read_excel(path: &str, worksheet_name: Option<&str>) -> RosterResult<RawTable> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path })?;
    debug!("read_excel: header: {:?}", header);
    let headers: Vec<String> = header
        .iter()
        .map(|c| read_cell(c).to_text().unwrap_or_default())
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let cells: Vec<Cell> = row.iter().map(read_cell).collect();
        if cells.iter().all(|c| *c == Cell::Empty) {
            debug!("read_excel: skipping blank row {}", idx + 2);
            continue;
        }
        rows.push(cells);
    }
    info!("read_excel: {} rows in {}", rows.len(), path);
    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials_are_converted_to_dates() {
        assert_eq!(
            read_cell(&DataType::DateTime(45323.0)),
            Cell::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
        // The time of the day is dropped.
        assert_eq!(
            read_cell(&DataType::DateTime(45323.75)),
            Cell::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
        assert_eq!(read_cell(&DataType::DateTime(-1.0)), Cell::Float(-1.0));
    }

    #[test]
    fn plain_cells() {
        assert_eq!(
            read_cell(&DataType::String("Ana".to_string())),
            Cell::Text("Ana".to_string())
        );
        assert_eq!(read_cell(&DataType::Float(3.0)), Cell::Float(3.0));
        assert_eq!(read_cell(&DataType::Empty), Cell::Empty);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("org_roster_missing_file.xlsx");
        let res = read_excel(&path.display().to_string(), None);
        assert!(matches!(res, Err(RosterError::OpeningExcel { .. })));
    }
}
