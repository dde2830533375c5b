//! Spreadsheet loader.
//!
//! Reads the first worksheet, trims column headers, checks the template
//! columns are present and materializes every data row up front. Row order
//! is spreadsheet order and is preserved.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::models::row::{CellValue, EnrollmentRow};

/// The columns of the distribution template. Presence is checked at load;
/// cell contents are not validated beyond that.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "GR NO",
    "Admission Type",
    "Admission Date",
    "Class Admitted",
    "Current Class",
    "Select Section",
    "Medium",
    "Shift",
    "Students Name",
    "Student Surname",
    "B-FORM",
    "Date Of Birth",
    "Gender",
    "Religion",
    "Disability",
    "Blood Group",
    "Mother Tongue",
    "Emergency Contact Name",
    "Emergency Contact Number",
    "Region",
    "District",
    "Taluka",
    "Union Coucil",
    "Cily/Village/Area",
    "Address",
    "Salutaion",
    "Name",
    "Surname",
    "CNIC",
    "Mobile No",
    "Qualification",
    "Occupation",
];

/// Load every enrollment row from the spreadsheet at `path`.
pub fn load_enrollment_rows(path: &str) -> Result<Vec<EnrollmentRow>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("failed to open spreadsheet: {}", path))?;

    let range = workbook
        .worksheet_range_at(0)
        .with_context(|| format!("no worksheet in {}", path))?
        .with_context(|| format!("failed to read the first worksheet of {}", path))?;

    let mut raw_rows = range.rows();
    let header_row = raw_rows.next().with_context(|| format!("{} is empty", path))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| {
            cell.as_string()
                .unwrap_or_else(|| format!("{}", cell))
                .trim()
                .to_string()
        })
        .collect();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            bail!("{} is missing the required column '{}'", path, required);
        }
    }

    let mut rows = Vec::new();
    for (index, raw) in raw_rows.enumerate() {
        let mut cells = HashMap::new();
        for (col, cell) in raw.iter().enumerate() {
            match headers.get(col) {
                Some(name) if !name.is_empty() => {
                    cells.insert(name.clone(), convert_cell(cell));
                }
                _ => {}
            }
        }
        // Trailing blank rows are a spreadsheet artifact, not records.
        if cells.values().all(CellValue::is_empty) {
            continue;
        }
        // +2: 1-based numbering with the header on row 1.
        rows.push(EnrollmentRow::new(index + 2, cells));
    }

    info!("✓ loaded {} rows from {}", rows.len(), path);
    Ok(rows)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::Date(naive.date()),
            None => CellValue::Empty,
        },
        Data::DateTimeIso(s) => parse_iso_date(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}
