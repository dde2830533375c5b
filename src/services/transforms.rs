//! Field transformer - services layer.
//!
//! Deterministic, side-effect-free conversion of one cell value into the
//! string a form input expects. Applied exactly once per raw cell; no
//! knowledge of locators or of the row walk.

use chrono::{NaiveDate, NaiveDateTime};
use phf::phf_map;
use thiserror::Error;

use crate::models::CellValue;

/// The portal's date input format.
const DATE_OUTPUT: &str = "%m/%d/%Y";

/// Text layouts accepted for date cells that arrive as strings rather than
/// spreadsheet dates. Month-first is tried first, matching the sheet's
/// locale.
const DATE_INPUTS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Guardian qualifications the portal folds into a single option.
static QUALIFICATION_REMAP: phf::Map<&'static str, &'static str> = phf_map! {
    "Primary" => "Matriculation",
    "Matric" => "Matriculation",
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("'{0}' is not a recognizable date")]
    UnparseableDate(String),
    #[error("'{0}' is not numeric")]
    NonNumeric(String),
}

/// Date cells render as `MM/DD/YYYY`. Empty cells produce no write.
pub fn format_date(cell: &CellValue) -> Result<Option<String>, TransformError> {
    match cell {
        CellValue::Empty => Ok(None),
        CellValue::Date(date) => Ok(Some(date.format(DATE_OUTPUT).to_string())),
        CellValue::Text(s) => match parse_date_text(s) {
            Some(date) => Ok(Some(date.format(DATE_OUTPUT).to_string())),
            None => Err(TransformError::UnparseableDate(s.clone())),
        },
        CellValue::Number(_) => Err(TransformError::UnparseableDate(cell.label())),
    }
}

/// Identifier-like cells (GR NO, B-FORM, CNIC, phone numbers): coerce to
/// integer then to text, so the `.0` tail that spreadsheet float storage
/// introduces never reaches the form. Empty cells produce no write.
pub fn integer_text(cell: &CellValue) -> Result<Option<String>, TransformError> {
    match cell {
        CellValue::Empty => Ok(None),
        CellValue::Number(n) => Ok(Some(format!("{}", n.trunc() as i64))),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            let parsed = trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64));
            match parsed {
                Some(i) => Ok(Some(i.to_string())),
                None => Err(TransformError::NonNumeric(s.clone())),
            }
        }
        CellValue::Date(_) => Err(TransformError::NonNumeric(cell.label())),
    }
}

/// Plain text cells pass through unmodified; empty cells produce no write.
pub fn text_value(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty => None,
        CellValue::Text(s) => Some(s.clone()),
        other => Some(other.label()),
    }
}

/// The portal only distinguishes "Muslim" and "Non Muslim".
pub fn religion_label(cell: &CellValue) -> String {
    if cell.label() == "Islam" {
        "Muslim".to_string()
    } else {
        "Non Muslim".to_string()
    }
}

/// The sheet says "no"/"No"; the portal option is "NO". Anything else is
/// passed through as written.
pub fn disability_label(cell: &CellValue) -> String {
    let label = cell.label();
    if label.eq_ignore_ascii_case("no") {
        "NO".to_string()
    } else {
        label
    }
}

/// Unknown blood groups are entered as the portal's "N/A" option.
pub fn blood_group_label(cell: &CellValue) -> String {
    if cell.is_empty() {
        "N/A".to_string()
    } else {
        cell.label()
    }
}

pub fn qualification_label(cell: &CellValue) -> String {
    let label = cell.label();
    match QUALIFICATION_REMAP.get(label.as_str()) {
        Some(remapped) => remapped.to_string(),
        None => label,
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    for layout in DATE_INPUTS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, layout) {
            return Some(date);
        }
    }
    // Spreadsheet exports sometimes carry a midnight timestamp.
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .ok()
}
