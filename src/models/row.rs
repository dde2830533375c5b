//! One spreadsheet record and its cell values.

use std::collections::HashMap;

use chrono::NaiveDate;

/// A single spreadsheet cell, as loaded.
///
/// Numbers stay numeric here; spreadsheets store integer-like identifiers
/// as floats and the transformer decides how they render per field.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The cell rendered the way the portal displays it, for dropdown
    /// labels. Integer-valued numbers render without the float tail.
    pub fn label(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Date(d) => d.format("%m/%d/%Y").to_string(),
        }
    }
}

/// One enrollment record: trimmed column name → cell value, plus the
/// 1-based spreadsheet row number. Immutable once read.
#[derive(Debug, Clone)]
pub struct EnrollmentRow {
    row_number: usize,
    cells: HashMap<String, CellValue>,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl EnrollmentRow {
    pub fn new(row_number: usize, cells: HashMap<String, CellValue>) -> Self {
        Self { row_number, cells }
    }

    pub fn row_number(&self) -> usize {
        self.row_number
    }

    /// Look a cell up by column name; absent columns read as empty.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }

    /// The row's primary key, used in every log line and portal lookup.
    pub fn gr_no(&self) -> String {
        self.get("GR NO").label()
    }

    /// The raw `Admission Type` tag as typed in the sheet.
    pub fn admission_type_raw(&self) -> String {
        self.get("Admission Type").label()
    }

    pub fn admission_type(&self) -> Option<AdmissionType> {
        AdmissionType::parse(&self.admission_type_raw())
    }
}

/// The tag that routes a row to its procedure.
///
/// Closed set: an unrecognized tag is reported by the caller, never
/// silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionType {
    NewAdmission,
    Promoted,
    Retained,
    Passout,
    Dropout,
    Tc,
}

impl AdmissionType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim() {
            "New Admission" => Some(AdmissionType::NewAdmission),
            "Promoted" => Some(AdmissionType::Promoted),
            "Retained" => Some(AdmissionType::Retained),
            "Passout" => Some(AdmissionType::Passout),
            "Dropout" => Some(AdmissionType::Dropout),
            "TC" => Some(AdmissionType::Tc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionType::NewAdmission => "New Admission",
            AdmissionType::Promoted => "Promoted",
            AdmissionType::Retained => "Retained",
            AdmissionType::Passout => "Passout",
            AdmissionType::Dropout => "Dropout",
            AdmissionType::Tc => "TC",
        }
    }
}
