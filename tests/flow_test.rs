//! Scenario tests for the row walk, against a recording mock backend.
//!
//! The mock implements the same capability interface the production driver
//! does, so these exercise the real dispatch, transformation and isolation
//! logic without a browser.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use emis_form_filler::config::Config;
use emis_form_filler::error::DriverError;
use emis_form_filler::infrastructure::PortalPage;
use emis_form_filler::models::{CellValue, EnrollmentRow};
use emis_form_filler::orchestrator::{login, run_batch};
use emis_form_filler::services::ErrorLog;
use emis_form_filler::workflow::{locators, EnrollmentFlow, ProcessResult, RowCtx};
use tokio::time::Duration;

/// Everything the flow asked the page to do, in order.
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Goto(String),
    Reload,
    Click(String),
    Fill(String, String),
    Select(String, String),
    Upload(String, String),
    OpenRow(String, usize),
}

#[derive(Default)]
struct MockPage {
    ops: Mutex<Vec<Op>>,
    /// Select controls whose options never appear.
    missing_options: Vec<String>,
    /// Locators whose inputs cannot be written.
    broken_inputs: Vec<String>,
    /// What the GR column shows in the list view.
    list_cells: Vec<String>,
}

impl MockPage {
    fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    fn push(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }
}

impl PortalPage for MockPage {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.push(Op::Goto(url.to_string()));
        Ok(())
    }

    async fn reload(&self) -> Result<(), DriverError> {
        self.push(Op::Reload);
        Ok(())
    }

    async fn click(&self, xpath: &str) -> Result<(), DriverError> {
        self.push(Op::Click(xpath.to_string()));
        Ok(())
    }

    async fn fill(&self, xpath: &str, value: &str) -> Result<(), DriverError> {
        if self.broken_inputs.iter().any(|l| l == xpath) {
            return Err(DriverError::NotFound { locator: xpath.to_string() });
        }
        self.push(Op::Fill(xpath.to_string(), value.to_string()));
        Ok(())
    }

    async fn select_option(&self, control_id: &str, label: &str) -> Result<(), DriverError> {
        if self.missing_options.iter().any(|c| c == control_id) {
            return Err(DriverError::Timeout {
                what: format!("option '{}' under #{}", label, control_id),
                waited_ms: 2000,
            });
        }
        self.push(Op::Select(control_id.to_string(), label.to_string()));
        Ok(())
    }

    async fn upload_file(&self, selector: &str, path: &Path) -> Result<(), DriverError> {
        self.push(Op::Upload(selector.to_string(), path.display().to_string()));
        Ok(())
    }

    async fn column_texts(&self, _selector: &str) -> Result<Vec<String>, DriverError> {
        Ok(self.list_cells.clone())
    }

    async fn open_row_action(&self, selector: &str, index: usize) -> Result<(), DriverError> {
        self.push(Op::OpenRow(selector.to_string(), index));
        Ok(())
    }

    async fn settle(&self, _wait: Duration) {}
}

// ---- fixtures ----

fn temp_log(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("emis-flow-test-{}-{}.txt", name, std::process::id()))
        .display()
        .to_string()
}

fn read_log_lines(path: &str) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn test_config() -> Config {
    Config {
        username: "school42".to_string(),
        password: "secret".to_string(),
        // nothing uploads unless a test creates the file
        photo_dir: std::env::temp_dir().join("emis-flow-test-no-photos").display().to_string(),
        ..Config::default()
    }
}

fn cell(text: &str) -> CellValue {
    CellValue::Text(text.to_string())
}

/// A complete, plausible New Admission row, GR NO 1001.
fn new_admission_row() -> EnrollmentRow {
    let mut cells = HashMap::new();
    cells.insert("GR NO".to_string(), CellValue::Number(1001.0));
    cells.insert("Admission Type".to_string(), cell("New Admission"));
    cells.insert("Admission Date".to_string(), cell("2015-09-01"));
    cells.insert("Class Admitted".to_string(), cell("VI"));
    cells.insert("Current Class".to_string(), cell("VI"));
    cells.insert("Select Section".to_string(), cell("A"));
    cells.insert("Medium".to_string(), cell("Sindhi"));
    cells.insert("Shift".to_string(), cell("Morning"));
    cells.insert("Students Name".to_string(), cell("Ayesha"));
    cells.insert("Student Surname".to_string(), cell("Khan"));
    cells.insert("B-FORM".to_string(), CellValue::Number(4230112345671.0));
    cells.insert("Date Of Birth".to_string(), cell("2009-03-14"));
    cells.insert("Gender".to_string(), cell("Female"));
    cells.insert("Religion".to_string(), cell("Islam"));
    cells.insert("Disability".to_string(), cell("No"));
    // Blood Group intentionally absent
    cells.insert("Mother Tongue".to_string(), cell("Sindhi"));
    cells.insert("Emergency Contact Name".to_string(), cell("Bilal Khan"));
    cells.insert("Emergency Contact Number".to_string(), CellValue::Number(3001234567.0));
    cells.insert("Region".to_string(), cell("Mirpurkhas"));
    cells.insert("District".to_string(), cell("Mirpurkhas"));
    cells.insert("Taluka".to_string(), cell("Digri"));
    cells.insert("Union Coucil".to_string(), cell("UC-3"));
    cells.insert("Cily/Village/Area".to_string(), cell("Goth Haji Ali"));
    cells.insert("Address".to_string(), cell("House 12, Goth Haji Ali"));
    cells.insert("Salutaion".to_string(), cell("Mr"));
    cells.insert("Name".to_string(), cell("Bilal"));
    cells.insert("Surname".to_string(), cell("Khan"));
    cells.insert("CNIC".to_string(), CellValue::Number(4130212345678.0));
    // Mobile No intentionally absent
    cells.insert("Qualification".to_string(), cell("Matric"));
    cells.insert("Occupation".to_string(), cell("Farmer"));
    EnrollmentRow::new(2, cells)
}

fn row_of_type(row_number: usize, admission_type: &str, gr_no: f64) -> EnrollmentRow {
    let mut cells = HashMap::new();
    cells.insert("GR NO".to_string(), CellValue::Number(gr_no));
    cells.insert("Admission Type".to_string(), cell(admission_type));
    EnrollmentRow::new(row_number, cells)
}

// ---- scenarios ----

#[tokio::test]
async fn two_row_batch_fills_the_first_and_ignores_the_dropout() {
    let log_path = temp_log("two-row");
    let _ = std::fs::remove_file(&log_path);
    let log = ErrorLog::new(&log_path);
    let config = test_config();
    let flow = EnrollmentFlow::new(&config, &log);

    let rows = vec![new_admission_row(), row_of_type(3, "Dropout", 1002.0)];

    let page = MockPage::default();
    let stats = run_batch(&page, &flow, &log, &rows).await;

    assert_eq!(stats.completed, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.total, 2);

    let ops = page.ops();

    // The transformed values land on the right controls.
    assert!(ops.contains(&Op::Select(locators::RELIGION_SELECT.to_string(), "Muslim".to_string())));
    assert!(ops.contains(&Op::Select(locators::BLOOD_GROUP_SELECT.to_string(), "N/A".to_string())));
    assert!(ops.contains(&Op::Select(locators::DISABILITY_SELECT.to_string(), "NO".to_string())));
    assert!(ops.contains(&Op::Select(locators::QUALIFICATION_SELECT.to_string(), "Matriculation".to_string())));
    assert!(ops.contains(&Op::Fill(locators::B_FORM_INPUT.to_string(), "4230112345671".to_string())));
    assert!(ops.contains(&Op::Fill(locators::ADMISSION_DATE_INPUT.to_string(), "09/01/2015".to_string())));

    // The absent Mobile No cell produces no write at all.
    assert!(!ops.iter().any(|op| matches!(op, Op::Fill(xpath, _) if xpath == locators::FATHER_MOBILE_INPUT)));

    // The Dropout row adds nothing: the batch's operations are exactly the
    // first row's operations.
    let lone = MockPage::default();
    let ctx = RowCtx::new("1001".to_string(), 2);
    flow.new_admission(&lone, &new_admission_row(), &ctx).await.unwrap();
    assert_eq!(ops.len(), lone.ops().len());

    // No fatal errors, and the clean first row wrote no records either.
    assert!(read_log_lines(&log_path).is_empty());

    let _ = std::fs::remove_file(&log_path);
}

#[tokio::test]
async fn a_missing_dropdown_option_is_one_record_and_the_walk_continues() {
    let log_path = temp_log("missing-option");
    let _ = std::fs::remove_file(&log_path);
    let log = ErrorLog::new(&log_path);
    let config = test_config();
    let flow = EnrollmentFlow::new(&config, &log);

    let page = MockPage {
        missing_options: vec![locators::GENDER_SELECT.to_string()],
        ..MockPage::default()
    };
    let ctx = RowCtx::new("1001".to_string(), 2);
    let result = flow.new_admission(&page, &new_admission_row(), &ctx).await.unwrap();
    assert_eq!(result, ProcessResult::Completed);

    let lines = read_log_lines(&log_path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("[E004]"));
    assert!(lines[0].contains("Gender"));
    assert!(lines[0].contains("(GR NO: 1001)"));

    // Fields after the failed one were still attempted.
    let ops = page.ops();
    assert!(ops.contains(&Op::Select(locators::RELIGION_SELECT.to_string(), "Muslim".to_string())));
    assert!(ops.contains(&Op::Select(locators::QUALIFICATION_SELECT.to_string(), "Matriculation".to_string())));

    let _ = std::fs::remove_file(&log_path);
}

#[tokio::test]
async fn an_unparseable_date_is_recorded_and_not_written() {
    let log_path = temp_log("bad-date");
    let _ = std::fs::remove_file(&log_path);
    let log = ErrorLog::new(&log_path);
    let config = test_config();
    let flow = EnrollmentFlow::new(&config, &log);

    let mut cells = HashMap::new();
    cells.insert("GR NO".to_string(), CellValue::Number(1001.0));
    cells.insert("Admission Type".to_string(), cell("New Admission"));
    cells.insert("Admission Date".to_string(), cell("first of Ramadan"));
    let row = EnrollmentRow::new(2, cells);

    let page = MockPage::default();
    let ctx = RowCtx::new("1001".to_string(), 2);
    flow.new_admission(&page, &row, &ctx).await.unwrap();

    let lines = read_log_lines(&log_path);
    assert!(lines.iter().any(|l| l.contains("[E006]") && l.contains("Admission Date")));
    assert!(!page
        .ops()
        .iter()
        .any(|op| matches!(op, Op::Fill(xpath, _) if xpath == locators::ADMISSION_DATE_INPUT)));

    let _ = std::fs::remove_file(&log_path);
}

#[tokio::test]
async fn rejected_login_is_one_fatal_record_and_nothing_else_runs() {
    let log_path = temp_log("login");
    let _ = std::fs::remove_file(&log_path);
    let log = ErrorLog::new(&log_path);
    let config = test_config();

    let page = MockPage {
        broken_inputs: vec![locators::SIGNIN_USERNAME_INPUT.to_string()],
        ..MockPage::default()
    };

    let result = login(&page, &config, &log).await;
    assert!(result.is_err());

    let lines = read_log_lines(&log_path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("[E001]"));

    // Only the navigation happened; no form writes, no row processing.
    assert_eq!(page.ops(), vec![Op::Goto(config.portal_url.clone())]);

    let _ = std::fs::remove_file(&log_path);
}

#[test]
fn stub_admission_types_touch_no_form_fields() {
    tokio_test::block_on(async {
        let log_path = temp_log("stubs");
        let _ = std::fs::remove_file(&log_path);
        let log = ErrorLog::new(&log_path);
        let config = test_config();
        let flow = EnrollmentFlow::new(&config, &log);

        let rows = vec![
            row_of_type(2, "Retained", 2001.0),
            row_of_type(3, "Passout", 2002.0),
            row_of_type(4, "Dropout", 2003.0),
            row_of_type(5, "TC", 2004.0),
        ];

        let page = MockPage::default();
        let stats = run_batch(&page, &flow, &log, &rows).await;

        assert_eq!(stats.skipped, 4);
        assert_eq!(stats.completed, 0);
        assert!(page.ops().is_empty());
        assert!(read_log_lines(&log_path).is_empty());

        let _ = std::fs::remove_file(&log_path);
    });
}

#[test]
fn an_unrecognized_admission_tag_is_reported_not_dropped() {
    tokio_test::block_on(async {
        let log_path = temp_log("unknown-tag");
        let _ = std::fs::remove_file(&log_path);
        let log = ErrorLog::new(&log_path);
        let config = test_config();
        let flow = EnrollmentFlow::new(&config, &log);

        let rows = vec![row_of_type(2, "Transferred", 3001.0)];

        let page = MockPage::default();
        let stats = run_batch(&page, &flow, &log, &rows).await;

        assert_eq!(stats.skipped, 1);
        assert!(page.ops().is_empty());

        let lines = read_log_lines(&log_path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[E999]"));
        assert!(lines[0].contains("Transferred"));
        assert!(lines[0].contains("(GR NO: 3001)"));

        let _ = std::fs::remove_file(&log_path);
    });
}

#[tokio::test]
async fn promoted_opens_the_exactly_matching_list_row() {
    let log_path = temp_log("promoted");
    let _ = std::fs::remove_file(&log_path);
    let log = ErrorLog::new(&log_path);
    let config = test_config();
    let flow = EnrollmentFlow::new(&config, &log);

    let page = MockPage {
        // "100" must not match GR NO 1001; the padded exact cell must.
        list_cells: vec!["100".to_string(), " 1001 ".to_string(), "10011".to_string()],
        ..MockPage::default()
    };
    let ctx = RowCtx::new("1001".to_string(), 2);
    let result = flow.promoted(&page, &ctx).await.unwrap();
    assert_eq!(result, ProcessResult::Completed);

    let ops = page.ops();
    assert!(ops.contains(&Op::Fill(locators::LIST_SEARCH_INPUT.to_string(), "1001".to_string())));
    assert!(ops.contains(&Op::OpenRow(locators::LIST_GR_CELL.to_string(), 1)));
    assert!(read_log_lines(&log_path).is_empty());

    let _ = std::fs::remove_file(&log_path);
}
