//! Enrollment form walk - workflow layer.
//!
//! The complete procedure for one spreadsheet row. The central contract is
//! per-field isolation: every field operation is attempted exactly once,
//! a failure becomes one error-log record tagged with the row's GR NO, and
//! the walk moves on to the next field. A bad cell never aborts its row,
//! and a bad row never aborts the batch (that second layer lives in the
//! orchestrator).

use std::path::PathBuf;

use anyhow::{Context, Result};
use regex::Regex;
use tokio::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::error::ErrorCode;
use crate::infrastructure::PortalPage;
use crate::models::{CellValue, EnrollmentRow};
use crate::services::transforms;
use crate::services::ErrorLog;
use crate::workflow::locators;
use crate::workflow::row_ctx::RowCtx;

/// Settle after a sidebar navigation, while the client view renders.
const MENU_SETTLE: Duration = Duration::from_secs(3);
/// Settle before leaving a finished form.
const PRE_RESET_SETTLE: Duration = Duration::from_secs(2);
/// Settle after re-opening the add-student view for the next row.
const POST_RESET_SETTLE: Duration = Duration::from_secs(2);
/// Settle between typing the list filter and firing the search.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(100);
/// Settle while the filtered list re-renders.
const SEARCH_SETTLE: Duration = Duration::from_secs(2);
/// Settle after opening a student record from the list.
const RECORD_OPEN_SETTLE: Duration = Duration::from_secs(5);

/// Outcome of one row's walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// The procedure for this admission type ran to its end.
    Completed,
    /// The admission type has no automated procedure.
    Skipped,
}

enum Section {
    AddStudent,
    StudentList,
}

/// The form walk for one row against one authenticated session.
///
/// Holds no page: the session handle is passed in per call, owned by the
/// orchestrator for the whole run.
pub struct EnrollmentFlow<'a> {
    log: &'a ErrorLog,
    photo_dir: PathBuf,
    submit_on_complete: bool,
}

impl<'a> EnrollmentFlow<'a> {
    pub fn new(config: &Config, log: &'a ErrorLog) -> Self {
        Self {
            log,
            photo_dir: PathBuf::from(&config.photo_dir),
            submit_on_complete: config.submit_on_complete,
        }
    }

    /// The fully automated branch: enter one student record end to end.
    pub async fn new_admission<P: PortalPage>(
        &self,
        page: &P,
        row: &EnrollmentRow,
        ctx: &RowCtx,
    ) -> Result<ProcessResult> {
        info!("[row {}] entering new admission, GR NO {}", ctx.row_number, ctx.gr_no);

        self.navigate_to(page, ctx, Section::AddStudent).await;

        // ---- admission details ----
        self.try_select(page, ctx, locators::ADMISSION_TYPE_SELECT, "New Admission", "Admission Type").await;
        self.try_fill_date(page, ctx, locators::ADMISSION_DATE_INPUT, row.get("Admission Date"), "Admission Date").await;
        self.try_fill_text(page, ctx, locators::GR_NO_INPUT, row.get("GR NO"), "GR NO", true).await;
        self.try_select(page, ctx, locators::CLASS_ADMITTED_SELECT, &row.get("Class Admitted").label(), "Class Admitted").await;
        self.try_select(page, ctx, locators::CURRENT_CLASS_SELECT, &row.get("Current Class").label(), "Current Class").await;
        self.try_select(page, ctx, locators::SECTION_SELECT, &row.get("Select Section").label(), "Select Section").await;
        self.try_select(page, ctx, locators::MEDIUM_SELECT, &row.get("Medium").label(), "Medium").await;
        self.try_select(page, ctx, locators::SHIFT_SELECT, &row.get("Shift").label(), "Shift").await;

        // ---- student details ----
        self.try_fill_text(page, ctx, locators::STUDENT_NAME_INPUT, row.get("Students Name"), "Students Name", false).await;
        self.try_fill_text(page, ctx, locators::STUDENT_SURNAME_INPUT, row.get("Student Surname"), "Student Surname", false).await;
        self.try_fill_text(page, ctx, locators::B_FORM_INPUT, row.get("B-FORM"), "B-FORM", true).await;
        self.try_fill_date(page, ctx, locators::DATE_OF_BIRTH_INPUT, row.get("Date Of Birth"), "Date Of Birth").await;
        self.try_select(page, ctx, locators::GENDER_SELECT, &row.get("Gender").label(), "Gender").await;
        self.try_select(page, ctx, locators::RELIGION_SELECT, &transforms::religion_label(row.get("Religion")), "Religion").await;
        self.try_select(page, ctx, locators::DISABILITY_SELECT, &transforms::disability_label(row.get("Disability")), "Disability").await;
        self.try_select(page, ctx, locators::BLOOD_GROUP_SELECT, &transforms::blood_group_label(row.get("Blood Group")), "Blood Group").await;
        self.try_select(page, ctx, locators::MOTHER_TONGUE_SELECT, &row.get("Mother Tongue").label(), "Mother Tongue").await;
        self.try_fill_text(page, ctx, locators::EMERGENCY_CONTACT_NAME_INPUT, row.get("Emergency Contact Name"), "Emergency Contact Name", false).await;
        self.try_fill_text(page, ctx, locators::EMERGENCY_CONTACT_NUMBER_INPUT, row.get("Emergency Contact Number"), "Emergency Contact Number", true).await;
        self.try_upload_photo(page, ctx).await;

        // ---- location details ----
        self.try_select(page, ctx, locators::REGION_SELECT, &row.get("Region").label(), "Region").await;
        self.try_select(page, ctx, locators::DISTRICT_SELECT, &row.get("District").label(), "District").await;
        self.try_select(page, ctx, locators::TALUKA_SELECT, &row.get("Taluka").label(), "Taluka").await;
        self.try_select(page, ctx, locators::UNION_COUNCIL_SELECT, &row.get("Union Coucil").label(), "Union Coucil").await;
        self.try_fill_text(page, ctx, locators::CITY_VILLAGE_TEXTAREA, row.get("Cily/Village/Area"), "Cily/Village/Area", false).await;
        self.try_fill_text(page, ctx, locators::ADDRESS_TEXTAREA, row.get("Address"), "Address", false).await;

        // ---- guardian details ----
        self.try_select(page, ctx, locators::SALUTATION_SELECT, &row.get("Salutaion").label(), "Salutaion").await;
        self.try_fill_text(page, ctx, locators::FATHER_NAME_INPUT, row.get("Name"), "Father's Name", false).await;
        self.try_fill_text(page, ctx, locators::FATHER_SURNAME_INPUT, row.get("Surname"), "Father's Surname", false).await;
        self.try_fill_text(page, ctx, locators::FATHER_CNIC_INPUT, row.get("CNIC"), "CNIC", true).await;
        self.try_fill_text(page, ctx, locators::FATHER_MOBILE_INPUT, row.get("Mobile No"), "Mobile No", true).await;
        self.try_fill_text(page, ctx, locators::FATHER_OCCUPATION_INPUT, row.get("Occupation"), "Occupation", false).await;
        self.try_select(page, ctx, locators::QUALIFICATION_SELECT, &transforms::qualification_label(row.get("Qualification")), "Qualification").await;

        if self.submit_on_complete {
            if let Err(e) = page.click(locators::SUBMIT_BUTTON).await {
                self.record(ctx, ErrorCode::InputError, format!("Error in Submit: {}", e));
            }
            page.settle(Duration::from_secs(1)).await;
        }

        self.reset_for_next_row(page, ctx).await;

        info!("[row {}] ✓ new admission walk complete", ctx.row_number);
        Ok(ProcessResult::Completed)
    }

    /// The Promoted branch: locate the student record and open it.
    ///
    /// TODO: drive the promotion dialog itself; its locators have not been
    /// captured yet, so this stops after opening the record.
    pub async fn promoted<P: PortalPage>(&self, page: &P, ctx: &RowCtx) -> Result<ProcessResult> {
        info!("[row {}] promoted: locating GR NO {}", ctx.row_number, ctx.gr_no);

        if let Err(e) = self.locate_student(page, ctx).await {
            self.record(
                ctx,
                ErrorCode::InputError,
                format!("Error selecting student with GR NO {}: {}", ctx.gr_no, e),
            );
        }
        page.settle(RECORD_OPEN_SETTLE).await;

        Ok(ProcessResult::Completed)
    }

    // ========== per-field operations ==========

    /// Open a select control and pick the option labelled `label`.
    async fn try_select<P: PortalPage>(
        &self,
        page: &P,
        ctx: &RowCtx,
        control_id: &str,
        label: &str,
        field: &str,
    ) {
        if let Err(e) = page.select_option(control_id, label).await {
            self.record(ctx, ErrorCode::DropdownError, format!("Error in {}: {}", field, e));
        }
    }

    /// Write a text cell; absent cells leave the field untouched.
    async fn try_fill_text<P: PortalPage>(
        &self,
        page: &P,
        ctx: &RowCtx,
        xpath: &str,
        cell: &CellValue,
        field: &str,
        integer_like: bool,
    ) {
        let value = if integer_like {
            match transforms::integer_text(cell) {
                Ok(value) => value,
                Err(e) => {
                    self.record(ctx, ErrorCode::InputError, format!("Error in {}: {}", field, e));
                    return;
                }
            }
        } else {
            transforms::text_value(cell)
        };

        let Some(value) = value else { return };

        if let Err(e) = page.fill(xpath, &value).await {
            self.record(ctx, ErrorCode::InputError, format!("Error in {}: {}", field, e));
        }
    }

    /// Format and write a date cell; absent cells leave the field untouched.
    async fn try_fill_date<P: PortalPage>(
        &self,
        page: &P,
        ctx: &RowCtx,
        xpath: &str,
        cell: &CellValue,
        field: &str,
    ) {
        let formatted = match transforms::format_date(cell) {
            Ok(Some(formatted)) => formatted,
            Ok(None) => return,
            Err(e) => {
                self.record(ctx, ErrorCode::DateFormatError, format!("Error in {}: {}", field, e));
                return;
            }
        };

        if let Err(e) = page.fill(xpath, &formatted).await {
            self.record(ctx, ErrorCode::InputError, format!("Error in {}: {}", field, e));
        }
    }

    /// Attach `<photo_dir>/<GR NO>.jpg` when it exists. A missing photo is
    /// expected for many rows and is not a failure.
    async fn try_upload_photo<P: PortalPage>(&self, page: &P, ctx: &RowCtx) {
        let photo_path = self.photo_dir.join(format!("{}.jpg", ctx.gr_no));
        if !photo_path.exists() {
            info!("[row {}] no photo at {}, skipping upload", ctx.row_number, photo_path.display());
            return;
        }

        if let Err(e) = page.upload_file(locators::PHOTO_UPLOAD_INPUT, &photo_path).await {
            self.record(ctx, ErrorCode::InputError, format!("Error in Photo: {}", e));
        }
    }

    // ========== navigation ==========

    /// Walk the sidebar to a section; a failure is one record, and the
    /// walk carries on like any other field failure.
    async fn navigate_to<P: PortalPage>(&self, page: &P, ctx: &RowCtx, section: Section) {
        if let Err(e) = self.drive_menu(page, section).await {
            self.record(ctx, ErrorCode::NavigationFailed, format!("Error in navigation: {}", e));
        }
    }

    async fn drive_menu<P: PortalPage>(
        &self,
        page: &P,
        section: Section,
    ) -> Result<(), crate::error::DriverError> {
        page.click(locators::SIDEBAR_STUDENTS_MENU).await?;
        match section {
            Section::AddStudent => page.click(locators::SIDEBAR_ADD_STUDENT_ITEM).await?,
            Section::StudentList => page.click(locators::SIDEBAR_STUDENT_LIST_ITEM).await?,
        }
        page.settle(MENU_SETTLE).await;
        Ok(())
    }

    /// Leave the finished form in a known state: bounce off the dashboard,
    /// reload, and re-open the add-student view.
    async fn reset_for_next_row<P: PortalPage>(&self, page: &P, ctx: &RowCtx) {
        page.settle(PRE_RESET_SETTLE).await;

        if let Err(e) = page.click(locators::SIDEBAR_DASHBOARD).await {
            self.record(ctx, ErrorCode::NavigationFailed, format!("Error in navigation: {}", e));
        }
        page.settle(MENU_SETTLE).await;

        if let Err(e) = page.reload().await {
            self.record(ctx, ErrorCode::NavigationFailed, format!("Error in navigation: {}", e));
        }

        if let Err(e) = page.click(locators::SIDEBAR_STUDENTS_MENU).await {
            self.record(ctx, ErrorCode::NavigationFailed, format!("Error in navigation: {}", e));
        }
        if let Err(e) = page.click(locators::SIDEBAR_ADD_STUDENT_ITEM).await {
            self.record(ctx, ErrorCode::NavigationFailed, format!("Error in navigation: {}", e));
        }
        page.settle(POST_RESET_SETTLE).await;
    }

    /// Filter the student list down to the row's GR NO and open the match.
    async fn locate_student<P: PortalPage>(&self, page: &P, ctx: &RowCtx) -> Result<()> {
        self.navigate_to(page, ctx, Section::StudentList).await;

        page.fill(locators::LIST_SEARCH_INPUT, &ctx.gr_no).await?;
        page.settle(SEARCH_DEBOUNCE).await;
        page.click(locators::LIST_SEARCH_BUTTON).await?;
        page.settle(SEARCH_SETTLE).await;

        // Exact match only: GR 100 must not open GR 1001.
        let pattern = Regex::new(&format!(r"^\s*{}\s*$", regex::escape(&ctx.gr_no)))?;
        let cells = page.column_texts(locators::LIST_GR_CELL).await?;
        let index = cells
            .iter()
            .position(|text| pattern.is_match(text))
            .with_context(|| format!("no list row matches GR NO {}", ctx.gr_no))?;

        page.open_row_action(locators::LIST_GR_CELL, index).await?;
        Ok(())
    }

    fn record(&self, ctx: &RowCtx, code: ErrorCode, message: String) {
        self.log.record(code, message, Some(ctx.gr_no.as_str()));
    }
}
