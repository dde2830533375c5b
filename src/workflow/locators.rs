//! The portal's fixed structural locators.
//!
//! These are literal paths into the portal's current markup and break
//! whenever the portal ships a layout change; that brittleness is outside
//! this crate's control. Inputs are addressed by absolute XPath, the
//! material select controls by their generated DOM ids, repeated table
//! cells by CSS.

// ---- sign-in view ----

pub const SIGNIN_USERNAME_INPUT: &str =
    "/html/body/app-root/app-auth-layout/app-signin/div/div/div[2]/div/div/form/div[1]/div/mat-form-field/div/div[1]/div[3]/input";
pub const SIGNIN_PASSWORD_INPUT: &str =
    "/html/body/app-root/app-auth-layout/app-signin/div/div/div[2]/div/div/form/div[2]/div/mat-form-field/div/div[1]/div[3]/input";
pub const SIGNIN_BUTTON: &str =
    "/html/body/app-root/app-auth-layout/app-signin/div/div/div[2]/div/div/form/div[3]/div/button";

// ---- sidebar ----

pub const SIDEBAR_STUDENTS_MENU: &str =
    "//html/body/app-root/app-main-layout/app-sidebar/div/aside/div/ul/li[5]/a";
pub const SIDEBAR_STUDENT_LIST_ITEM: &str =
    "/html/body/app-root/app-main-layout/app-sidebar/div/aside/div/ul/li[5]/ul/li[1]/a";
pub const SIDEBAR_ADD_STUDENT_ITEM: &str =
    "/html/body/app-root/app-main-layout/app-sidebar/div/aside/div/ul/li[5]/ul/li[2]/a";
pub const SIDEBAR_DASHBOARD: &str =
    "/html/body/app-root/app-main-layout/app-sidebar/div/aside/div/ul/li[3]/a";

// ---- add-student form: select controls, by generated id ----

pub const ADMISSION_TYPE_SELECT: &str = "mat-select-0";
pub const CLASS_ADMITTED_SELECT: &str = "mat-select-2";
pub const CURRENT_CLASS_SELECT: &str = "mat-select-4";
pub const SECTION_SELECT: &str = "mat-select-6";
pub const MEDIUM_SELECT: &str = "mat-select-8";
pub const SHIFT_SELECT: &str = "mat-select-10";
pub const GENDER_SELECT: &str = "mat-select-12";
pub const RELIGION_SELECT: &str = "mat-select-14";
pub const DISABILITY_SELECT: &str = "mat-select-16";
pub const BLOOD_GROUP_SELECT: &str = "mat-select-18";
pub const MOTHER_TONGUE_SELECT: &str = "mat-select-20";
pub const REGION_SELECT: &str = "mat-select-22";
pub const DISTRICT_SELECT: &str = "mat-select-24";
pub const TALUKA_SELECT: &str = "mat-select-26";
pub const UNION_COUNCIL_SELECT: &str = "mat-select-28";
pub const SALUTATION_SELECT: &str = "mat-select-30";
pub const QUALIFICATION_SELECT: &str = "mat-select-32";

// ---- add-student form: admission details ----

pub const ADMISSION_DATE_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[1]/div/div/div[2]/div/div[2]/div[1]/mat-form-field/div/div[1]/div[3]/input";
pub const GR_NO_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[1]/div/div/div[2]/div/div[2]/div[2]/mat-form-field/div/div[1]/div[3]/input";

// ---- add-student form: student details ----

pub const STUDENT_NAME_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[2]/div/div/div[2]/div[1]/div[1]/mat-form-field/div/div[1]/div[3]/input";
pub const STUDENT_SURNAME_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[2]/div/div/div[2]/div[1]/div[2]/mat-form-field/div/div[1]/div[3]/input";
pub const B_FORM_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[2]/div/div/div[2]/div[1]/div[3]/mat-form-field/div/div[1]/div[3]/input";
pub const DATE_OF_BIRTH_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[2]/div/div/div[2]/div[1]/div[4]/mat-form-field/div/div[1]/div[3]/input";
pub const EMERGENCY_CONTACT_NAME_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[2]/div/div/div[2]/div[1]/div[10]/mat-form-field/div/div[1]/div[3]/input";
pub const EMERGENCY_CONTACT_NUMBER_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[2]/div/div/div[2]/div[1]/div[11]/mat-form-field/div/div[1]/div[3]/input";

/// The photo upload control, scoped by component rather than by absolute
/// path because the file input has to be resolved to a DOM node for the
/// attach command.
pub const PHOTO_UPLOAD_INPUT: &str = "app-add-student app-file-upload input";

// ---- add-student form: location details ----

pub const CITY_VILLAGE_TEXTAREA: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[3]/div/div/div[2]/div[2]/div[1]/mat-form-field/div/div[1]/div[3]/textarea";
// TODO: the portal renders separate controls for City/Village/Area and
// Address, but the captured path for the address textarea is the same node
// as the city one, so the second write overwrites the first. Needs the real
// address locator lifted from the portal markup.
pub const ADDRESS_TEXTAREA: &str = CITY_VILLAGE_TEXTAREA;

// ---- add-student form: guardian details ----

pub const FATHER_NAME_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[5]/div/div/div[2]/div/div[1]/div[2]/mat-form-field/div/div[1]/div[3]/input";
pub const FATHER_SURNAME_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[5]/div/div/div[2]/div/div[2]/div[1]/mat-form-field/div/div[1]/div[3]/input";
pub const FATHER_CNIC_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[5]/div/div/div[2]/div/div[2]/div[2]/mat-form-field/div/div[1]/div[3]/input";
pub const FATHER_MOBILE_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[5]/div/div/div[2]/div/div[3]/div[2]/mat-form-field/div/div[1]/div[3]/input";
pub const FATHER_OCCUPATION_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/div[5]/div/div/div[2]/div/div[4]/div[2]/mat-form-field/div/div[1]/div[3]/input";

// ---- add-student form: footer ----

pub const SUBMIT_BUTTON: &str =
    "/html/body/app-root/app-main-layout/div/app-add-student/section/div/div[2]/div/div/div[2]/form/footer/div/div/button[1]";

// ---- student list view ----

pub const LIST_SEARCH_INPUT: &str =
    "/html/body/app-root/app-main-layout/div/app-all-students/section/div/div[2]/div/div/div/div/div/div/div[1]/div/div[1]/ul/li[2]/input";
pub const LIST_SEARCH_BUTTON: &str =
    "/html/body/app-root/app-main-layout/div/app-all-students/section/div/div[2]/div/div/div/div/div/div/div[1]/div/div[1]/ul/li[3]/div/button";
pub const LIST_GR_CELL: &str = "mat-cell.cdk-column-grNo";
