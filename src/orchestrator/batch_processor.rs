//! Batch runner - orchestration layer.
//!
//! ## Responsibilities
//!
//! 1. **Session lifecycle**: reachability preflight, browser acquisition,
//!    login, and closing the session on every exit path
//! 2. **Row loop**: spreadsheet order, one row at a time, row-level
//!    isolation one layer above the workflow's field-level isolation
//! 3. **Fatal boundary**: preflight, login/initial navigation and the
//!    spreadsheet read are the only failures that abort the run
//! 4. **Statistics**: completed / skipped / failed counts and the final
//!    banner

use anyhow::Result;
use chromiumoxide::Browser;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::ErrorCode;
use crate::infrastructure::{PortalDriver, PortalPage};
use crate::models::{load_enrollment_rows, EnrollmentRow};
use crate::orchestrator::row_processor;
use crate::services::ErrorLog;
use crate::workflow::{locators, EnrollmentFlow, ProcessResult, RowCtx};

/// Settle while the sign-in view renders.
const SIGNIN_RENDER_SETTLE: Duration = Duration::from_secs(2);
/// Settle while the portal authenticates and loads the main layout.
const POST_LOGIN_SETTLE: Duration = Duration::from_secs(10);
/// Upper bound on the reachability preflight.
const PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(10);

/// Application main structure: owns the browser session for the run.
pub struct App {
    config: Config,
    error_log: ErrorLog,
    browser: Browser,
    driver: PortalDriver,
    launched: bool,
}

impl App {
    /// Preflight the portal and acquire a browser session.
    pub async fn initialize(config: Config) -> Result<Self> {
        let error_log = ErrorLog::new(&config.error_log_file);

        log_startup(&config);

        preflight(&config, &error_log).await?;

        let (browser, page, launched) = match config.browser_debug_port {
            Some(port) => {
                let (browser, page) = browser::connect_to_browser(port, &config.portal_url).await?;
                (browser, page, false)
            }
            None => {
                let (browser, page) = browser::launch_browser(&config.portal_url, config.headless).await?;
                (browser, page, true)
            }
        };
        let driver = PortalDriver::new(page, Duration::from_millis(config.dropdown_wait_ms));

        Ok(Self { config, error_log, browser, driver, launched })
    }

    /// Log in once, walk every row, close the session. The close happens
    /// on the fatal path too.
    pub async fn run(mut self) -> Result<()> {
        let outcome = self.run_rows().await;
        self.shutdown().await;
        outcome
    }

    async fn run_rows(&self) -> Result<()> {
        login(&self.driver, &self.config, &self.error_log).await?;

        let rows = match load_enrollment_rows(&self.config.excel_file) {
            Ok(rows) => rows,
            Err(e) => {
                self.error_log.record(
                    ErrorCode::ExcelReadError,
                    format!("Error reading {}: {:#}", self.config.excel_file, e),
                    None,
                );
                return Err(e);
            }
        };

        if rows.is_empty() {
            warn!("⚠️ {} has no data rows, nothing to do", self.config.excel_file);
            return Ok(());
        }

        let flow = EnrollmentFlow::new(&self.config, &self.error_log);
        let stats = run_batch(&self.driver, &flow, &self.error_log, &rows).await;

        print_final_stats(&stats, self.error_log.path());
        Ok(())
    }

    /// Close a session we launched; a session we attached to stays with
    /// its operator.
    async fn shutdown(&mut self) {
        if !self.launched {
            info!("leaving the attached browser session open");
            return;
        }
        info!("closing browser session");
        if let Err(e) = self.browser.close().await {
            warn!("browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("browser wait: {}", e);
        }
    }
}

/// Check the portal answers at all before spending a browser launch on it.
async fn preflight(config: &Config, log: &ErrorLog) -> Result<()> {
    let client = reqwest::Client::builder().timeout(PREFLIGHT_TIMEOUT).build()?;
    if let Err(e) = client.get(&config.portal_url).send().await {
        log.record(
            ErrorCode::NetworkError,
            format!("portal unreachable at {}: {}", config.portal_url, e),
            None,
        );
        return Err(e.into());
    }
    debug!("✓ portal reachable at {}", config.portal_url);
    Ok(())
}

/// Sign in once for the whole run. The one fatal-at-top-level condition:
/// a failure here is recorded and aborts before any row is touched.
pub async fn login<P: PortalPage>(page: &P, config: &Config, log: &ErrorLog) -> Result<()> {
    info!("signing in at {}", config.portal_url);

    if let Err(e) = page.goto(&config.portal_url).await {
        log.record(
            ErrorCode::NavigationFailed,
            format!("Error reaching the sign-in page: {}", e),
            None,
        );
        return Err(e.into());
    }
    page.settle(SIGNIN_RENDER_SETTLE).await;

    if let Err(e) = drive_signin_form(page, config).await {
        log.record(ErrorCode::LoginFailed, format!("Error in login: {}", e), None);
        return Err(e.into());
    }
    page.settle(POST_LOGIN_SETTLE).await;

    info!("✓ signed in as {}", config.username);
    Ok(())
}

async fn drive_signin_form<P: PortalPage>(
    page: &P,
    config: &Config,
) -> Result<(), crate::error::DriverError> {
    page.fill(locators::SIGNIN_USERNAME_INPUT, &config.username).await?;
    page.fill(locators::SIGNIN_PASSWORD_INPUT, &config.password).await?;
    page.click(locators::SIGNIN_BUTTON).await?;
    Ok(())
}

/// Walk every row in spreadsheet order. An error escaping a row's handler
/// becomes one `Unknown` record against that row's GR NO and the loop
/// moves on.
pub async fn run_batch<P: PortalPage>(
    page: &P,
    flow: &EnrollmentFlow<'_>,
    log: &ErrorLog,
    rows: &[EnrollmentRow],
) -> BatchStats {
    let mut stats = BatchStats { total: rows.len(), ..BatchStats::default() };

    for row in rows {
        let ctx = RowCtx::new(row.gr_no(), row.row_number());
        log_row_start(&ctx, rows.len());

        let Some(admission_type) = row.admission_type() else {
            log.record(
                ErrorCode::Unknown,
                format!("unrecognized admission type '{}'", row.admission_type_raw()),
                Some(ctx.gr_no.as_str()),
            );
            stats.skipped += 1;
            continue;
        };

        match row_processor::process_row(page, flow, row, admission_type, &ctx).await {
            Ok(ProcessResult::Completed) => stats.completed += 1,
            Ok(ProcessResult::Skipped) => stats.skipped += 1,
            Err(e) => {
                log.record(ErrorCode::Unknown, format!("Error: {:#}", e), Some(ctx.gr_no.as_str()));
                stats.failed += 1;
            }
        }
    }

    stats
}

/// Run statistics.
#[derive(Debug, Default)]
pub struct BatchStats {
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

// ========== log helpers ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 EMIS form filler starting");
    info!("📄 spreadsheet: {}", config.excel_file);
    info!("🖼 photo directory: {}", config.photo_dir);
    info!("📝 error log: {}", config.error_log_file);
    match config.browser_debug_port {
        Some(port) => info!("🔌 attaching to browser on port {}", port),
        None => info!("🌐 launching browser (headless: {})", config.headless),
    }
    info!("{}", "=".repeat(60));
}

fn log_row_start(ctx: &RowCtx, total: usize) {
    info!("\n{}", "─".repeat(30));
    info!("processing {} of {} sheet rows", ctx, total);
}

fn print_final_stats(stats: &BatchStats, log_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 batch complete");
    info!("✅ completed: {}/{}", stats.completed, stats.total);
    info!("⏭ skipped: {}", stats.skipped);
    info!("❌ failed: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("field-level failures, if any, are in {}", log_path);
}
