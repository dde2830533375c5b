//! Integration tests against a real browser and portal.
//!
//! Ignored by default; run manually with `cargo test -- --ignored` on a
//! machine with Chromium available and the portal reachable.

use emis_form_filler::browser::launch_browser;
use emis_form_filler::config::Config;
use emis_form_filler::infrastructure::PortalDriver;
use emis_form_filler::logger;
use emis_form_filler::models::load_enrollment_rows;
use emis_form_filler::orchestrator::login;
use emis_form_filler::services::ErrorLog;
use tokio::time::Duration;

#[tokio::test]
#[ignore] // needs Chromium: cargo test -- --ignored
async fn browser_launches_headless() {
    logger::init();
    let config = Config::load();

    let result = launch_browser(&config.portal_url, true).await;
    assert!(result.is_ok(), "should be able to launch a headless browser");

    let (mut browser, _page) = result.unwrap();
    let _ = browser.close().await;
    let _ = browser.wait().await;
}

#[tokio::test]
#[ignore] // needs Chromium, the portal and real credentials
async fn portal_accepts_the_configured_credentials() {
    logger::init();
    let config = Config::load();

    let (mut browser, page) = launch_browser(&config.portal_url, true)
        .await
        .expect("browser launch failed");
    let driver = PortalDriver::new(page, Duration::from_millis(config.dropdown_wait_ms));

    let error_log = ErrorLog::new(&config.error_log_file);
    let result = login(&driver, &config, &error_log).await;

    let _ = browser.close().await;
    let _ = browser.wait().await;

    assert!(result.is_ok(), "login should succeed with the configured credentials");
}

#[tokio::test]
#[ignore] // needs the spreadsheet next to the binary
async fn spreadsheet_loads_and_rows_carry_gr_numbers() {
    logger::init();
    let config = Config::load();

    let rows = load_enrollment_rows(&config.excel_file).expect("spreadsheet should load");
    println!("loaded {} rows", rows.len());

    for row in &rows {
        assert!(!row.gr_no().is_empty(), "row {} has no GR NO", row.row_number());
    }
}
