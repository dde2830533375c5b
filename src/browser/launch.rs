use anyhow::Result;
use chromiumoxide::{Browser, BrowserConfig, Page};
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

/// Launch a Chromium instance and navigate a fresh page to `url`.
///
/// Headed by default: the portal occasionally throws captchas or session
/// dialogs that an operator wants to see.
pub async fn launch_browser(url: &str, headless: bool) -> Result<(Browser, Page)> {
    info!("launching browser (headless: {})", headless);
    debug!("target URL: {}", url);

    let builder = BrowserConfig::builder().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--remote-debugging-port=0",
    ]);
    let builder = if headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    let config = builder.build().map_err(|e| {
        error!("browser configuration failed: {}", e);
        anyhow::anyhow!("browser configuration failed: {}", e)
    })?;

    let (browser, handler) = Browser::launch(config).await.map_err(|e| {
        error!("browser launch failed: {}", e);
        e
    })?;
    debug!("browser launched");

    super::spawn_cdp_handler(handler);

    // Give the browser a moment to settle before opening pages.
    sleep(Duration::from_millis(300)).await;

    let page = browser.new_page(url).await.map_err(|e| {
        error!("page creation failed: {}", e);
        e
    })?;

    info!("✓ browser ready at: {}", url);
    Ok((browser, page))
}
