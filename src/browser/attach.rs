use anyhow::Result;
use chromiumoxide::{Browser, Page};
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

/// Attach to a Chromium already running with `--remote-debugging-port` and
/// return a page on `url`.
///
/// An existing tab already showing the portal is reused, so a login session
/// prepared by hand survives; otherwise a fresh tab is opened.
pub async fn connect_to_browser(port: u16, url: &str) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("connecting to browser: {}", browser_url);

    let (browser, handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("browser connection failed: {}", e);
        e
    })?;
    debug!("browser connection established");

    super::spawn_cdp_handler(handler);

    // Give the connection a moment to sync open targets.
    sleep(Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("found {} open pages", pages.len());

    for page in pages.iter() {
        if let Ok(Some(page_url)) = page.url().await {
            if page_url.starts_with(url) {
                info!("✓ reusing open portal tab: {}", page_url);
                return Ok((browser, page.clone()));
            }
        }
    }

    debug!("no portal tab open, creating one");
    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("page creation failed: {}", e);
        e
    })?;
    page.goto(url).await.map_err(|e| {
        error!("navigation to {} failed: {}", url, e);
        e
    })?;

    info!("✓ opened portal tab: {}", url);
    Ok((browser, page))
}
