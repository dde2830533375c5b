//! Browser session acquisition.
//!
//! Two ways to get a `(Browser, Page)` pair:
//! - [`launch_browser`] starts a Chromium of our own (headed or headless)
//! - [`connect_to_browser`] attaches to one already running with
//!   `--remote-debugging-port`, so a session logged in by hand can be reused

mod attach;
mod launch;

pub use attach::connect_to_browser;
pub use launch::launch_browser;

use futures::StreamExt;

/// Drive the CDP event stream in the background for the lifetime of the
/// connection. The loop ends when the browser goes away.
fn spawn_cdp_handler(mut handler: chromiumoxide::Handler) {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });
}
