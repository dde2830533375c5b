//! Portal page driver - infrastructure layer.
//!
//! Holds the one scarce resource (the portal `Page`) and exposes the
//! capabilities the row walk needs: navigate, click, fill, select-option,
//! upload-file, settle. Nothing here knows about enrollment rows or
//! admission types.

use std::path::Path;

use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::page::ReloadParams;
use chromiumoxide::Page;
use serde_json::Value as JsonValue;
use tokio::time::{sleep, Duration, Instant};
use tracing::debug;

use crate::error::DriverError;

/// Interval between probes while waiting on a bounded condition.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// The browser capabilities the form walk is written against.
///
/// One production backend ([`PortalDriver`]) drives a real page; tests
/// substitute a recording mock. Locators are literal: XPaths for inputs,
/// element ids for the material select controls, CSS for everything the
/// portal renders as repeated cells.
#[allow(async_fn_in_trait)]
pub trait PortalPage {
    /// Navigate the page to `url`.
    async fn goto(&self, url: &str) -> Result<(), DriverError>;

    /// Reload the current view.
    async fn reload(&self) -> Result<(), DriverError>;

    /// Click the element at `xpath`.
    async fn click(&self, xpath: &str) -> Result<(), DriverError>;

    /// Write `value` into the input or textarea at `xpath`, firing the
    /// synthetic `input`/`change` events the form's reactive validation
    /// listens for.
    async fn fill(&self, xpath: &str, value: &str) -> Result<(), DriverError>;

    /// Open the select control with DOM id `control_id`, then click the
    /// option whose trimmed visible text equals the trimmed `label`,
    /// within a bounded wait.
    async fn select_option(&self, control_id: &str, label: &str) -> Result<(), DriverError>;

    /// Attach the file at `path` to the upload input matching `selector`.
    async fn upload_file(&self, selector: &str, path: &Path) -> Result<(), DriverError>;

    /// Visible text of every element matching `selector`, in DOM order.
    async fn column_texts(&self, selector: &str) -> Result<Vec<String>, DriverError>;

    /// Click the first icon-button action of the table row containing the
    /// `index`-th element matching `selector`.
    async fn open_row_action(&self, selector: &str, index: usize) -> Result<(), DriverError>;

    /// Block for a fixed duration while client-rendered state settles.
    async fn settle(&self, wait: Duration);
}

/// Production backend: the sole owner of the portal `Page`, driving the DOM
/// through evaluated JS. Values embedded into scripts are JSON-escaped.
pub struct PortalDriver {
    page: Page,
    dropdown_wait: Duration,
}

impl PortalDriver {
    pub fn new(page: Page, dropdown_wait: Duration) -> Self {
        Self { page, dropdown_wait }
    }

    /// The underlying page, for operations outside the capability set.
    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue, DriverError> {
        let result = self.page.evaluate(js_code.into()).await?;
        let value = result.into_value()?;
        Ok(value)
    }

    async fn eval_bool(&self, js_code: impl Into<String>) -> Result<bool, DriverError> {
        let value = self.eval(js_code).await?;
        Ok(value.as_bool().unwrap_or(false))
    }
}

impl PortalPage for PortalDriver {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        debug!("goto {}", url);
        self.page
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|e| DriverError::Navigation { url: url.to_string(), source: e })
    }

    async fn reload(&self) -> Result<(), DriverError> {
        debug!("reload");
        self.page.execute(ReloadParams::default()).await?;
        Ok(())
    }

    async fn click(&self, xpath: &str) -> Result<(), DriverError> {
        debug!("click {}", xpath);
        if self.eval_bool(click_xpath_js(xpath)?).await? {
            Ok(())
        } else {
            Err(DriverError::NotFound { locator: xpath.to_string() })
        }
    }

    async fn fill(&self, xpath: &str, value: &str) -> Result<(), DriverError> {
        debug!("fill {} ({} chars)", xpath, value.len());
        if self.eval_bool(fill_xpath_js(xpath, value)?).await? {
            Ok(())
        } else {
            Err(DriverError::NotFound { locator: xpath.to_string() })
        }
    }

    async fn select_option(&self, control_id: &str, label: &str) -> Result<(), DriverError> {
        debug!("select '{}' on #{}", label, control_id);
        if !self.eval_bool(click_id_js(control_id)?).await? {
            return Err(DriverError::NotFound { locator: control_id.to_string() });
        }

        // The option panel is rendered into an overlay after the control
        // opens; poll until the option is clickable or the bound elapses.
        let deadline = Instant::now() + self.dropdown_wait;
        loop {
            if self.eval_bool(click_option_js(label)?).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DriverError::Timeout {
                    what: format!("option '{}' under #{}", label, control_id),
                    waited_ms: self.dropdown_wait.as_millis() as u64,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn upload_file(&self, selector: &str, path: &Path) -> Result<(), DriverError> {
        debug!("upload {} into {}", path.display(), selector);
        let input = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| DriverError::NotFound { locator: selector.to_string() })?;

        let mut params = SetFileInputFilesParams::new(vec![path.display().to_string()]);
        params.backend_node_id = Some(input.backend_node_id.clone());
        self.page
            .execute(params)
            .await
            .map(|_| ())
            .map_err(|e| DriverError::Upload { path: path.display().to_string(), source: e })
    }

    async fn column_texts(&self, selector: &str) -> Result<Vec<String>, DriverError> {
        let js_code = format!(
            r#"
            (() => {{
                try {{
                    return Array.from(document.querySelectorAll({selector}))
                        .map((el) => el.textContent || '');
                }} catch (error) {{
                    return [];
                }}
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
        );
        let value = self.eval(js_code).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn open_row_action(&self, selector: &str, index: usize) -> Result<(), DriverError> {
        debug!("open row action {} [{}]", selector, index);
        let js_code = format!(
            r#"
            (() => {{
                try {{
                    const cells = Array.from(document.querySelectorAll({selector}));
                    const cell = cells[{index}];
                    if (!cell) return false;
                    const row = cell.closest('mat-row');
                    if (!row) return false;
                    const button = row.querySelector('button[mat-icon-button]');
                    if (!button) return false;
                    button.click();
                    return true;
                }} catch (error) {{
                    return false;
                }}
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
            index = index,
        );
        if self.eval_bool(js_code).await? {
            Ok(())
        } else {
            Err(DriverError::NotFound { locator: format!("{}[{}]", selector, index) })
        }
    }

    async fn settle(&self, wait: Duration) {
        sleep(wait).await;
    }
}

// ========== script builders ==========

fn click_xpath_js(xpath: &str) -> Result<String, DriverError> {
    Ok(format!(
        r#"
        (() => {{
            try {{
                const node = document
                    .evaluate({xpath}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null)
                    .singleNodeValue;
                if (!node) return false;
                node.click();
                return true;
            }} catch (error) {{
                return false;
            }}
        }})()
        "#,
        xpath = serde_json::to_string(xpath)?,
    ))
}

fn click_id_js(id: &str) -> Result<String, DriverError> {
    Ok(format!(
        r#"
        (() => {{
            try {{
                const node = document.getElementById({id});
                if (!node) return false;
                node.click();
                return true;
            }} catch (error) {{
                return false;
            }}
        }})()
        "#,
        id = serde_json::to_string(id)?,
    ))
}

/// Write through the native value setter so the framework's change
/// detection observes the new value, then fire the events it listens for.
fn fill_xpath_js(xpath: &str, value: &str) -> Result<String, DriverError> {
    Ok(format!(
        r#"
        (() => {{
            try {{
                const node = document
                    .evaluate({xpath}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null)
                    .singleNodeValue;
                if (!node) return false;
                node.focus();
                const proto = node.tagName === 'TEXTAREA'
                    ? window.HTMLTextAreaElement.prototype
                    : window.HTMLInputElement.prototype;
                Object.getOwnPropertyDescriptor(proto, 'value').set.call(node, {value});
                node.dispatchEvent(new Event('input', {{ bubbles: true }}));
                node.dispatchEvent(new Event('change', {{ bubbles: true }}));
                node.blur();
                return true;
            }} catch (error) {{
                return false;
            }}
        }})()
        "#,
        xpath = serde_json::to_string(xpath)?,
        value = serde_json::to_string(value)?,
    ))
}

fn click_option_js(label: &str) -> Result<String, DriverError> {
    Ok(format!(
        r#"
        (() => {{
            try {{
                const spans = Array.from(document.querySelectorAll('mat-option span'));
                const hit = spans.find((s) => (s.textContent || '').trim() === {label}.trim());
                if (!hit) return false;
                hit.click();
                return true;
            }} catch (error) {{
                return false;
            }}
        }})()
        "#,
        label = serde_json::to_string(label)?,
    ))
}
