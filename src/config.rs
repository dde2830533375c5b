use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Path of the optional configuration file, looked up in the working
/// directory.
pub const CONFIG_FILE: &str = "emis.toml";

/// Runtime configuration.
///
/// Layered lowest-to-highest: built-in defaults, then `emis.toml`, then
/// `EMIS_*` environment variables.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the EMIS portal.
    pub portal_url: String,
    /// Portal login name.
    pub username: String,
    /// Portal password.
    pub password: String,
    /// Spreadsheet with the enrollment rows.
    pub excel_file: String,
    /// Directory holding `<GR NO>.jpg` student photos.
    pub photo_dir: String,
    /// Append-only error log file.
    pub error_log_file: String,
    /// Run the browser without a window.
    pub headless: bool,
    /// Attach to an already-running Chromium on this debug port instead of
    /// launching one. Useful when the login session is prepared by hand.
    pub browser_debug_port: Option<u16>,
    /// Click the form's save button at the end of each row.
    pub submit_on_complete: bool,
    /// Upper bound for the dropdown option panel to become clickable.
    pub dropdown_wait_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portal_url: "https://emis.sef.edu.pk/".to_string(),
            username: String::new(),
            password: String::new(),
            excel_file: "student_data.xlsx".to_string(),
            photo_dir: "Photos".to_string(),
            error_log_file: "process_log.txt".to_string(),
            headless: false,
            browser_debug_port: None,
            submit_on_complete: false,
            dropdown_wait_ms: 2000,
        }
    }
}

impl Config {
    /// Load the layered configuration.
    pub fn load() -> Self {
        Self::from_env(Self::from_file(CONFIG_FILE))
    }

    /// Read `path` as TOML, falling back to `base` defaults when the file
    /// is absent or malformed.
    fn from_file(path: &str) -> Self {
        if !Path::new(path).exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!("ignoring malformed {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("could not read {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Apply `EMIS_*` environment overrides on top of `base`.
    fn from_env(base: Self) -> Self {
        Self {
            portal_url: std::env::var("EMIS_PORTAL_URL").unwrap_or(base.portal_url),
            username: std::env::var("EMIS_USERNAME").unwrap_or(base.username),
            password: std::env::var("EMIS_PASSWORD").unwrap_or(base.password),
            excel_file: std::env::var("EMIS_EXCEL_FILE").unwrap_or(base.excel_file),
            photo_dir: std::env::var("EMIS_PHOTO_DIR").unwrap_or(base.photo_dir),
            error_log_file: std::env::var("EMIS_ERROR_LOG").unwrap_or(base.error_log_file),
            headless: std::env::var("EMIS_HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.headless),
            browser_debug_port: std::env::var("EMIS_BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).or(base.browser_debug_port),
            submit_on_complete: std::env::var("EMIS_SUBMIT_ON_COMPLETE").ok().and_then(|v| v.parse().ok()).unwrap_or(base.submit_on_complete),
            dropdown_wait_ms: std::env::var("EMIS_DROPDOWN_WAIT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.dropdown_wait_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_portal() {
        let config = Config::default();
        assert_eq!(config.portal_url, "https://emis.sef.edu.pk/");
        assert!(!config.submit_on_complete);
        assert!(config.browser_debug_port.is_none());
    }

    #[test]
    fn toml_layer_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            username = "school42"
            headless = true
            browser_debug_port = 9222
            "#,
        )
        .unwrap();
        assert_eq!(config.username, "school42");
        assert!(config.headless);
        assert_eq!(config.browser_debug_port, Some(9222));
        // untouched fields keep their defaults
        assert_eq!(config.excel_file, "student_data.xlsx");
    }
}
