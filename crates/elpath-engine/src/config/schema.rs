use crate::resolver::{DEFAULT_ROOT_SELECTOR, FanOut};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElpathConfig {
    /// WebDriver endpoint, e.g. `http://localhost:4444`.
    #[serde(default)]
    pub webdriver_url: Option<String>,
    /// CSS selector of the document root every path starts from.
    #[serde(default = "default_root_selector")]
    pub root_selector: String,
    /// Definition tree file. Relative paths are taken from the config file's directory.
    #[serde(default)]
    pub definitions: Option<PathBuf>,
    #[serde(default)]
    pub fan_out: FanOut,
}

impl Default for ElpathConfig {
    fn default() -> Self {
        Self {
            webdriver_url: None,
            root_selector: default_root_selector(),
            definitions: None,
            fan_out: FanOut::default(),
        }
    }
}

fn default_root_selector() -> String {
    DEFAULT_ROOT_SELECTOR.to_string()
}
