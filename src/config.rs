use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Recipe browser configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BrowserConfig {
    /// Quiet window of the change dispatcher in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Step of the prep and cook time sliders; their upper bound is
    /// rounded up to a multiple of this
    #[serde(default = "default_range_step")]
    pub range_step: u32,
    /// CSS selector of the browser element whose cards are indexed
    #[serde(default = "default_browser_selector")]
    pub browser_selector: String,
    /// CSS selector identifying cards inside the browser
    #[serde(default = "default_card_selector")]
    pub card_selector: String,
    /// Display label of the "no tag filter" option
    #[serde(default = "default_any_tag_label")]
    pub any_tag_label: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            range_step: default_range_step(),
            browser_selector: default_browser_selector(),
            card_selector: default_card_selector(),
            any_tag_label: default_any_tag_label(),
        }
    }
}

// Default value functions
fn default_debounce_ms() -> u64 {
    150
}

fn default_range_step() -> u32 {
    5
}

fn default_browser_selector() -> String {
    "recipe-browser".to_string()
}

fn default_card_selector() -> String {
    "recipe-card".to_string()
}

fn default_any_tag_label() -> String {
    "Any tag".to_string()
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BROWSER__ prefix
    /// 2. recipe-browser.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BROWSER__DEBOUNCE_MS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn quiet_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Step actually used by the time sliders; a zero step would make the
    /// rounding meaningless so it is treated as 1.
    pub fn time_step(&self) -> u32 {
        self.range_step.max(1)
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-browser").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_BROWSER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
