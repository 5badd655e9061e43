use serde::{Deserialize, Serialize};

use super::settings::{DEFAULT_TITLE, FontSize, Settings};

/// Application configuration from `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub recent: RecentConfig,
}

/// Settings given to a new, blank list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default = "default_true")]
    pub strikethrough: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            title: default_title(),
            font_size: FontSize::Medium,
            strikethrough: true,
        }
    }
}

impl DefaultsConfig {
    pub fn to_settings(&self) -> Settings {
        Settings {
            title: self.title.clone(),
            font_size: self.font_size,
            strikethrough: self.strikethrough,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Command used to open links. Absent = platform default.
    #[serde(default)]
    pub opener: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentConfig {
    /// Number of recently used files to remember
    #[serde(default = "default_recent_limit")]
    pub limit: usize,
}

impl Default for RecentConfig {
    fn default() -> Self {
        RecentConfig {
            limit: default_recent_limit(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_recent_limit() -> usize {
    10
}
