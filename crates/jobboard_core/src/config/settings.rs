//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::ALL_CATEGORIES;

/// Environment variable overriding `api.api_key`.
pub const ENV_API_KEY: &str = "HRFLOW_API_KEY";
/// Environment variable overriding `api.board_key`.
pub const ENV_BOARD_KEY: &str = "HRFLOW_BOARD_KEY";
/// Environment variable overriding `api.user_email`.
pub const ENV_USER_EMAIL: &str = "HRFLOW_USER_EMAIL";

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Recruiting API access.
    #[serde(default)]
    pub api: ApiSettings,

    /// Page size and request deadline.
    #[serde(default)]
    pub paging: PagingSettings,

    /// Where preferences are persisted.
    #[serde(default)]
    pub storage: StorageSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Board presentation (category list).
    #[serde(default)]
    pub board: BoardSettings,
}

impl Settings {
    /// Replace API credentials with values from the process environment,
    /// where set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Replace API credentials using `lookup` (env var name → value).
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = [
            (ENV_API_KEY, &mut self.api.api_key),
            (ENV_BOARD_KEY, &mut self.api.board_key),
            (ENV_USER_EMAIL, &mut self.api.user_email),
        ];
        for (name, field) in targets {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                tracing::debug!("Using {} from environment", name);
                *field = value;
            }
        }
    }
}

/// Recruiting API access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// API root, without trailing `/jobs/...`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Board whose jobs are listed.
    #[serde(default)]
    pub board_key: String,

    /// Sent as `X-API-KEY`.
    #[serde(default)]
    pub api_key: String,

    /// Sent as `X-USER-EMAIL`.
    #[serde(default)]
    pub user_email: String,
}

fn default_base_url() -> String {
    "https://api.hrflow.ai/v1".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            board_key: String::new(),
            api_key: String::new(),
            user_email: String::new(),
        }
    }
}

/// Paging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingSettings {
    /// Jobs per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_page_size() -> u32 {
    10
}

fn default_timeout_ms() -> u64 {
    5000
}

impl PagingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Preference storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Preferences file. Empty means the platform data directory.
    #[serde(default)]
    pub prefs_file: String,
}

impl StorageSettings {
    /// Configured preferences path, if one is set.
    pub fn prefs_path(&self) -> Option<PathBuf> {
        if self.prefs_file.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.prefs_file))
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Also write logs to a file in `logs_folder`.
    #[serde(default)]
    pub to_file: bool,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            to_file: false,
            logs_folder: default_logs_folder(),
        }
    }
}

/// Board presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Categories offered by the category control, "All" first.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

fn default_categories() -> Vec<String> {
    [
        ALL_CATEGORIES,
        "AI / Research & Development",
        "Artificial Intelligence",
        "Financial Services",
        "Human Resources",
        "Software Engineering",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Api,
    Paging,
    Storage,
    Logging,
    Board,
}

impl ConfigSection {
    /// Every section, in file order.
    pub const ALL: [ConfigSection; 5] = [
        ConfigSection::Api,
        ConfigSection::Paging,
        ConfigSection::Storage,
        ConfigSection::Logging,
        ConfigSection::Board,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Api => "api",
            ConfigSection::Paging => "paging",
            ConfigSection::Storage => "storage",
            ConfigSection::Logging => "logging",
            ConfigSection::Board => "board",
        }
    }

    /// Comment written above the section in generated files.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Api => "Recruiting API access (HRFLOW_* environment variables override)",
            ConfigSection::Paging => "Page size and request deadline",
            ConfigSection::Storage => "Preference storage (empty path = platform data directory)",
            ConfigSection::Logging => "Logging configuration",
            ConfigSection::Board => "Category list shown by the category control",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("[paging]"));
        assert!(toml.contains("base_url"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[api]\nboard_key = \"abc\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert_eq!(parsed.api.board_key, "abc");
        // Defaults applied for missing
        assert_eq!(parsed.api.base_url, "https://api.hrflow.ai/v1");
        assert_eq!(parsed.paging.page_size, 10);
        assert_eq!(parsed.paging.timeout(), Duration::from_millis(5000));
        assert_eq!(parsed.board.categories[0], "All");
        assert_eq!(parsed.board.categories.len(), 6);
    }

    #[test]
    fn overrides_replace_credentials() {
        let mut settings = Settings::default();
        settings.api.board_key = "from-file".into();
        settings.apply_overrides(|name| match name {
            ENV_API_KEY => Some("key-from-env".into()),
            ENV_BOARD_KEY => Some("   ".into()),
            _ => None,
        });
        assert_eq!(settings.api.api_key, "key-from-env");
        assert_eq!(settings.api.board_key, "from-file");
        assert_eq!(settings.api.user_email, "");
    }

    #[test]
    fn prefs_path_empty_is_none() {
        assert_eq!(StorageSettings::default().prefs_path(), None);
        let s = StorageSettings {
            prefs_file: "/tmp/p.json".into(),
        };
        assert_eq!(s.prefs_path(), Some(PathBuf::from("/tmp/p.json")));
    }
}
