//! Configuration management for the job board.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Environment overrides for API credentials
//!
//! # Example
//!
//! ```no_run
//! use jobboard_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/jobboard.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Page size: {}", config.settings().paging.page_size);
//!
//! // Modify a setting
//! config.settings_mut().paging.page_size = 20;
//!
//! // Save just the paging section atomically
//! config.update_section(ConfigSection::Paging).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ApiSettings, BoardSettings, ConfigSection, LoggingSettings, PagingSettings, Settings,
    StorageSettings, ENV_API_KEY, ENV_BOARD_KEY, ENV_USER_EMAIL,
};
