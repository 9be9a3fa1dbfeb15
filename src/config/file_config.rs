//! Configuration file discovery and TOML output.
//!
//! # Configuration File Format
//!
//! ```toml
//! [google_books]
//! api_key = "your-api-key"
//! base_url = "https://www.googleapis.com"
//! timeout_secs = 30
//! max_retries = 2
//!
//! [search]
//! max_results = 8
//! per_query_results = 5
//! query_timeout_secs = 10
//! max_concurrent_queries = 4
//!
//! [lexicon]
//! extra_boilerplate = ["book club pick"]
//! extra_title_keywords = ["wolf"]
//! extra_first_names = ["ottessa"]
//!
//! [logging]
//! level = "warn"
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "cover-match.toml";

/// Locate a configuration file
///
/// Checks `./cover-match.toml`, then `<config dir>/cover-match/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("cover-match").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Render a configuration as TOML
pub fn example_config(config: &Config) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::Serialize(e.to_string()))
}

/// Write a configuration to a TOML file
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = example_config(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
}
