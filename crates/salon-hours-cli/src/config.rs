//! Optional `hours.toml` defaults for the CLI.
//!
//! ```toml
//! schedule = "schedule.json"   # used when no --input is given
//! timezone = "Asia/Riyadh"     # used for RFC 3339 inputs without --timezone
//! slot_minutes = 30            # default slot duration and step
//! log = "info"                 # log filter when HOURS_LOG is unset
//! ```
//!
//! Relative paths are resolved against the working directory. Command-line
//! flags override every value here.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "hours.toml";
pub const DEFAULT_SLOT_MINUTES: u32 = 30;
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable holding the log filter, e.g. `HOURS_LOG=debug`.
pub const LOG_ENV: &str = "HOURS_LOG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub schedule: Option<PathBuf>,
    pub timezone: Option<String>,
    pub slot_minutes: Option<u32>,
    pub log: Option<String>,
}

impl Config {
    /// Load `path` if given (it must exist), otherwise `./hours.toml` if
    /// present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes.unwrap_or(DEFAULT_SLOT_MINUTES)
    }

    pub fn log_filter(&self) -> &str {
        self.log.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
