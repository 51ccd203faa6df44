//! Runtime configuration for the dashboard core.
//!
//! # Responsibility
//! - Hold business constants (tax rate, payment terms, counters, thresholds)
//!   and logging settings.
//! - Load them from defaults, an optional JSON file and the environment.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - `validate` runs after every load path; invalid configs never reach
//!   managers.

use crate::logging::SUPPORTED_LEVELS;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_LOG_LEVEL: &str = "RECORDKEEPER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "RECORDKEEPER_LOG_DIR";
pub const ENV_TAX_RATE: &str = "RECORDKEEPER_TAX_RATE";

/// Configuration failure.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// Config file is not valid JSON for this schema.
    Parse(serde_json::Error),
    /// A value is outside its allowed range.
    Invalid { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Invoice tax rate as a fraction (`0.1` is 10%).
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    /// Days between invoice date and default due date.
    pub invoice_due_days: u32,
    /// Days between task start and default due date.
    pub task_due_days: u32,
    pub first_invoice_number: u64,
    pub first_ticket_number: u64,
    /// Sales-page inventory is low below this quantity.
    pub inventory_low_threshold: u32,
    pub notice_dismiss_ms: u64,
    /// Delay before the "report generated" notice.
    pub report_delay_ms: u64,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(1, 1),
            invoice_due_days: 30,
            task_due_days: 7,
            first_invoice_number: 1005,
            first_ticket_number: 1004,
            inventory_low_threshold: 10,
            notice_dismiss_ms: 3000,
            report_delay_ms: 2000,
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Parses a JSON document; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Defaults, then `path` when given, then environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `RECORDKEEPER_*` overrides read through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level.trim().to_ascii_lowercase();
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|dir| !dir.trim().is_empty()) {
            self.log_dir = Some(PathBuf::from(dir.trim()));
        }
        if let Some(rate) = lookup(ENV_TAX_RATE) {
            self.tax_rate = Decimal::from_str(rate.trim()).map_err(|err| ConfigError::Invalid {
                field: "tax_rate",
                reason: err.to_string(),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.tax_rate.is_sign_negative() && !self.tax_rate.is_zero() {
            return Err(ConfigError::Invalid {
                field: "tax_rate",
                reason: "must not be negative".to_string(),
            });
        }
        if self.invoice_due_days == 0 {
            return Err(ConfigError::Invalid {
                field: "invoice_due_days",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.task_due_days == 0 {
            return Err(ConfigError::Invalid {
                field: "task_due_days",
                reason: "must be at least 1".to_string(),
            });
        }
        if !SUPPORTED_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "log_level",
                reason: format!("unsupported level `{}`", self.log_level),
            });
        }
        Ok(())
    }
}
