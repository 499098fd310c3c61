//! Configuration for the leave ledger
//!
//! Settings live in a TOML file. Lookup order:
//! 1. `--config <path>`
//! 2. `LEAVE_LEDGER_CONFIG` environment variable (`.env` is honoured)
//! 3. `<config_dir>/leave-ledger/config.toml`
//!
//! Missing keys fall back to the defaults below.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::workbook::WidthBounds;

pub const CONFIG_ENV_VAR: &str = "LEAVE_LEDGER_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub summary: SummaryConfig,
    pub entitlement: EntitlementConfig,
    pub layout: LayoutConfig,
}

/// Yearly summary sheet settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Name of the generated first sheet
    pub sheet_name: String,
    /// Text of the merged title cell
    pub title: String,
    pub max_service_years: usize,
    /// Number of columns the title cell spans
    pub title_span: u16,
    /// 1-based column of the first service year
    pub first_data_column: u16,
    pub team_header: String,
    pub name_header: String,
    pub year_label_suffix: String,
    pub entitlement_suffix: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            sheet_name: "재현이네".to_string(),
            title: "재현이네".to_string(),
            max_service_years: 20,
            title_span: 8,
            first_data_column: 9,
            team_header: "team".to_string(),
            name_header: "name".to_string(),
            year_label_suffix: "년".to_string(),
            entitlement_suffix: "개".to_string(),
        }
    }
}

impl SummaryConfig {
    /// Header label for a service year, e.g. `3년`
    pub fn year_label(&self, service_year: usize) -> String {
        format!("{}{}", service_year, self.year_label_suffix)
    }
}

/// Annual entitlement reference rule.
///
/// Year 1 grants `first_year` days; from year 2 the allotment starts at
/// `base` and grows by one every `step_years` years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitlementConfig {
    pub first_year: u32,
    pub base: u32,
    pub step_years: u32,
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            first_year: 11,
            base: 15,
            step_years: 2,
        }
    }
}

impl EntitlementConfig {
    /// Reference allotment for a 1-based service year
    pub fn days_for(&self, service_year: usize) -> u32 {
        if service_year <= 1 {
            return self.first_year;
        }
        let step = self.step_years.max(1);
        self.base + (service_year as u32 - 2) / step
    }
}

/// Column sizing and date rendering for written sheets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub min_width: f64,
    pub max_width: f64,
    pub padding: f64,
    pub date_format: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_width: 15.0,
            max_width: 50.0,
            padding: 2.0,
            date_format: "yyyy-mm-dd".to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn width_bounds(&self) -> WidthBounds {
        WidthBounds {
            min: self.min_width,
            max: self.max_width,
            padding: self.padding,
        }
    }
}

impl LedgerConfig {
    /// Resolve and load the configuration
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::from_file(Path::new(&path));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

/// `<config_dir>/leave-ledger/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("leave-ledger").join("config.toml"))
}
