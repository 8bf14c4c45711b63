use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::config::settings::{DisplaySettings, ExportSettings, VisualSettings};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplaySettings,
    pub export: ExportSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    pub level: String,

    /// Log entries kept in memory for `--show-log`
    pub max_entries: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            max_entries: 1000,
        }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("tabular-export").join("config.toml"))
    }

    /// Settings every update starts from before metadata overrides
    pub fn visual_settings(&self) -> VisualSettings {
        VisualSettings {
            display: self.display.clone(),
            export: self.export.clone(),
        }
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# tabular-export configuration
# Location: ~/.config/tabular-export/config.toml (Linux)
#           %APPDATA%\tabular-export\config.toml (Windows)

[display]
# Which cells render as blank text:
#   "absent_only" - only missing/null cells (0 and false render as themselves)
#   "falsy"       - null, false, 0, NaN and empty strings all render blank
cell_rendering = "absent_only"

[export]
# Download format: "csv" or "json"
format = "csv"

# CSV field quoting:
#   "minimal" - quote fields containing commas, quotes or line breaks
#   "none"    - write fields raw (embedded commas corrupt the line)
quoting = "minimal"

# File name without extension
file_stem = "pbidownload"

[logging]
# Filter directive used when RUST_LOG is not set
level = "info"

# Number of log entries kept in memory
max_entries = 1000
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::data_exporter::{CsvQuoting, ExportFormat};
    use crate::data::projector::CellRendering;

    #[test]
    fn test_commented_default_matches_default() {
        let parsed = Config::from_toml_str(&Config::create_default_with_comments()).unwrap();
        let default = Config::default();

        assert_eq!(parsed.visual_settings(), default.visual_settings());
        assert_eq!(parsed.logging.level, default.logging.level);
        assert_eq!(parsed.logging.max_entries, default.logging.max_entries);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
[export]
format = "json"

[display]
cell_rendering = "falsy"
"#,
        )
        .unwrap();

        assert_eq!(config.export.format, ExportFormat::Json);
        assert_eq!(config.export.quoting, CsvQuoting::Minimal);
        assert_eq!(config.display.cell_rendering, CellRendering::Falsy);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = Config::default();
        config.export.file_stem = "report".to_string();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed.export.filename(), "report.csv");
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        assert!(Config::from_toml_str("[export]\nformat = \"xml\"\n").is_err());
    }
}
