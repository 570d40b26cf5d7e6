//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings of a
//! generation run. Configuration is loaded from a TOML file; every table is
//! optional and falls back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use linestack::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::domain::rules::{Site, SiteRules};
use crate::error::{ConfigError, Result};

/// Generation loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Number of lineups to generate.
    pub lineups: usize,
    /// Most players any two lineups may share.
    pub overlap: usize,
    /// Time budget for a single solve.
    pub time_limit_secs: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            lineups: 150,
            overlap: 4,
            time_limit_secs: 30,
        }
    }
}

impl OptimizerConfig {
    #[must_use]
    pub const fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }
}

/// Where lineups are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Upload-ready file. The with-projections file is written next to it.
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lineups.csv"),
        }
    }
}

impl OutputSettings {
    /// `<stem>_with_projections.<ext>` next to the upload-ready file.
    #[must_use]
    pub fn with_projections_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map_or_else(|| "lineups".into(), |s| s.to_string_lossy().into_owned());
        let name = match self.path.extension() {
            Some(ext) => format!("{stem}_with_projections.{}", ext.to_string_lossy()),
            None => format!("{stem}_with_projections"),
        };
        self.path.with_file_name(name)
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Contest site. Unset means the CLI asks (or falls back to DraftKings).
    #[serde(default)]
    pub site: Option<Site>,

    #[serde(default)]
    pub optimizer: OptimizerConfig,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Full rule table, required when `site = "custom"`.
    #[serde(default)]
    pub rules: Option<SiteRules>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed or
    /// validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or is invalid.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    ///
    /// Run again after command-line overrides are applied. Checks that
    /// depend on the rule set only run once a site is known.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first invalid value.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.optimizer.lineups == 0 {
            return Err(ConfigError::invalid("lineups", "must be greater than 0").into());
        }
        if self.optimizer.time_limit_secs == 0 {
            return Err(ConfigError::invalid("time_limit_secs", "must be greater than 0").into());
        }
        if let Some(rules) = &self.rules {
            rules.validate()?;
        }
        if let Some(site) = self.site {
            self.rules_for(site)?;
        }
        Ok(())
    }

    /// Resolve and validate the rule set for `site`.
    ///
    /// Built-in sites use their profile; [`Site::Custom`] uses the `[rules]`
    /// table. The configured overlap must leave room for lineups to differ.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if custom rules are missing or any rule or the
    /// overlap is invalid.
    #[allow(clippy::result_large_err)]
    pub fn rules_for(&self, site: Site) -> Result<SiteRules> {
        let rules = site
            .rules()
            .or_else(|| self.rules.clone())
            .ok_or(ConfigError::MissingField { field: "rules" })?;
        rules.validate()?;

        if self.optimizer.overlap >= rules.roster_size() {
            return Err(ConfigError::invalid(
                "overlap",
                format!("must be less than the roster size ({})", rules.roster_size()),
            )
            .into());
        }
        Ok(rules)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.optimizer.lineups, 150);
        assert_eq!(config.optimizer.overlap, 4);
        assert_eq!(config.optimizer.time_limit(), Duration::from_secs(30));
        assert_eq!(config.site, None);
    }

    #[test]
    fn with_projections_path_keeps_directory_and_extension() {
        let output = OutputSettings {
            path: PathBuf::from("out/slate.csv"),
        };
        assert_eq!(
            output.with_projections_path(),
            PathBuf::from("out/slate_with_projections.csv")
        );

        let bare = OutputSettings {
            path: PathBuf::from("lineups"),
        };
        assert_eq!(
            bare.with_projections_path(),
            PathBuf::from("lineups_with_projections")
        );
    }

    #[test]
    fn built_in_site_ignores_rules_table() {
        let config = Config::default();
        let rules = config.rules_for(Site::Fanduel).unwrap();
        assert_eq!(rules.salary_cap, 55_000);
    }

    #[test]
    fn custom_site_without_rules_is_rejected() {
        let config = Config::default();
        let err = config.rules_for(Site::Custom).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::MissingField { field: "rules" })
        ));
    }

    #[test]
    fn overlap_must_be_below_roster_size() {
        let mut config = Config::default();
        config.optimizer.overlap = 9;
        let err = config.rules_for(Site::Draftkings).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::InvalidValue {
                field: "overlap",
                ..
            })
        ));
    }
}
