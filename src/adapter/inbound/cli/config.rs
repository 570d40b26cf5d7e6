//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Documented config template.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, CONFIG_TEMPLATE)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.init",
            "path": path.display().to_string(),
        }));
        return Ok(());
    }

    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::hint(&format!(
        "run {} to check your edits",
        output::highlight(format!("linestack config validate -c {}", path.display()))
    ));
    Ok(())
}

/// Execute `config show`: the effective configuration, defaults applied.
pub fn execute_show(path: &Path) -> Result<()> {
    let exists = path.exists();
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "file_found": exists,
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !exists {
        output::note("(file not found, showing defaults)");
    }
    output::field(
        "Site",
        config
            .site
            .map_or_else(|| "(ask, then draftkings)".to_string(), |s| s.to_string()),
    );

    output::section("Optimizer");
    output::field("Lineups", config.optimizer.lineups);
    output::field("Overlap", config.optimizer.overlap);
    output::field("Time limit", format!("{}s", config.optimizer.time_limit_secs));

    output::section("Output");
    output::field("Upload file", config.output.path.display());
    output::field(
        "Projections",
        config.output.with_projections_path().display(),
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    if let Some(rules) = &config.rules {
        output::section("Custom rules");
        output::field("Name", &rules.name);
        output::field("Salary cap", rules.salary_cap);
        output::field("Roster", rules.header().join(" "));
    }

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
            "site": config.site.map(|s| s.name()),
        }));
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");

    match config.site {
        Some(site) => output::field("Site", site),
        None => output::warning("no site set; generate will ask, or use draftkings"),
    }
    if config.rules.is_some() && config.site.is_some_and(|s| s.rules().is_some()) {
        output::warning("[rules] is ignored unless site = \"custom\"");
    }

    output::field(
        "Next",
        format!("linestack config show -c {}", path.display()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn template_parses_and_validates() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config {
            site: Some(crate::domain::rules::Site::Draftkings),
            ..Config::default()
        });
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        execute_init(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);

        assert!(execute_init(&path, false).is_err());
        assert!(execute_init(&path, true).is_ok());
    }

    #[test]
    fn validate_accepts_minimal_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "site = \"fanduel\"\n").unwrap();

        assert!(execute_validate(&path).is_ok());
    }

    #[test]
    fn validate_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(execute_validate(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn show_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        assert!(execute_show(&dir.path().join("absent.toml")).is_ok());
    }
}
