//! Path utilities for linestack.
//!
//! User-level files live under `~/.linestack/`:
//! - `~/.linestack/config.toml` - default configuration

use std::path::PathBuf;

/// Returns the linestack home directory (`~/.linestack/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".linestack")
}

/// Returns the default config file path (`~/.linestack/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_under_linestack_home() {
        let config = default_config();
        assert!(config.starts_with(home_dir()));
        assert!(config.to_string_lossy().contains(".linestack"));
        assert!(config.ends_with("config.toml"));
    }
}
