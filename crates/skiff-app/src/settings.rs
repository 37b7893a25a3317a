// SPDX-License-Identifier: Apache-2.0
//
// Shell configuration persistence.
//
// One JSON file next to the binary (or wherever SKIFF_CONFIG points). A
// missing or unreadable file falls back to defaults; the caller decides
// whether to write them back.

use std::path::{Path, PathBuf};

use skiff_core::config::ShellConfig;
use skiff_core::error::Result;
use tracing::debug;

const CONFIG_FILE: &str = "skiff.json";

/// Resolve the config file location. `SKIFF_CONFIG` overrides the default.
pub fn config_path() -> PathBuf {
    std::env::var_os("SKIFF_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// Load the persisted config, if any.
pub fn load_config() -> Option<ShellConfig> {
    load_from(&config_path())
}

/// Persist the config to the resolved location.
pub fn persist_config(config: &ShellConfig) -> Result<()> {
    persist_to(&config_path(), config)
}

fn load_from(path: &Path) -> Option<ShellConfig> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

fn persist_to(path: &Path, config: &ShellConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("skiff.json");

        let mut config = ShellConfig::default();
        config.trusted_host = "app.test".into();
        persist_to(&path, &config).expect("persist");

        let back = load_from(&path).expect("load");
        assert_eq!(back.trusted_host, "app.test");
    }

    #[test]
    fn missing_or_garbage_files_yield_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_from(&dir.path().join("absent.json")).is_none());

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "not json at all").expect("write");
        assert!(load_from(&garbage).is_none());
    }
}
