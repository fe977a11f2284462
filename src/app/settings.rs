use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{cli::Cli, domain::weather::Units};

const CONFIG_DIR_ENV: &str = "ENVIRONMENT_READER_CONFIG_DIR";

/// Preferences that survive restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub units: Units,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            units: Units::Celsius,
        }
    }
}

/// Reads the saved preferences, then applies explicit CLI overrides.
pub fn load_preferences(cli: &Cli, enable_disk: bool) -> (Preferences, Option<PathBuf>) {
    let path = if enable_disk { settings_path() } else { None };
    let saved = path.as_deref().and_then(read_preferences).unwrap_or_default();
    (apply_cli_overrides(saved, cli), path)
}

pub fn apply_cli_overrides(mut preferences: Preferences, cli: &Cli) -> Preferences {
    if let Some(units) = cli.units {
        preferences.units = units.into();
    }
    preferences
}

pub fn read_preferences(path: &Path) -> Option<Preferences> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(saved) => Some(saved),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
            None
        }
    }
}

pub fn save_preferences(path: &Path, preferences: Preferences) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload = serde_json::to_string_pretty(&preferences)
        .context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")?;
    debug!(path = %path.display(), "preferences saved");
    Ok(())
}

fn settings_path() -> Option<PathBuf> {
    resolve_settings_path(std::env::var_os(CONFIG_DIR_ENV), std::env::var_os("HOME"))
}

fn resolve_settings_path(config_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(base) = config_dir.filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("environment-reader")
            .join("settings.json"),
    )
}
