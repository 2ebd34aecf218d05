use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use crate::settings::config::Settings;

/// Shared settings handle. Each process has its own in-memory copy that the
/// session may update without touching disk; `save` persists it for future
/// processes. The Arc<Mutex<..>> ensures every part of the app observes the
/// same instance.
#[derive(Clone)]
pub struct SettingsManager {
    settings_path: PathBuf,
    inner: Arc<Mutex<Settings>>,
}

impl SettingsManager {
    /// Create a settings manager at the default location
    /// (`~/.tinsel/settings.toml`), writing a default file if none exists.
    pub fn new() -> Result<Self> {
        Self::from_path(Self::default_settings_path()?)
    }

    /// Create a settings manager from a specific path
    pub fn from_path(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {parent:?}"))?;
            }
            write_settings(&path, &Settings::default())?;
        }

        let loaded = load_with_backup(&path)?;
        Ok(Self {
            settings_path: path,
            inner: Arc::new(Mutex::new(loaded)),
        })
    }

    fn default_settings_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".tinsel").join("settings.toml"))
    }

    /// Get a copy of the in-memory settings
    pub fn settings(&self) -> Settings {
        self.inner.lock().unwrap().clone()
    }

    /// Update in-memory settings with a closure. Not persisted until `save`.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut Settings),
    {
        updater(&mut self.inner.lock().unwrap());
    }

    /// Persist the in-memory settings to disk
    pub fn save(&self) -> Result<()> {
        write_settings(&self.settings_path, &self.inner.lock().unwrap())
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }
}

/// Load settings, moving a corrupted file aside and starting over with
/// defaults rather than refusing to boot.
fn load_with_backup(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {path:?}"))?;

    match toml::from_str(&contents) {
        Ok(settings) => Ok(settings),
        Err(_) => {
            let backup_path = path.with_extension("toml.backup");
            fs::rename(path, &backup_path).with_context(|| {
                format!("Failed to backup corrupted settings to {backup_path:?}")
            })?;

            let defaults = Settings::default();
            write_settings(path, &defaults)?;
            Ok(defaults)
        }
    }
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    let contents = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(path, contents).with_context(|| format!("Failed to write settings to {path:?}"))
}
