//! Settings service: persistence and change notifications.
//!
//! # Design
//! - Load once, validate every mutation against the full document, persist
//!   write-through, then notify watchers.
//! - Watchers get the whole settings document; diffing is the consumer's
//!   concern.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::info;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppSettings, ServerProfile};
use crate::validate::{validate_profile, validate_settings};

/// Receiver half of the settings change stream.
pub type SettingsWatcher = watch::Receiver<AppSettings>;

/// File-backed settings facade.
pub struct ConfigService {
    path: PathBuf,
    settings: AppSettings,
    notifier: watch::Sender<AppSettings>,
}

impl ConfigService {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if its contents fail validation.
    pub fn load(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let settings = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| ConfigError::Serde {
                operation: "config.load",
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppSettings::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    operation: "config.load",
                    path,
                    source,
                });
            }
        };
        validate_settings(&settings)?;

        let (notifier, _) = watch::channel(settings.clone());
        Ok(Self {
            path,
            settings,
            notifier,
        })
    }

    /// Current settings document.
    #[must_use]
    pub const fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Path the settings are persisted to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Subscribe to settings changes. The receiver observes the document
    /// as of subscription time and every applied change afterwards.
    #[must_use]
    pub fn watch(&self) -> SettingsWatcher {
        self.notifier.subscribe()
    }

    /// Insert a new profile or replace the one sharing its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid, if its name collides
    /// with a different profile, or if persistence fails.
    pub fn upsert_server(&mut self, profile: ServerProfile) -> ConfigResult<()> {
        validate_profile(&profile)?;
        let mut next = self.settings.clone();
        match next.servers.iter_mut().find(|p| p.id == profile.id) {
            Some(slot) => *slot = profile.clone(),
            None => next.servers.push(profile.clone()),
        }
        validate_settings(&next)?;
        self.apply(next)?;
        info!(server = %profile.name, "server profile saved");
        Ok(())
    }

    /// Remove the profile with the given name, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownServer`] if no profile matches, or an
    /// error if persistence fails.
    pub fn remove_server(&mut self, name: &str) -> ConfigResult<ServerProfile> {
        let mut next = self.settings.clone();
        let index = next
            .servers
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| ConfigError::UnknownServer {
                name: name.to_owned(),
            })?;
        let removed = next.servers.remove(index);
        if next.default_server.as_deref() == Some(name) {
            next.default_server = None;
        }
        self.apply(next)?;
        info!(server = %name, "server profile removed");
        Ok(removed)
    }

    /// Set (or clear) the profile connected on startup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownServer`] if the named profile does
    /// not exist, or an error if persistence fails.
    pub fn set_default_server(&mut self, name: Option<String>) -> ConfigResult<()> {
        let mut next = self.settings.clone();
        next.default_server = name;
        validate_settings(&next)?;
        self.apply(next)
    }

    fn apply(&mut self, next: AppSettings) -> ConfigResult<()> {
        self.persist(&next)?;
        self.settings = next;
        let _ = self.notifier.send(self.settings.clone());
        Ok(())
    }

    fn persist(&self, settings: &AppSettings) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                    operation: "config.persist.mkdir",
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let payload =
            serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Serde {
                operation: "config.persist",
                source,
            })?;
        fs::write(&self.path, payload).map_err(|source| ConfigError::Io {
            operation: "config.persist.write",
            path: self.path.clone(),
            source,
        })
    }
}
