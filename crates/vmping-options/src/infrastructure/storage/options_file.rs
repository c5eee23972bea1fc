//! TOML-based persistence for the canonical options.
//!
//! Reads and writes the options to the platform-appropriate file:
//! - Windows:  `%APPDATA%\vmPing\options.toml`
//! - Linux:    `~/.config/vmping/options.toml`
//! - macOS:    `~/Library/Application Support/vmPing/options.toml`
//!
//! ```toml
//! [app]
//! log_level = "info"
//!
//! [general]
//! ping_interval_ms = 300000
//! ping_timeout_ms = 2000
//! alert_threshold = 2
//!
//! [mail_alert]
//! enabled = false
//!
//! [log_output]
//! enabled = true
//! path = "/var/log/vmping"
//! ```
//!
//! Every table and key may be missing; absent values take their defaults, so
//! first runs and older files load cleanly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use vmping_core::{AppOptions, GeneralOptions, LogOutputOptions, MailAlertOptions};

use crate::application::store::{OptionsStore, PersistError};

const OPTIONS_FILE_NAME: &str = "options.toml";

/// Error type for options file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing options at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse options TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The options could not be serialized to TOML.
    #[error("failed to serialize options: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── File schema ───────────────────────────────────────────────────────────────

/// Settings about the editor process itself, not edited through sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    /// Schema version string – bump when breaking changes are introduced.
    #[serde(default = "default_version")]
    pub version: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// On-disk layout of the options file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionsFile {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub general: GeneralOptions,
    #[serde(default)]
    pub mail_alert: MailAlertOptions,
    #[serde(default)]
    pub log_output: LogOutputOptions,
}

fn default_version() -> String {
    "1.0".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            log_level: default_log_level(),
        }
    }
}

impl OptionsFile {
    fn into_parts(self) -> (AppSettings, AppOptions) {
        let options = AppOptions {
            general: self.general,
            mail_alert: self.mail_alert,
            log_output: self.log_output,
        };
        (self.app, options)
    }

    fn from_parts(app: &AppSettings, options: &AppOptions) -> Self {
        Self {
            app: app.clone(),
            general: options.general.clone(),
            mail_alert: options.mail_alert.clone(),
            log_output: options.log_output.clone(),
        }
    }
}

// ── File access ───────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the options file.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn options_dir() -> Result<PathBuf, StorageError> {
    platform_config_dir().ok_or(StorageError::NoPlatformConfigDir)
}

/// Resolves the full path to the default options file.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn options_file_path() -> Result<PathBuf, StorageError> {
    Ok(options_dir()?.join(OPTIONS_FILE_NAME))
}

/// Loads the options file at `path`, returning defaults if it does not exist.
///
/// # Errors
///
/// Returns [`StorageError::Io`] for file-system errors other than "not
/// found", and [`StorageError::Parse`] if the TOML is malformed.
pub fn load_options_file(path: &Path) -> Result<OptionsFile, StorageError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no options file yet, using defaults");
            Ok(OptionsFile::default())
        }
        Err(e) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes `file` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`StorageError::Io`] for file-system failures or
/// [`StorageError::Serialize`] if serialization fails.
pub fn save_options_file(path: &Path, file: &OptionsFile) -> Result<(), StorageError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(file)?;
    std::fs::write(path, content).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// An [`OptionsStore`] backed by a TOML file.
///
/// The file is read once on [`open`](Self::open) and rewritten on every
/// [`flush`](OptionsStore::flush).
#[derive(Debug)]
pub struct TomlOptionsStore {
    path: PathBuf,
    app: AppSettings,
    options: AppOptions,
}

impl TomlOptionsStore {
    /// Opens the store at `path`.
    ///
    /// # Errors
    ///
    /// See [`load_options_file`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let (app, options) = load_options_file(&path)?.into_parts();
        info!(path = %path.display(), "options loaded");
        Ok(Self { path, app, options })
    }

    /// Opens the store at the platform default location.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoPlatformConfigDir`] or any error from
    /// [`load_options_file`].
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(options_file_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn app_settings(&self) -> &AppSettings {
        &self.app
    }
}

impl OptionsStore for TomlOptionsStore {
    fn options(&self) -> &AppOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut AppOptions {
        &mut self.options
    }

    fn flush(&mut self) -> Result<(), PersistError> {
        let file = OptionsFile::from_parts(&self.app, &self.options);
        save_options_file(&self.path, &file).map_err(|e| PersistError(e.to_string()))?;
        info!(path = %self.path.display(), "options saved");
        Ok(())
    }
}

/// Resolves the platform config base directory for vmPing.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("vmPing"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("vmping"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("vmPing")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("vmping_store_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_options_file_default_has_info_log_level() {
        let file = OptionsFile::default();
        assert_eq!(file.app.log_level, "info");
        assert_eq!(file.app.version, "1.0");
    }

    #[test]
    fn test_deserialize_minimal_toml_uses_defaults() {
        // Arrange
        let toml_str = r#"
[app]
[general]
"#;

        // Act
        let file: OptionsFile = toml::from_str(toml_str).expect("deserialize minimal");

        // Assert
        assert_eq!(file, OptionsFile::default());
    }

    #[test]
    fn test_deserialize_partial_sections_override_defaults() {
        let toml_str = r#"
[app]
log_level = "debug"

[mail_alert]
enabled = true
smtp_server = "smtp.example.com"
"#;

        let file: OptionsFile = toml::from_str(toml_str).expect("deserialize partial");

        assert_eq!(file.app.log_level, "debug");
        assert!(file.mail_alert.enabled);
        assert_eq!(file.mail_alert.smtp_server, "smtp.example.com");
        assert!(file.mail_alert.smtp_port.is_empty());
        assert_eq!(file.general, GeneralOptions::default());
    }

    #[test]
    fn test_deserialize_invalid_toml_returns_parse_error() {
        // Arrange
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(OPTIONS_FILE_NAME);
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        // Act
        let result = load_options_file(&path);

        // Assert
        assert!(matches!(result, Err(StorageError::Parse(_))));

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_returns_default_when_file_absent() {
        let path = scratch_dir().join(OPTIONS_FILE_NAME);
        let file = load_options_file(&path).expect("missing file is not an error");
        assert_eq!(file, OptionsFile::default());
    }

    #[test]
    fn test_store_flush_creates_directory_and_round_trips() {
        // Arrange
        let dir = scratch_dir();
        let path = dir.join("nested").join(OPTIONS_FILE_NAME);
        let mut store = TomlOptionsStore::open(&path).expect("open");
        store.options_mut().general.ping_interval_ms = 600_000;
        store.options_mut().log_output.path = "/var/log/vmping".to_string();

        // Act
        store.flush().expect("flush");
        let reopened = TomlOptionsStore::open(&path).expect("reopen");

        // Assert
        assert_eq!(reopened.options(), store.options());
        assert_eq!(reopened.app_settings(), &AppSettings::default());

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_store_flush_keeps_app_settings() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(OPTIONS_FILE_NAME);
        std::fs::write(&path, "[app]\nlog_level = \"trace\"\n").unwrap();

        let mut store = TomlOptionsStore::open(&path).expect("open");
        store.options_mut().general.alert_threshold = 5;
        store.flush().expect("flush");
        let reopened = TomlOptionsStore::open(&path).expect("reopen");

        assert_eq!(reopened.app_settings().log_level, "trace");
        assert_eq!(reopened.options().general.alert_threshold, 5);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_store_flush_into_unwritable_location_is_persist_error() {
        // Arrange: after opening, the parent "directory" becomes a regular file
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        let mut store = TomlOptionsStore::open(blocker.join(OPTIONS_FILE_NAME)).expect("open");
        std::fs::write(&blocker, b"x").unwrap();

        // Act
        let result = store.flush();

        // Assert
        assert!(result.is_err());

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_options_file_path_ends_with_options_toml() {
        if let Ok(path) = options_file_path() {
            assert!(
                path.ends_with(OPTIONS_FILE_NAME),
                "options file must be named options.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. in a stripped CI env) is also acceptable.
    }
}
