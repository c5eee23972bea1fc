//! LogOutput section: where status changes are logged.

#[cfg(test)]
use mockall::automock;

use crate::domain::error::{Field, FieldError};
use crate::domain::options::{AppOptions, LogOutputOptions};

const MISSING_DIRECTORY: &str = "The specified path does not exist.  Please enter a valid path.";

/// Answers whether a path names an existing directory.
///
/// This is the only question the validators ask of the outside world.  The
/// filesystem implementation lives in the application's infrastructure layer.
#[cfg_attr(test, automock)]
pub trait DirectoryProbe {
    fn is_directory(&self, path: &str) -> bool;
}

/// Outcome of a successful LogOutput validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutputSection {
    /// Logging is off.  Only the flag is written; the stored path is kept.
    Disabled,
    /// Logging is on and `path` exists.  Flag and path are written.
    Enabled { path: String },
}

impl LogOutputSection {
    pub fn apply(self, options: &mut AppOptions) {
        match self {
            Self::Disabled => options.log_output.enabled = false,
            Self::Enabled { path } => {
                options.log_output.enabled = true;
                options.log_output.path = path;
            }
        }
    }
}

/// Validates the LogOutput section of the display form.
///
/// The path is not inspected at all when logging is disabled.
///
/// # Errors
///
/// Returns a [`FieldError`] for [`Field::LogPath`] if logging is enabled and
/// the path is not an existing directory.
pub fn validate(
    form: &LogOutputOptions,
    probe: &dyn DirectoryProbe,
) -> Result<LogOutputSection, FieldError> {
    if !form.enabled {
        return Ok(LogOutputSection::Disabled);
    }

    if !probe.is_directory(&form.path) {
        return Err(FieldError::new(Field::LogPath, MISSING_DIRECTORY));
    }

    Ok(LogOutputSection::Enabled {
        path: form.path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Section;
    use mockall::predicate::eq;

    fn form(enabled: bool, path: &str) -> LogOutputOptions {
        LogOutputOptions {
            enabled,
            path: path.to_string(),
        }
    }

    #[test]
    fn test_disabled_never_probes_path() {
        // Arrange: any probe call would panic
        let mut probe = MockDirectoryProbe::new();
        probe.expect_is_directory().never();

        // Act
        let section = validate(&form(false, "/does/not/matter"), &probe);

        // Assert
        assert_eq!(section, Ok(LogOutputSection::Disabled));
    }

    #[test]
    fn test_enabled_with_existing_directory_is_enabled() {
        let mut probe = MockDirectoryProbe::new();
        probe
            .expect_is_directory()
            .with(eq("/var/log/vmping"))
            .times(1)
            .return_const(true);

        let section = validate(&form(true, "/var/log/vmping"), &probe);

        assert_eq!(
            section,
            Ok(LogOutputSection::Enabled {
                path: "/var/log/vmping".to_string()
            })
        );
    }

    #[test]
    fn test_enabled_with_missing_directory_blames_log_path() {
        let mut probe = MockDirectoryProbe::new();
        probe.expect_is_directory().return_const(false);

        let err = validate(&form(true, "/nope"), &probe).unwrap_err();

        assert_eq!(err.section, Section::LogOutput);
        assert_eq!(err.field, Field::LogPath);
        assert_eq!(err.message, MISSING_DIRECTORY);
    }

    #[test]
    fn test_disabled_apply_clears_flag_but_keeps_path() {
        let mut options = AppOptions::default();
        options.log_output = form(true, "/old/logs");

        LogOutputSection::Disabled.apply(&mut options);

        assert!(!options.log_output.enabled);
        assert_eq!(options.log_output.path, "/old/logs");
    }

    #[test]
    fn test_enabled_apply_writes_flag_and_path() {
        let mut options = AppOptions::default();

        LogOutputSection::Enabled {
            path: "/new/logs".to_string(),
        }
        .apply(&mut options);

        assert_eq!(options.log_output, form(true, "/new/logs"));
    }
}
