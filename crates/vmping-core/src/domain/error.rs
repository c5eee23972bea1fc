//! Field-located errors and normalization notes.
//!
//! The editor has two error tiers:
//!
//! - **Rejected** – a [`FieldError`] names exactly one field to focus.  The
//!   commit is blocked until the user corrects it.
//! - **Normalized** – a [`Normalization`] records that an out-of-range timing
//!   value was silently replaced.  It never blocks a commit; callers may choose
//!   to surface it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One independently validated group of fields.
///
/// Sections are always validated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    General,
    MailAlert,
    LogOutput,
}

impl Section {
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::MailAlert => "MailAlert",
            Self::LogOutput => "LogOutput",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An editable field the presentation layer can focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    PingInterval,
    PingTimeout,
    AlertThreshold,
    SmtpServer,
    SmtpPort,
    SmtpUser,
    Recipient,
    FromAddress,
    LogPath,
}

impl Field {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PingInterval => "PingInterval",
            Self::PingTimeout => "PingTimeout",
            Self::AlertThreshold => "AlertThreshold",
            Self::SmtpServer => "SmtpServer",
            Self::SmtpPort => "SmtpPort",
            Self::SmtpUser => "SmtpUser",
            Self::Recipient => "Recipient",
            Self::FromAddress => "FromAddress",
            Self::LogPath => "LogPath",
        }
    }

    /// The section this field belongs to.
    pub const fn section(self) -> Section {
        match self {
            Self::PingInterval | Self::PingTimeout | Self::AlertThreshold => Section::General,
            Self::SmtpServer
            | Self::SmtpPort
            | Self::SmtpUser
            | Self::Recipient
            | Self::FromAddress => Section::MailAlert,
            Self::LogPath => Section::LogOutput,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A hard validation failure blaming a single field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{section}.{field}: {message}")]
pub struct FieldError {
    pub section: Section,
    pub field: Field,
    pub message: String,
}

impl FieldError {
    /// Builds an error for `field`, deriving the section from the field.
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            section: field.section(),
            field,
            message: message.into(),
        }
    }
}

/// A timing value that was replaced instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    pub field: Field,
    /// The raw text as entered.
    pub entered: String,
    /// The canonical value stored instead (milliseconds, or a plain count for
    /// the alert threshold).
    pub applied: u64,
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:?} is out of range, using {}",
            self.field, self.entered, self.applied
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_new_derives_section() {
        // Arrange / Act
        let err = FieldError::new(Field::SmtpPort, "bad port");

        // Assert
        assert_eq!(err.section, Section::MailAlert);
        assert_eq!(err.field, Field::SmtpPort);
        assert_eq!(err.message, "bad port");
    }

    #[test]
    fn test_field_error_display_names_section_and_field() {
        let err = FieldError::new(Field::LogPath, "missing");
        assert_eq!(err.to_string(), "LogOutput.LogPath: missing");
    }

    #[test]
    fn test_general_fields_belong_to_general_section() {
        for field in [Field::PingInterval, Field::PingTimeout, Field::AlertThreshold] {
            assert_eq!(field.section(), Section::General);
        }
    }

    #[test]
    fn test_sections_order_general_mail_log() {
        // Validation order is declaration order.
        let mut sections = vec![Section::LogOutput, Section::General, Section::MailAlert];
        sections.sort_by_key(|s| *s as u8);
        assert_eq!(
            sections,
            vec![Section::General, Section::MailAlert, Section::LogOutput]
        );
    }

    #[test]
    fn test_normalization_display_mentions_entered_text() {
        let note = Normalization {
            field: Field::AlertThreshold,
            entered: "61".to_string(),
            applied: 1,
        };
        assert_eq!(note.to_string(), "AlertThreshold: \"61\" is out of range, using 1");
    }
}
