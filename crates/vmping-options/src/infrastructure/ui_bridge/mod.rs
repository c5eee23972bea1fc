//! Command bridge: exposes the options editor to a presentation layer.
//!
//! The form that draws the options window is an external collaborator.  It
//! talks to the pipeline through these commands, exchanging JSON-serialisable
//! DTOs instead of the internal types.
//!
//! # `CommandResult<T>` wrapper
//!
//! Every command returns `CommandResult<T>` so every response has the same
//! shape: `{ success: bool, data: T | null, error: string | null }`.
//!
//! A *validation* failure is not a command failure: `save_options` reports it
//! with `success: true` and a `field_error` in the data, so the form can focus
//! the named field and keep the window open.

use serde::{Deserialize, Serialize};
use vmping_core::{
    DirectoryProbe, DisplayOptions, FieldError, LogOutputOptions, MailAlertOptions, Normalization,
};

use crate::application::commit::{CommitCoordinator, CommitError, CommitPolicy};
use crate::application::edit_session::EditorSlot;
use crate::application::store::OptionsStore;

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// The full options form as exchanged with the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptionsDto {
    pub ping_interval: String,
    /// `"Seconds"`, `"Minutes"` or `"Hours"`.  Anything else is read as seconds.
    pub ping_interval_unit: String,
    pub ping_timeout: String,
    pub alert_threshold: String,
    pub email_alert_enabled: bool,
    pub email_auth_required: bool,
    pub smtp_server: String,
    pub smtp_port: String,
    pub smtp_user: String,
    pub smtp_password: String,
    pub email_recipient: String,
    pub email_from_address: String,
    pub log_output_enabled: bool,
    pub log_path: String,
}

impl From<&DisplayOptions> for OptionsDto {
    fn from(d: &DisplayOptions) -> Self {
        Self {
            ping_interval: d.ping_interval.clone(),
            ping_interval_unit: d.ping_interval_unit.to_string(),
            ping_timeout: d.ping_timeout.clone(),
            alert_threshold: d.alert_threshold.clone(),
            email_alert_enabled: d.mail_alert.enabled,
            email_auth_required: d.mail_alert.auth_required,
            smtp_server: d.mail_alert.smtp_server.clone(),
            smtp_port: d.mail_alert.smtp_port.clone(),
            smtp_user: d.mail_alert.smtp_user.clone(),
            smtp_password: d.mail_alert.smtp_password.clone(),
            email_recipient: d.mail_alert.recipient.clone(),
            email_from_address: d.mail_alert.from_address.clone(),
            log_output_enabled: d.log_output.enabled,
            log_path: d.log_output.path.clone(),
        }
    }
}

impl From<OptionsDto> for DisplayOptions {
    fn from(dto: OptionsDto) -> Self {
        Self {
            ping_interval: dto.ping_interval,
            ping_interval_unit: dto.ping_interval_unit.parse().unwrap_or_default(),
            ping_timeout: dto.ping_timeout,
            alert_threshold: dto.alert_threshold,
            mail_alert: MailAlertOptions {
                enabled: dto.email_alert_enabled,
                auth_required: dto.email_auth_required,
                smtp_server: dto.smtp_server,
                smtp_port: dto.smtp_port,
                smtp_user: dto.smtp_user,
                smtp_password: dto.smtp_password,
                recipient: dto.email_recipient,
                from_address: dto.email_from_address,
            },
            log_output: LogOutputOptions {
                enabled: dto.log_output_enabled,
                path: dto.log_path,
            },
        }
    }
}

/// The field the UI should focus, and why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldErrorDto {
    pub section: String,
    pub field: String,
    pub message: String,
}

impl From<&FieldError> for FieldErrorDto {
    fn from(e: &FieldError) -> Self {
        Self {
            section: e.section.to_string(),
            field: e.field.to_string(),
            message: e.message.clone(),
        }
    }
}

/// A timing value that was replaced on save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizationDto {
    pub field: String,
    pub entered: String,
    pub applied: u64,
}

impl From<&Normalization> for NormalizationDto {
    fn from(n: &Normalization) -> Self {
        Self {
            field: n.field.to_string(),
            entered: n.entered.clone(),
            applied: n.applied,
        }
    }
}

/// Result of a save attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcomeDto {
    /// `true` when the options were committed and the window may close.
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_error: Option<FieldErrorDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub normalized: Vec<NormalizationDto>,
}

/// Unified response wrapper used by every command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns the current options as a display form.
pub fn get_options<S: OptionsStore + ?Sized>(store: &S) -> CommandResult<OptionsDto> {
    let display = DisplayOptions::load(store.options());
    CommandResult::ok(OptionsDto::from(&display))
}

/// Opens a session, applies the submitted form and commits it.
///
/// The session lives only for this call; a rejected form is reported in the
/// returned data and the UI resubmits after correcting it.
pub fn save_options<S: OptionsStore + ?Sized>(
    slot: &mut EditorSlot,
    store: &mut S,
    probe: &dyn DirectoryProbe,
    form: OptionsDto,
    policy: CommitPolicy,
) -> CommandResult<SaveOutcomeDto> {
    let mut session = slot.open(&*store);
    *session.display_mut() = DisplayOptions::from(form);

    match session.commit(&CommitCoordinator::new(policy), store, probe) {
        Ok(report) => CommandResult::ok(SaveOutcomeDto {
            saved: true,
            field_error: None,
            normalized: report.normalized.iter().map(NormalizationDto::from).collect(),
        }),
        Err(rejected) => match &rejected.error {
            CommitError::Rejected(field_error) => CommandResult::ok(SaveOutcomeDto {
                saved: false,
                field_error: Some(FieldErrorDto::from(field_error)),
                normalized: Vec::new(),
            }),
            CommitError::Persist(e) => CommandResult::err(e.to_string()),
        },
    }
}

/// Applies the from-address rule after the recipient field loses focus.
pub fn complete_from_address(form: OptionsDto) -> CommandResult<OptionsDto> {
    let mut display = DisplayOptions::from(form);
    display.recipient_focus_lost();
    CommandResult::ok(OptionsDto::from(&display))
}
