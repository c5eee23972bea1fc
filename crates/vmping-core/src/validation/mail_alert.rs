//! MailAlert section: outbound mail alerting.
//!
//! Rules only run when alerts are enabled.  In that case they are checked in
//! this order and the first failure wins:
//!
//! 1. server is non-empty
//! 2. port is non-empty and all digits (one trailing newline is tolerated)
//! 3. recipient is non-empty
//! 4. from-address is non-empty
//! 5. username is non-empty, if authentication is required
//!
//! When alerts are disabled the section succeeds without reading or writing
//! any mail setting; the stored values (the enabled flag included) stay as
//! they were.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::{Field, FieldError};
use crate::domain::options::{AppOptions, MailAlertOptions};

const SENDER_PREFIX: &str = "vmPing";

const BAD_SERVER: &str = "Please enter a valid address for your outgoing mail server.";
const BAD_PORT: &str = "Please enter a valid port number.  The standard is 25.";
const BAD_RECIPIENT: &str =
    "Please enter a valid recipient email address.  This is the address that will receive alerts.";
const BAD_FROM: &str = "Please enter a valid 'from' address.  This address will appear as the sender for any alerts that are sent.";
const BAD_USER: &str = "Please enter a valid username for authenticating to your mail server.";

// One trailing newline is accepted, as `$` allows in most regex dialects.
static PORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\n?\z").expect("port pattern is a valid regex"));

/// Outcome of a successful MailAlert validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailAlertSection {
    /// Alerts are off; nothing is written.
    Disabled,
    /// Alerts are on and every rule passed.  All fields are written.
    Enabled(MailAlertOptions),
}

impl MailAlertSection {
    pub fn apply(self, options: &mut AppOptions) {
        if let Self::Enabled(mail) = self {
            options.mail_alert = mail;
        }
    }
}

/// Validates the MailAlert section of the display form.
///
/// # Errors
///
/// Returns a [`FieldError`] naming the first field that breaks a rule.
pub fn validate(form: &MailAlertOptions) -> Result<MailAlertSection, FieldError> {
    if !form.enabled {
        return Ok(MailAlertSection::Disabled);
    }

    if form.smtp_server.is_empty() {
        return Err(FieldError::new(Field::SmtpServer, BAD_SERVER));
    }
    if !PORT_PATTERN.is_match(&form.smtp_port) {
        return Err(FieldError::new(Field::SmtpPort, BAD_PORT));
    }
    if form.recipient.is_empty() {
        return Err(FieldError::new(Field::Recipient, BAD_RECIPIENT));
    }
    if form.from_address.is_empty() {
        return Err(FieldError::new(Field::FromAddress, BAD_FROM));
    }
    if form.auth_required && form.smtp_user.is_empty() {
        return Err(FieldError::new(Field::SmtpUser, BAD_USER));
    }

    Ok(MailAlertSection::Enabled(form.clone()))
}

/// Suggests a from-address when the recipient field loses focus.
///
/// Returns `Some("vmPing" + <recipient from the first '@'>)` when `from` is
/// still empty and `recipient` contains an `@`; otherwise `None`.
pub fn derive_from_address(recipient: &str, from: &str) -> Option<String> {
    if !from.is_empty() {
        return None;
    }
    recipient
        .find('@')
        .map(|at| format!("{SENDER_PREFIX}{}", &recipient[at..]))
}
