//! CommitCoordinator: validates the edited form and writes it to the store.
//!
//! Sections are always validated in the fixed order General, MailAlert,
//! LogOutput, and the first failure aborts the commit: later sections are not
//! evaluated and the [`FieldError`] is returned to the caller.
//!
//! # Write discipline
//!
//! [`CommitPolicy`] selects when validated sections reach the store:
//!
//! ```text
//! Atomic      validate G ─► validate M ─► validate L ─► write G, M, L ─► flush
//! Sequential  validate G ─► write G ─► validate M ─► write M ─► validate L ─► write L ─► flush
//!                                         │                  │
//!                                      rejected ─► flush   rejected ─► flush
//! ```
//!
//! Under `Atomic` (the default) a rejected commit leaves the store exactly as
//! it was.  `Sequential` reproduces the legacy editor: a failure in a later
//! section leaves the earlier sections already written, and flushed.

use thiserror::Error;
use tracing::{debug, info, warn};
use vmping_core::validation::{general, log_output, mail_alert};
use vmping_core::{DirectoryProbe, DisplayOptions, FieldError, Normalization, Section};

use super::store::{OptionsStore, PersistError};

/// When validated sections are written to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Validate every section first; write all of them only if all pass.
    #[default]
    Atomic,
    /// Write each section as soon as it passes.
    Sequential,
}

/// Error type for commit operations.
#[derive(Debug, Error, PartialEq)]
pub enum CommitError {
    /// A section rule failed.  Under [`CommitPolicy::Sequential`] the sections
    /// before it were written and flushed; otherwise nothing was.
    #[error(transparent)]
    Rejected(#[from] FieldError),
    /// Every section passed and was applied, but the store could not persist.
    #[error("options were applied but not saved: {0}")]
    Persist(#[from] PersistError),
}

impl CommitError {
    /// The field to focus, if this is a validation failure.
    pub fn field_error(&self) -> Option<&FieldError> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Persist(_) => None,
        }
    }
}

/// What a successful commit did besides writing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Timing values that were silently replaced.
    pub normalized: Vec<Normalization>,
}

/// Drives the three section validators and the store writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitCoordinator {
    policy: CommitPolicy,
}

impl CommitCoordinator {
    pub fn new(policy: CommitPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    /// Validates `display` and writes it to `store`.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::Rejected`] for the first failing rule, or
    /// [`CommitError::Persist`] if the store cannot be flushed.  A sequential
    /// commit that fails to flush its partial write reports `Persist`.
    pub fn commit<S: OptionsStore + ?Sized>(
        &self,
        display: &DisplayOptions,
        store: &mut S,
        probe: &dyn DirectoryProbe,
    ) -> Result<CommitReport, CommitError> {
        let normalized = match self.policy {
            CommitPolicy::Atomic => commit_atomic(display, store, probe)?,
            CommitPolicy::Sequential => commit_sequential(display, store, probe)?,
        };

        for note in &normalized {
            warn!(%note, "timing value normalized");
        }

        store.flush()?;
        info!(
            policy = ?self.policy,
            normalized = normalized.len(),
            "options committed"
        );
        Ok(CommitReport { normalized })
    }
}

fn commit_atomic<S: OptionsStore + ?Sized>(
    display: &DisplayOptions,
    store: &mut S,
    probe: &dyn DirectoryProbe,
) -> Result<Vec<Normalization>, FieldError> {
    let general = checked(Section::General, general::validate(display))?;
    let mail = checked(Section::MailAlert, mail_alert::validate(&display.mail_alert))?;
    let log = checked(
        Section::LogOutput,
        log_output::validate(&display.log_output, probe),
    )?;

    let options = store.options_mut();
    let normalized = general.apply(options);
    mail.apply(options);
    log.apply(options);
    Ok(normalized)
}

fn commit_sequential<S: OptionsStore + ?Sized>(
    display: &DisplayOptions,
    store: &mut S,
    probe: &dyn DirectoryProbe,
) -> Result<Vec<Normalization>, CommitError> {
    let normalized =
        checked(Section::General, general::validate(display))?.apply(store.options_mut());

    let rest = checked(Section::MailAlert, mail_alert::validate(&display.mail_alert))
        .map(|mail| mail.apply(store.options_mut()))
        .and_then(|()| {
            checked(
                Section::LogOutput,
                log_output::validate(&display.log_output, probe),
            )
        })
        .map(|log| log.apply(store.options_mut()));

    match rest {
        Ok(()) => Ok(normalized),
        Err(err) => {
            // General (and MailAlert, if it passed) is already written.
            store.flush()?;
            debug!(field = %err.field, "partial sequential commit flushed");
            Err(err.into())
        }
    }
}

/// Logs a section result on its way through.
fn checked<T>(section: Section, result: Result<T, FieldError>) -> Result<T, FieldError> {
    match &result {
        Ok(_) => debug!(%section, "section passed"),
        Err(err) => {
            debug!(%section, field = %err.field, message = %err.message, "section rejected")
        }
    }
    result
}
