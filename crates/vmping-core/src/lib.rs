//! # vmping-core
//!
//! Shared library for the vmPing options editor containing the canonical
//! options model, the ping-interval unit rules, the editable display form and
//! the three section validators.
//!
//! This crate has zero dependencies on UI frameworks or storage backends.  The
//! only outside fact it ever asks about (whether a log directory exists) goes
//! through the [`validation::log_output::DirectoryProbe`] trait.
//!
//! # Architecture overview
//!
//! The options editor turns human-entered text into a validated
//! [`AppOptions`] record:
//!
//! ```text
//! AppOptions ──load──► DisplayOptions ──(user edits)──► validators ──► AppOptions
//! ```
//!
//! - **`domain`** – The canonical record, its defaults, the interval units and
//!   the field-located error type.
//!
//! - **`display`** – The transient text form shown while an edit session is
//!   open, plus the silent normalization of the numeric timing fields.
//!
//! - **`validation`** – One ordered, short-circuiting validator per section
//!   (General, MailAlert, LogOutput).  Each returns a tagged outcome that can
//!   later be applied to an [`AppOptions`]; none of them write anything.

pub mod display;
pub mod domain;
pub mod validation;

// Re-export the most-used types at the crate root so callers can write
// `vmping_core::AppOptions` instead of `vmping_core::domain::options::AppOptions`.
pub use display::{DisplayOptions, ParsedGeneral};
pub use domain::error::{Field, FieldError, Normalization, Section};
pub use domain::interval::{IntervalUnit, UnknownIntervalUnit};
pub use domain::options::{AppOptions, GeneralOptions, LogOutputOptions, MailAlertOptions};
pub use validation::log_output::{DirectoryProbe, LogOutputSection};
pub use validation::mail_alert::MailAlertSection;
