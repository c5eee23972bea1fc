//! Section validators.
//!
//! Each validator evaluates its rules in a fixed sequence and stops at the
//! first failure, reporting a [`FieldError`](crate::FieldError) that names the
//! field to focus.  A failed section is rejected as a whole; none of its
//! fields are applied.
//!
//! Validators never write.  They return a tagged outcome whose `apply` method
//! performs the writes, so the caller decides *when* each section lands in
//! the canonical record.
//!
//! # Sub-modules
//!
//! - **`general`**    – Non-empty checks on the timing text, then silent
//!   normalization.
//! - **`mail_alert`** – Server, port, recipient, sender and (conditionally)
//!   username checks when mail alerts are enabled.
//! - **`log_output`** – Directory existence check when log output is enabled.

pub mod general;
pub mod log_output;
pub mod mail_alert;
