//! General section: ping interval, ping timeout and alert threshold.
//!
//! The only hard rule is that none of the three texts is empty.  Anything
//! else that is wrong with them is fixed by silent normalization in
//! [`DisplayOptions::parse_general`].

use crate::display::{DisplayOptions, ParsedGeneral};
use crate::domain::error::{Field, FieldError};

const EMPTY_INTERVAL: &str = "Please enter a valid ping interval.";
const EMPTY_TIMEOUT: &str = "Please enter a valid ping timeout.";
const EMPTY_THRESHOLD: &str = "Please enter an alert threshold.";

/// Validates and normalizes the General section.
///
/// Emptiness is tested on the raw text, so a lone space is *not* empty; it
/// passes here and is then normalized to the fallback value.
///
/// # Errors
///
/// Returns a [`FieldError`] for the first empty field, checked in the order
/// interval, timeout, threshold.
pub fn validate(display: &DisplayOptions) -> Result<ParsedGeneral, FieldError> {
    let required = [
        (Field::PingInterval, &display.ping_interval, EMPTY_INTERVAL),
        (Field::PingTimeout, &display.ping_timeout, EMPTY_TIMEOUT),
        (Field::AlertThreshold, &display.alert_threshold, EMPTY_THRESHOLD),
    ];

    if let Some((field, _, message)) = required.iter().find(|(_, text, _)| text.is_empty()) {
        return Err(FieldError::new(*field, *message));
    }

    Ok(display.parse_general())
}
