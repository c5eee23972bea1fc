//! The editable display form.
//!
//! [`DisplayOptions`] mirrors [`AppOptions`] as text and booleans, plus the
//! unit the ping interval is shown in.  It lives only for one edit session and
//! enforces nothing itself; only the result of parsing it is checked.
//!
//! The mail and log sections are already text, so the form edits copies of
//! [`MailAlertOptions`] and [`LogOutputOptions`] directly.

use crate::domain::error::{Field, Normalization};
use crate::domain::interval::IntervalUnit;
use crate::domain::options::{
    AppOptions, GeneralOptions, LogOutputOptions, MailAlertOptions, ALERT_THRESHOLD_FALLBACK,
    DEFAULT_PING_INTERVAL_MS, DEFAULT_PING_TIMEOUT_MS, MAX_ALERT_THRESHOLD, MAX_INTERVAL_COUNT,
    MAX_TIMEOUT_SECS,
};
use crate::validation::mail_alert::derive_from_address;

const MS_PER_SECOND: u64 = 1_000;

/// Text form of the options, as shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Interval count in [`Self::ping_interval_unit`].
    pub ping_interval: String,
    pub ping_interval_unit: IntervalUnit,
    /// Timeout in whole seconds.
    pub ping_timeout: String,
    pub alert_threshold: String,
    pub mail_alert: MailAlertOptions,
    pub log_output: LogOutputOptions,
}

/// General timing values after silent normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGeneral {
    pub options: GeneralOptions,
    /// Every field that was replaced by a fallback, in field order.
    pub normalized: Vec<Normalization>,
}

impl ParsedGeneral {
    /// Writes the timing values into `options`, returning the normalization notes.
    pub fn apply(self, options: &mut AppOptions) -> Vec<Normalization> {
        options.general = self.options;
        self.normalized
    }
}

impl DisplayOptions {
    /// Builds the display form for `options`.
    ///
    /// The interval is shown in the coarsest unit that divides it evenly and
    /// the timeout in seconds.  Everything else is copied verbatim.
    pub fn load(options: &AppOptions) -> Self {
        let general = &options.general;
        let unit = IntervalUnit::select(general.ping_interval_ms);

        Self {
            ping_interval: (general.ping_interval_ms / unit.multiplier()).to_string(),
            ping_interval_unit: unit,
            ping_timeout: (general.ping_timeout_ms / MS_PER_SECOND).to_string(),
            alert_threshold: general.alert_threshold.to_string(),
            mail_alert: options.mail_alert.clone(),
            log_output: options.log_output.clone(),
        }
    }

    /// Converts the timing text into canonical values.
    ///
    /// Never fails.  Each field is checked independently; a value that does
    /// not parse or is out of range is replaced and noted:
    ///
    /// | Field     | Accepted  | Stored           | Fallback                  |
    /// |-----------|-----------|------------------|---------------------------|
    /// | interval  | 1..=86400 | × unit multiplier | `DEFAULT_PING_INTERVAL_MS` |
    /// | timeout   | 1..=60    | × 1000           | `DEFAULT_PING_TIMEOUT_MS`  |
    /// | threshold | 1..=60    | as is            | `1`                       |
    pub fn parse_general(&self) -> ParsedGeneral {
        let mut normalized = Vec::new();

        let ping_interval_ms = match parse_count(&self.ping_interval, MAX_INTERVAL_COUNT) {
            Some(count) => count * self.ping_interval_unit.multiplier(),
            None => {
                normalized.push(note(
                    Field::PingInterval,
                    &self.ping_interval,
                    DEFAULT_PING_INTERVAL_MS,
                ));
                DEFAULT_PING_INTERVAL_MS
            }
        };

        let ping_timeout_ms = match parse_count(&self.ping_timeout, MAX_TIMEOUT_SECS) {
            Some(secs) => secs * MS_PER_SECOND,
            None => {
                normalized.push(note(
                    Field::PingTimeout,
                    &self.ping_timeout,
                    DEFAULT_PING_TIMEOUT_MS,
                ));
                DEFAULT_PING_TIMEOUT_MS
            }
        };

        let alert_threshold = parse_count(&self.alert_threshold, u64::from(MAX_ALERT_THRESHOLD))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or_else(|| {
                normalized.push(note(
                    Field::AlertThreshold,
                    &self.alert_threshold,
                    u64::from(ALERT_THRESHOLD_FALLBACK),
                ));
                ALERT_THRESHOLD_FALLBACK
            });

        ParsedGeneral {
            options: GeneralOptions {
                ping_interval_ms,
                ping_timeout_ms,
                alert_threshold,
            },
            normalized,
        }
    }

    /// Applies the from-address convenience rule after the recipient field
    /// loses focus.  Returns `true` if the from-address was filled in.
    pub fn recipient_focus_lost(&mut self) -> bool {
        match derive_from_address(&self.mail_alert.recipient, &self.mail_alert.from_address) {
            Some(from) => {
                self.mail_alert.from_address = from;
                true
            }
            None => false,
        }
    }
}

/// Parses a whole number in `1..=max`.  Surrounding whitespace and a leading
/// sign are tolerated.
fn parse_count(text: &str, max: u64) -> Option<u64> {
    let value: i64 = text.trim().parse().ok()?;
    u64::try_from(value).ok().filter(|v| (1..=max).contains(v))
}

fn note(field: Field, entered: &str, applied: u64) -> Normalization {
    tracing::debug!(%field, entered, applied, "normalized out-of-range value");
    Normalization {
        field,
        entered: entered.to_string(),
        applied,
    }
}
