//! The canonical options record.
//!
//! [`AppOptions`] is the validated, unit-normalized form of every setting the
//! options editor manages.  Millisecond values are stored as `u64`: the
//! largest accepted interval (86400 hours) is 311 040 000 000 ms, which does
//! not fit in 32 bits.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent.  This lets a persisted record load
//! on first run and when an older file is missing newer fields.

use serde::{Deserialize, Serialize};

/// Interval used when the entered interval is missing or out of range.
pub const DEFAULT_PING_INTERVAL_MS: u64 = 2_000;
/// Timeout used when the entered timeout is missing or out of range.
pub const DEFAULT_PING_TIMEOUT_MS: u64 = 2_000;
/// Alert threshold for a freshly created record.
pub const DEFAULT_ALERT_THRESHOLD: u32 = 2;
/// Threshold substituted for invalid input.  Deliberately not the default.
pub const ALERT_THRESHOLD_FALLBACK: u32 = 1;

/// Largest interval count accepted in any unit.
pub const MAX_INTERVAL_COUNT: u64 = 86_400;
/// Largest timeout accepted, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 60;
/// Largest alert threshold accepted.
pub const MAX_ALERT_THRESHOLD: u32 = 60;

// ── Options schema types ──────────────────────────────────────────────────────

/// Top-level canonical options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppOptions {
    #[serde(default)]
    pub general: GeneralOptions,
    #[serde(default)]
    pub mail_alert: MailAlertOptions,
    #[serde(default)]
    pub log_output: LogOutputOptions,
}

/// Ping timing and alerting threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralOptions {
    /// Delay between pings, in milliseconds.
    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,
    /// Time to wait for a reply, in milliseconds.
    #[serde(default = "default_ping_timeout_ms")]
    pub ping_timeout_ms: u64,
    /// Consecutive failures before a host is reported down.
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u32,
}

/// Outbound mail alerting.
///
/// The password is kept as plaintext; the editor shows it as stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MailAlertOptions {
    pub enabled: bool,
    pub auth_required: bool,
    pub smtp_server: String,
    /// Kept as text: the editor accepts it as typed once it is all digits.
    pub smtp_port: String,
    pub smtp_user: String,
    pub smtp_password: String,
    pub recipient: String,
    pub from_address: String,
}

/// Status change log output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogOutputOptions {
    pub enabled: bool,
    /// Directory the log files are written to.
    pub path: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_ping_interval_ms() -> u64 {
    DEFAULT_PING_INTERVAL_MS
}
fn default_ping_timeout_ms() -> u64 {
    DEFAULT_PING_TIMEOUT_MS
}
fn default_alert_threshold() -> u32 {
    DEFAULT_ALERT_THRESHOLD
}

impl Default for GeneralOptions {
    fn default() -> Self {
        Self {
            ping_interval_ms: default_ping_interval_ms(),
            ping_timeout_ms: default_ping_timeout_ms(),
            alert_threshold: default_alert_threshold(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
