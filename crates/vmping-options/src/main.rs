//! vmPing options editor: command-line front end.
//!
//! Drives one edit session against the options file: `show` prints the
//! display form, `set` edits fields on top of it and commits.
//!
//! # Usage
//!
//! ```text
//! vmping-options [--options-file <PATH>] show [--json]
//! vmping-options [--options-file <PATH>] set [--interval <N>] [--unit <UNIT>] ...
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Default                            | Description          |
//! |-----------------------|------------------------------------|----------------------|
//! | `VMPING_OPTIONS_FILE` | `<platform config>/options.toml`   | Options file to edit |
//! | `RUST_LOG`            | `[app] log_level` from the file    | Log filter           |
//!
//! Until the options file is read, logging runs at `info`.
//!
//! A rejected `set` prints `Section.Field: message` and exits with status 2.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use tracing_subscriber::{EnvFilter, Registry};

use vmping_core::{DisplayOptions, IntervalUnit};
use vmping_options::application::commit::{CommitCoordinator, CommitError, CommitPolicy};
use vmping_options::application::edit_session::EditorSlot;
use vmping_options::infrastructure::filesystem::FsDirectoryProbe;
use vmping_options::infrastructure::storage::options_file::{options_file_path, TomlOptionsStore};
use vmping_options::infrastructure::ui_bridge::OptionsDto;

const EXIT_REJECTED: u8 = 2;
const BOOTSTRAP_LOG_LEVEL: &str = "info";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Edit vmPing's ping, mail alert and log output options.
#[derive(Debug, Parser)]
#[command(name = "vmping-options", version)]
struct Cli {
    /// Options file to read and write.
    #[arg(long, env = "VMPING_OPTIONS_FILE")]
    options_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the options as the editor shows them.
    Show {
        /// Print the form as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Edit options and commit them.
    Set(SetArgs),
}

/// Field edits.  Omitted flags keep the value currently shown.
#[derive(Debug, Args)]
struct SetArgs {
    /// Ping interval, counted in --unit.
    #[arg(long)]
    interval: Option<String>,
    /// Unit of --interval: Seconds, Minutes or Hours.
    #[arg(long)]
    unit: Option<IntervalUnit>,
    /// Ping timeout in seconds.
    #[arg(long)]
    timeout: Option<String>,
    /// Consecutive failures before alerting.
    #[arg(long)]
    threshold: Option<String>,

    #[arg(long)]
    email_alerts: Option<bool>,
    #[arg(long)]
    smtp_auth: Option<bool>,
    #[arg(long)]
    smtp_server: Option<String>,
    #[arg(long)]
    smtp_port: Option<String>,
    #[arg(long)]
    smtp_user: Option<String>,
    #[arg(long)]
    smtp_password: Option<String>,
    /// Alert recipient.  Also fills an empty --from as vmPing@<domain>.
    #[arg(long)]
    recipient: Option<String>,
    #[arg(long)]
    from: Option<String>,

    #[arg(long)]
    log_output: Option<bool>,
    /// Existing directory for log files.
    #[arg(long)]
    log_path: Option<String>,

    /// Write each section as soon as it passes, like the legacy editor.
    #[arg(long)]
    sequential: bool,
}

impl SetArgs {
    fn policy(&self) -> CommitPolicy {
        if self.sequential {
            CommitPolicy::Sequential
        } else {
            CommitPolicy::Atomic
        }
    }

    /// Applies the edits in form order, as a user tabbing through would.
    fn apply_to(self, display: &mut DisplayOptions) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut display.ping_interval, self.interval);
        set(&mut display.ping_interval_unit, self.unit);
        set(&mut display.ping_timeout, self.timeout);
        set(&mut display.alert_threshold, self.threshold);

        let mail = &mut display.mail_alert;
        set(&mut mail.enabled, self.email_alerts);
        set(&mut mail.auth_required, self.smtp_auth);
        set(&mut mail.smtp_server, self.smtp_server);
        set(&mut mail.smtp_port, self.smtp_port);
        set(&mut mail.smtp_user, self.smtp_user);
        set(&mut mail.smtp_password, self.smtp_password);
        set(&mut mail.from_address, self.from);
        if let Some(recipient) = self.recipient {
            mail.recipient = recipient;
            display.recipient_focus_lost();
        }

        set(&mut display.log_output.enabled, self.log_output);
        set(&mut display.log_output.path, self.log_path);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let file_log_level = init_logging();

    let path = match cli.options_file {
        Some(path) => path,
        None => options_file_path()
            .context("no --options-file given and no platform config directory")?,
    };
    let mut store = TomlOptionsStore::open(&path)
        .with_context(|| format!("failed to open options file {}", path.display()))?;

    if let Some(handle) = file_log_level {
        let level = &store.app_settings().log_level;
        handle
            .reload(EnvFilter::new(level))
            .with_context(|| format!("failed to apply log level {level:?}"))?;
    }
    info!(path = %store.path().display(), "vmping-options starting");

    let mut slot = EditorSlot::new();
    let mut session = slot.open(&store);

    match cli.command {
        Command::Show { json } => {
            let dto = OptionsDto::from(session.display());
            if json {
                println!("{}", serde_json::to_string_pretty(&dto)?);
            } else {
                print_table(&dto);
            }
            session.cancel();
            Ok(ExitCode::SUCCESS)
        }
        Command::Set(args) => {
            let coordinator = CommitCoordinator::new(args.policy());
            args.apply_to(session.display_mut());

            match session.commit(&coordinator, &mut store, &FsDirectoryProbe) {
                Ok(report) => {
                    for note in &report.normalized {
                        eprintln!("note: {note}");
                    }
                    println!("options saved to {}", store.path().display());
                    Ok(ExitCode::SUCCESS)
                }
                Err(rejected) => match rejected.error {
                    CommitError::Rejected(field_error) => {
                        eprintln!("{field_error}");
                        Ok(ExitCode::from(EXIT_REJECTED))
                    }
                    CommitError::Persist(e) => {
                        Err(e).with_context(|| format!("failed to save {}", store.path().display()))
                    }
                },
            }
        }
    }
}

/// Installs the stderr subscriber.
///
/// Logs go to stderr so `show --json` output stays parseable.  Returns a
/// handle for swapping in the options file's level, or `None` when
/// `RUST_LOG` is set and takes precedence.
fn init_logging() -> Option<reload::Handle<EnvFilter, Registry>> {
    let (initial, follows_file) = initial_filter(EnvFilter::try_from_default_env().ok());
    let (filter, handle) = reload::Layer::new(initial);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    follows_file.then_some(handle)
}

/// The filter to log with before the options file is read, and whether the
/// file's level should replace it afterwards.
fn initial_filter(from_env: Option<EnvFilter>) -> (EnvFilter, bool) {
    match from_env {
        Some(filter) => (filter, false),
        None => (EnvFilter::new(BOOTSTRAP_LOG_LEVEL), true),
    }
}

fn print_table(dto: &OptionsDto) {
    let password = if dto.smtp_password.is_empty() { "" } else { "********" };
    let rows = [
        ("Ping interval", format!("{} {}", dto.ping_interval, dto.ping_interval_unit)),
        ("Ping timeout", format!("{} Seconds", dto.ping_timeout)),
        ("Alert threshold", dto.alert_threshold.clone()),
        ("Email alerts", dto.email_alert_enabled.to_string()),
        ("SMTP auth required", dto.email_auth_required.to_string()),
        ("SMTP server", dto.smtp_server.clone()),
        ("SMTP port", dto.smtp_port.clone()),
        ("SMTP user", dto.smtp_user.clone()),
        ("SMTP password", password.to_string()),
        ("Recipient", dto.email_recipient.clone()),
        ("From address", dto.email_from_address.clone()),
        ("Log output", dto.log_output_enabled.to_string()),
        ("Log path", dto.log_path.clone()),
    ];
    for (label, value) in rows {
        println!("{label:<20} {value}");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn set_args(flags: &[&str]) -> SetArgs {
        let argv = ["vmping-options", "set"].into_iter().chain(flags.iter().copied());
        match Cli::try_parse_from(argv).expect("parse").command {
            Command::Set(args) => args,
            Command::Show { .. } => panic!("expected the set subcommand"),
        }
    }

    fn shown() -> DisplayOptions {
        let mut display = DisplayOptions::default();
        display.ping_interval = "5".to_string();
        display.ping_interval_unit = IntervalUnit::Minutes;
        display.ping_timeout = "2".to_string();
        display.alert_threshold = "3".to_string();
        display.mail_alert.smtp_server = "smtp.example.com".to_string();
        display.log_output.path = "/var/log/vmping".to_string();
        display
    }

    #[test]
    fn test_initial_filter_without_rust_log_logs_info_until_file_is_read() {
        let (filter, follows_file) = initial_filter(None);
        assert_eq!(filter.to_string(), "info");
        assert!(follows_file);
    }

    #[test]
    fn test_initial_filter_keeps_rust_log() {
        let (filter, follows_file) = initial_filter(Some(EnvFilter::new("vmping_options=trace")));
        assert_eq!(filter.to_string(), "vmping_options=trace");
        assert!(!follows_file);
    }

    #[test]
    fn test_cli_show_defaults_to_table() {
        let cli = Cli::try_parse_from(["vmping-options", "show"]).expect("parse");
        assert!(matches!(cli.command, Command::Show { json: false }));
    }

    #[test]
    fn test_cli_show_json_flag() {
        let cli = Cli::try_parse_from(["vmping-options", "show", "--json"]).expect("parse");
        assert!(matches!(cli.command, Command::Show { json: true }));
    }

    #[test]
    fn test_cli_options_file_override() {
        let cli = Cli::try_parse_from([
            "vmping-options",
            "--options-file",
            "/tmp/vmping.toml",
            "show",
        ])
        .expect("parse");
        assert_eq!(cli.options_file, Some(PathBuf::from("/tmp/vmping.toml")));
    }

    #[test]
    fn test_cli_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["vmping-options"]).is_err());
    }

    #[test]
    fn test_cli_set_unit_is_case_insensitive() {
        let args = set_args(&["--interval", "2", "--unit", "hours"]);
        assert_eq!(args.unit, Some(IntervalUnit::Hours));
        assert_eq!(args.interval.as_deref(), Some("2"));
    }

    #[test]
    fn test_cli_set_rejects_unknown_unit() {
        let result = Cli::try_parse_from(["vmping-options", "set", "--unit", "fortnights"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_set_bool_flags_take_explicit_values() {
        let args = set_args(&["--email-alerts", "true", "--log-output", "false"]);
        assert_eq!(args.email_alerts, Some(true));
        assert_eq!(args.log_output, Some(false));
        assert_eq!(args.smtp_auth, None);
    }

    #[test]
    fn test_cli_set_policy_defaults_to_atomic() {
        assert_eq!(set_args(&[]).policy(), CommitPolicy::Atomic);
    }

    #[test]
    fn test_cli_set_sequential_flag_selects_sequential_policy() {
        assert_eq!(set_args(&["--sequential"]).policy(), CommitPolicy::Sequential);
    }

    #[test]
    fn test_apply_to_without_flags_keeps_shown_values() {
        let mut display = shown();

        set_args(&[]).apply_to(&mut display);

        assert_eq!(display, shown());
    }

    #[test]
    fn test_apply_to_overrides_only_given_fields() {
        // Arrange
        let mut display = shown();

        // Act
        set_args(&["--timeout", "9", "--smtp-port", "2525"]).apply_to(&mut display);

        // Assert
        assert_eq!(display.ping_timeout, "9");
        assert_eq!(display.mail_alert.smtp_port, "2525");
        assert_eq!(display.ping_interval, "5");
        assert_eq!(display.ping_interval_unit, IntervalUnit::Minutes);
        assert_eq!(display.mail_alert.smtp_server, "smtp.example.com");
        assert_eq!(display.log_output.path, "/var/log/vmping");
    }

    #[test]
    fn test_apply_to_recipient_derives_empty_from_address() {
        let mut display = shown();

        set_args(&["--recipient", "ops@example.org"]).apply_to(&mut display);

        assert_eq!(display.mail_alert.recipient, "ops@example.org");
        assert_eq!(display.mail_alert.from_address, "vmPing@example.org");
    }

    #[test]
    fn test_apply_to_explicit_from_beats_derived_sender() {
        let mut display = shown();

        set_args(&["--recipient", "ops@example.org", "--from", "alerts@corp.test"])
            .apply_to(&mut display);

        assert_eq!(display.mail_alert.from_address, "alerts@corp.test");
    }

    #[test]
    fn test_apply_to_recipient_keeps_stored_from_address() {
        let mut display = shown();
        display.mail_alert.from_address = "noc@example.net".to_string();

        set_args(&["--recipient", "ops@example.org"]).apply_to(&mut display);

        assert_eq!(display.mail_alert.from_address, "noc@example.net");
    }
}
