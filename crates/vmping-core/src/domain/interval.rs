//! Ping-interval display units.
//!
//! The canonical interval is stored in milliseconds, but people enter it as
//! "5 minutes" or "2 hours".  [`IntervalUnit::select`] picks the unit used to
//! show a stored value: the coarsest unit that divides it evenly, checked in
//! strict priority order (hours, then minutes, then seconds).  It does not
//! remember which unit the value was originally entered in:
//!
//! | Stored ms    | Unit    | Shown |
//! |--------------|---------|-------|
//! | `7_200_000`  | Hours   | `2`   |
//! | `5_400_000`  | Minutes | `90`  |
//! | `90_000`     | Seconds | `90`  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Returned when a unit label is not one of `Seconds`, `Minutes`, `Hours`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown interval unit: {0:?} (expected Seconds, Minutes or Hours)")]
pub struct UnknownIntervalUnit(pub String);

/// Unit the ping interval is displayed and entered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl IntervalUnit {
    /// Milliseconds in one of this unit.
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::Seconds => MS_PER_SECOND,
            Self::Minutes => MS_PER_MINUTE,
            Self::Hours => MS_PER_HOUR,
        }
    }

    /// Picks the display unit for a millisecond interval.
    ///
    /// Every value has a defined result; anything that is not a whole number
    /// of hours or minutes falls through to seconds.
    pub fn select(ms: u64) -> Self {
        if ms >= MS_PER_HOUR && ms % MS_PER_HOUR == 0 {
            Self::Hours
        } else if ms >= MS_PER_MINUTE && ms % MS_PER_MINUTE == 0 {
            Self::Minutes
        } else {
            Self::Seconds
        }
    }

    /// The label shown in the unit selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seconds => "Seconds",
            Self::Minutes => "Minutes",
            Self::Hours => "Hours",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IntervalUnit {
    type Err = UnknownIntervalUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seconds" => Ok(Self::Seconds),
            "minutes" => Ok(Self::Minutes),
            "hours" => Ok(Self::Hours),
            _ => Err(UnknownIntervalUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_whole_hours_is_hours() {
        assert_eq!(IntervalUnit::select(3_600_000), IntervalUnit::Hours);
        assert_eq!(IntervalUnit::select(7_200_000), IntervalUnit::Hours);
    }

    #[test]
    fn test_select_prefers_hours_over_minutes() {
        // 60 minutes is also 1 hour; the coarser unit wins.
        assert_eq!(IntervalUnit::select(60 * 60_000), IntervalUnit::Hours);
    }

    #[test]
    fn test_select_whole_minutes_not_hours_is_minutes() {
        assert_eq!(IntervalUnit::select(60_000), IntervalUnit::Minutes);
        assert_eq!(IntervalUnit::select(5_400_000), IntervalUnit::Minutes);
    }

    #[test]
    fn test_select_everything_else_is_seconds() {
        assert_eq!(IntervalUnit::select(0), IntervalUnit::Seconds);
        assert_eq!(IntervalUnit::select(1_000), IntervalUnit::Seconds);
        assert_eq!(IntervalUnit::select(90_000), IntervalUnit::Seconds);
        assert_eq!(IntervalUnit::select(1_500), IntervalUnit::Seconds);
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(IntervalUnit::Seconds.multiplier(), 1_000);
        assert_eq!(IntervalUnit::Minutes.multiplier(), 60_000);
        assert_eq!(IntervalUnit::Hours.multiplier(), 3_600_000);
    }

    #[test]
    fn test_labels_parse_back_case_insensitively() {
        assert_eq!("Hours".parse::<IntervalUnit>(), Ok(IntervalUnit::Hours));
        assert_eq!("minutes".parse::<IntervalUnit>(), Ok(IntervalUnit::Minutes));
        assert_eq!(" SECONDS ".parse::<IntervalUnit>(), Ok(IntervalUnit::Seconds));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = "fortnights".parse::<IntervalUnit>().unwrap_err();
        assert_eq!(err, UnknownIntervalUnit("fortnights".to_string()));
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(IntervalUnit::Minutes.to_string(), "Minutes");
    }
}
