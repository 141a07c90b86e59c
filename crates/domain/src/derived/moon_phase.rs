//! Lunar phase from elapsed time since a reference new moon

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Unix time of the reference new moon, 2000-01-06 18:14 UTC
pub const REFERENCE_NEW_MOON_UNIX: i64 = 947_182_440;

/// Mean synodic month in days
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Named lunar phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

/// Fraction of the lunar cycle elapsed at `unix_seconds`, in `[0, 1)`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn phase_fraction(unix_seconds: i64) -> f64 {
    let days = (unix_seconds - REFERENCE_NEW_MOON_UNIX) as f64 / SECONDS_PER_DAY;
    let fraction = days.rem_euclid(SYNODIC_MONTH_DAYS) / SYNODIC_MONTH_DAYS;
    // rem_euclid may round up to the modulus itself
    if fraction >= 1.0 { 0.0 } else { fraction }
}

impl MoonPhase {
    /// Bucket a cycle fraction into one of eight phases
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        match fraction {
            f if !(0.025..0.975).contains(&f) => Self::NewMoon,
            f if f < 0.225 => Self::WaxingCrescent,
            f if f < 0.275 => Self::FirstQuarter,
            f if f < 0.475 => Self::WaxingGibbous,
            f if f < 0.525 => Self::FullMoon,
            f if f < 0.725 => Self::WaningGibbous,
            f if f < 0.775 => Self::LastQuarter,
            _ => Self::WaningCrescent,
        }
    }

    /// Phase at a unix timestamp
    #[must_use]
    pub fn from_unix(unix_seconds: i64) -> Self {
        Self::from_fraction(phase_fraction(unix_seconds))
    }

    /// Phase at an instant in any timezone
    #[must_use]
    pub fn at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::from_unix(instant.timestamp())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
