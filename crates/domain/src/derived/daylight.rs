//! Day/night determination and day length

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

/// First local hour counted as daytime when sun times are unknown
pub const FALLBACK_DAY_START_HOUR: u32 = 6;
/// First local hour counted as night when sun times are unknown
pub const FALLBACK_DAY_END_HOUR: u32 = 20;

/// Which rule decided the day/night state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaylightBasis {
    /// Local time compared against sunrise and sunset
    SunTimes,
    /// Sun times unavailable, fixed 06:00-20:00 window used
    FixedWindow,
}

/// Outcome of the day/night decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Daylight {
    pub is_daytime: bool,
    pub basis: DaylightBasis,
}

impl Daylight {
    /// Decide whether `local_time` is daytime
    ///
    /// With both sun times known, daytime is `[sunrise, sunset)`. Otherwise
    /// the local hour must be in `[6, 20)`.
    #[must_use]
    pub fn determine(
        local_time: &DateTime<FixedOffset>,
        sunrise: Option<&DateTime<FixedOffset>>,
        sunset: Option<&DateTime<FixedOffset>>,
    ) -> Self {
        match (sunrise, sunset) {
            (Some(rise), Some(set)) => Self {
                is_daytime: local_time >= rise && local_time < set,
                basis: DaylightBasis::SunTimes,
            },
            _ => {
                let hour = local_time.hour();
                Self {
                    is_daytime: (FALLBACK_DAY_START_HOUR..FALLBACK_DAY_END_HOUR).contains(&hour),
                    basis: DaylightBasis::FixedWindow,
                }
            },
        }
    }

    /// Whether the fixed-window approximation was used
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.basis, DaylightBasis::FixedWindow)
    }
}

/// Hours between sunrise and sunset, `None` if either is missing
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn day_length_hours(
    sunrise: Option<&DateTime<FixedOffset>>,
    sunset: Option<&DateTime<FixedOffset>>,
) -> Option<f64> {
    let (rise, set) = (sunrise?, sunset?);
    Some((*set - *rise).num_seconds() as f64 / 3600.0)
}
