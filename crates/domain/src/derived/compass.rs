//! Compass direction of a wind bearing

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight principal compass points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    const CLOCKWISE: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Width of one sector in degrees
    pub const SECTOR_DEGREES: f64 = 45.0;

    /// Map a bearing to its compass point
    ///
    /// The bearing is normalized into `[0, 360)` first. Each point owns the
    /// 45° sector that starts at its own bearing, so 44° is still `N` and
    /// 46° is `NE`. Non-finite bearings map to `N`.
    ///
    /// Labels are therefore biased half a sector clockwise compared with the
    /// usual centred compass: 350° reads `NW` and 30° reads `N`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self::N;
        }
        let normalized = degrees.rem_euclid(360.0);
        // normalized is in [0, 360), so the index is in 0..8 (rounding can land on 8)
        let index = (normalized / Self::SECTOR_DEGREES).floor() as usize % 8;
        Self::CLOCKWISE[index]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
