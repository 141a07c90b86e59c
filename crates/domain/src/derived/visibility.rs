//! Visibility formatting

use crate::value_objects::UnitSystem;

/// Substituted when the provider omits visibility or reports a non-positive value
pub const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

pub const METRES_PER_MILE: f64 = 1609.34;

/// Visibility in metres with the default applied
#[must_use]
pub fn effective_visibility_m(visibility_m: Option<f64>) -> f64 {
    match visibility_m {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => DEFAULT_VISIBILITY_M,
    }
}

/// Render visibility for the report
///
/// The default maximum renders as `10+ km (excellent)` or
/// `6.2+ miles (excellent)`.
#[must_use]
pub fn format_visibility(visibility_m: Option<f64>, units: UnitSystem) -> String {
    let metres = effective_visibility_m(visibility_m);
    let at_default = (metres - DEFAULT_VISIBILITY_M).abs() < f64::EPSILON;

    match (units, at_default) {
        (UnitSystem::Metric, true) => "10+ km (excellent)".to_string(),
        (UnitSystem::Imperial, true) => "6.2+ miles (excellent)".to_string(),
        (UnitSystem::Metric, false) => format!("{:.1} km", metres / 1000.0),
        (UnitSystem::Imperial, false) => format!("{:.1} miles", metres / METRES_PER_MILE),
    }
}
