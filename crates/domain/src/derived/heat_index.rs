//! Heat index (apparent temperature) using the Rothfusz regression

use crate::value_objects::{Humidity, UnitSystem};

/// Temperature in °F above which the regression applies
pub const HEAT_INDEX_MIN_FAHRENHEIT: f64 = 80.0;

/// Relative humidity above which the regression applies
pub const HEAT_INDEX_MIN_HUMIDITY: u8 = 40;

const C1: f64 = -42.379;
const C2: f64 = 2.049_015_23;
const C3: f64 = 10.143_331_27;
const C4: f64 = -0.224_755_41;
const C5: f64 = -0.006_837_83;
const C6: f64 = -0.054_817_17;
const C7: f64 = 0.001_228_74;
const C8: f64 = 0.000_852_82;
const C9: f64 = -0.000_001_99;

#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius.mul_add(9.0 / 5.0, 32.0)
}

#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Rothfusz regression, inputs and output in °F
#[must_use]
pub fn rothfusz(temp_f: f64, humidity_pct: f64) -> f64 {
    let t = temp_f;
    let rh = humidity_pct;
    C9.mul_add(
        t * t * rh * rh,
        C8.mul_add(
            t * rh * rh,
            C7.mul_add(
                t * t * rh,
                C6.mul_add(
                    rh * rh,
                    C5.mul_add(t * t, C4.mul_add(t * rh, C3.mul_add(rh, C2.mul_add(t, C1)))),
                ),
            ),
        ),
    )
}

/// Heat index in the given unit system
///
/// `None` unless the temperature exceeds 80 °F and humidity exceeds 40 %.
#[must_use]
pub fn heat_index(temperature: f64, humidity: Humidity, units: UnitSystem) -> Option<f64> {
    let temp_f = match units {
        UnitSystem::Metric => celsius_to_fahrenheit(temperature),
        UnitSystem::Imperial => temperature,
    };

    if temp_f <= HEAT_INDEX_MIN_FAHRENHEIT || humidity.value() <= HEAT_INDEX_MIN_HUMIDITY {
        return None;
    }

    let index_f = rothfusz(temp_f, humidity.as_f64());
    Some(match units {
        UnitSystem::Metric => fahrenheit_to_celsius(index_f),
        UnitSystem::Imperial => index_f,
    })
}
