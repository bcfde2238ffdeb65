//! Unit conversions between SignalK native units and AIS units.
//!
//! SignalK reports angles in radians and speeds in m/s; AIS wants
//! degrees and knots. NaN passes through unchanged, callers treat it
//! as absent.

use std::f64::consts::PI;

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

pub fn mps_to_knots(speed: f64) -> f64 {
    speed * 3.6 / 1.852
}
