//! Distance sensing.
//!
//! The rest of the firmware only sees the [`Rangefinder`] port: one call,
//! one distance reading in centimetres, or `None` when no echo arrived.

#[cfg(feature = "embedded")]
pub mod hcsr04;

use core::future::Future;

use crate::config::SPEED_OF_SOUND_CM_PER_US;

/// Port for taking a single distance measurement.
///
/// Implementations may wait for the echo, bounded by their own timeout.
pub trait Rangefinder {
    /// Measure the distance to the liquid surface (cm).
    ///
    /// `None` means the echo timed out.
    fn measure_distance(&mut self) -> impl Future<Output = Option<f32>>;
}

/// Convert an echo pulse width to a one-way distance (cm).
///
/// A zero-length pulse is what a timed-out measurement reports, so it
/// maps to `None`.
pub fn echo_to_distance(pulse_us: u64) -> Option<f32> {
    if pulse_us == 0 {
        return None;
    }
    Some(pulse_us as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0)
}
