//! Distance → liquid height → volume conversion.
//!
//! Pure functions only; nothing here touches hardware or storage.

use core::f32::consts::PI;

use crate::profile::TankProfile;

/// Sensor cubic unit (cm³) to liters.
const CUBIC_UNITS_PER_LITER: f32 = 1000.0;

/// Raw volume for a distance reading, in liters.
///
/// `height = min_height - distance`, `volume = π · diameter · height / 1000`.
/// The result is not clamped: an empty tank reading past `min_height`
/// gives a negative volume. Returns `None` when the tank is not configured
/// (diameter or min height unset) or the distance is not a real reading.
pub fn compute_volume(profile: &TankProfile, distance: f32) -> Option<f32> {
    if !distance.is_finite() {
        return None;
    }
    let diameter = profile.diameter.value()?;
    let min_height = profile.min_height.value()?;
    let height = min_height - distance;
    Some(PI * diameter * height / CUBIC_UNITS_PER_LITER)
}

/// Liters still missing to reach the target; negative when over target.
pub fn remaining_capacity(profile: &TankProfile, volume: f32) -> Option<f32> {
    profile.target_capacity.value().map(|target| target - volume)
}

/// Map `volume` from `[0, target]` onto `[0, width]` pixels.
///
/// The mapped value is truncated and clamped to the bar. A target of zero
/// or less draws an empty bar.
pub fn progress_width(volume: f32, target: f32, width: u32) -> u32 {
    if target.is_nan() || target <= 0.0 || !volume.is_finite() {
        return 0;
    }
    let mapped = volume * width as f32 / target;
    if mapped <= 0.0 {
        0
    } else if mapped >= width as f32 {
        width
    } else {
        mapped as u32
    }
}

/// What the main screen shows for the active profile.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MainReading {
    /// Tank not set up (or no echo): ask the user to configure it.
    Unconfigured,
    Level {
        /// Current volume, never negative.
        liters: f32,
        /// Liters left to the target, `None` if no target is set.
        remaining: Option<f32>,
        /// Filled part of the progress bar.
        fill_px: u32,
    },
}

impl MainReading {
    /// Apply the main-screen rules to a raw reading: unset values or a
    /// missing echo become `Unconfigured`, the volume is clamped to zero
    /// before the remaining capacity and the bar are derived from it.
    pub fn evaluate(profile: &TankProfile, distance: Option<f32>, bar_width: u32) -> Self {
        let Some(volume) = distance.and_then(|d| compute_volume(profile, d)) else {
            return MainReading::Unconfigured;
        };
        let liters = volume.max(0.0);
        let fill_px = profile
            .target_capacity
            .value()
            .map_or(0, |target| progress_width(liters, target, bar_width));
        MainReading::Level {
            liters,
            remaining: remaining_capacity(profile, liters),
            fill_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Field;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn half_full_reference_tank() {
        let profile = TankProfile::new(100.0, 20.0, 50.0);
        let volume = compute_volume(&profile, 40.0).unwrap();
        assert!(approx(volume, 3.77), "volume = {}", volume);
        let remaining = remaining_capacity(&profile, volume).unwrap();
        assert!(approx(remaining, 46.23), "remaining = {}", remaining);
    }

    #[test]
    fn unset_diameter_is_not_a_number() {
        let profile = TankProfile {
            diameter: Field::Unset,
            ..TankProfile::new(100.0, 0.0, 50.0)
        };
        for distance in [0.0, 12.5, 100.0, 400.0, -5.0] {
            assert!(compute_volume(&profile, distance).is_none());
        }
    }

    #[test]
    fn set_diameter_always_yields_a_number() {
        for diameter in [0.0, 1.0, 20.0, 350.0] {
            let profile = TankProfile::new(80.0, diameter, 10.0);
            for distance in [0.0, 12.5, 80.0, 400.0] {
                assert!(compute_volume(&profile, distance).is_some());
            }
        }
    }

    #[test]
    fn unset_min_height_or_bad_distance_is_not_a_number() {
        let profile = TankProfile {
            min_height: Field::Unset,
            ..TankProfile::new(0.0, 20.0, 50.0)
        };
        assert!(compute_volume(&profile, 10.0).is_none());

        let profile = TankProfile::new(100.0, 20.0, 50.0);
        assert!(compute_volume(&profile, f32::NAN).is_none());
        assert!(compute_volume(&profile, f32::INFINITY).is_none());
    }

    #[test]
    fn volume_is_not_clamped_by_the_engine() {
        let profile = TankProfile::new(100.0, 20.0, 50.0);
        assert!(compute_volume(&profile, 120.0).unwrap() < 0.0);
    }

    #[test]
    fn remaining_is_negative_over_target() {
        let profile = TankProfile::new(100.0, 20.0, 2.0);
        assert!(remaining_capacity(&profile, 3.0).unwrap() < 0.0);
        let no_target = TankProfile {
            target_capacity: Field::Unset,
            ..profile
        };
        assert!(remaining_capacity(&no_target, 3.0).is_none());
    }

    #[test]
    fn progress_width_maps_and_clamps() {
        assert_eq!(progress_width(0.0, 50.0, 124), 0);
        assert_eq!(progress_width(25.0, 50.0, 124), 62);
        assert_eq!(progress_width(50.0, 50.0, 124), 124);
        assert_eq!(progress_width(80.0, 50.0, 124), 124);
        assert_eq!(progress_width(-3.0, 50.0, 124), 0);
    }

    #[test]
    fn progress_width_zero_target_is_empty() {
        assert_eq!(progress_width(10.0, 0.0, 124), 0);
        assert_eq!(progress_width(10.0, -5.0, 124), 0);
        assert_eq!(progress_width(10.0, f32::NAN, 124), 0);
    }

    #[test]
    fn main_reading_unconfigured_without_diameter() {
        let profile = TankProfile::default();
        assert_eq!(
            MainReading::evaluate(&profile, Some(40.0), 124),
            MainReading::Unconfigured
        );
    }

    #[test]
    fn main_reading_unconfigured_without_echo() {
        let profile = TankProfile::new(100.0, 20.0, 50.0);
        assert_eq!(
            MainReading::evaluate(&profile, None, 124),
            MainReading::Unconfigured
        );
    }

    #[test]
    fn main_reading_clamps_negative_volume() {
        let profile = TankProfile::new(100.0, 20.0, 50.0);
        match MainReading::evaluate(&profile, Some(130.0), 124) {
            MainReading::Level {
                liters,
                remaining,
                fill_px,
            } => {
                assert_eq!(liters, 0.0);
                assert_eq!(remaining, Some(50.0));
                assert_eq!(fill_px, 0);
            }
            other => panic!("unexpected reading {:?}", other),
        }
    }

    #[test]
    fn main_reading_for_reference_tank() {
        let profile = TankProfile::new(100.0, 20.0, 50.0);
        match MainReading::evaluate(&profile, Some(40.0), 124) {
            MainReading::Level {
                liters,
                remaining,
                fill_px,
            } => {
                assert!(approx(liters, 3.77));
                assert!(approx(remaining.unwrap(), 46.23));
                assert_eq!(fill_px, 9);
            }
            other => panic!("unexpected reading {:?}", other),
        }
    }
}
