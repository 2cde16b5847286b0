//! Tank profiles and their on-storage record format.
//!
//! A profile describes one tank: the sensor reading of the empty tank,
//! the tank diameter and the volume the user wants to reach.
//!
//! Record layout (12 bytes, little-endian):
//! ```text
//! Byte 0-3:  min_height      (f32, sensor units)
//! Byte 4-7:  diameter        (f32, sensor units)
//! Byte 8-11: target_capacity (f32, liters)
//! ```
//! Any non-finite value on storage (erased flash, never written) decodes
//! as [`Field::Unset`].

use crate::config::{NUDGE_STEP, PROFILE_COUNT};

/// Serialized size of one [`TankProfile`].
pub const PROFILE_RECORD_SIZE: usize = 12;

/// A profile value that may never have been configured.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Nothing valid on storage yet.
    #[default]
    Unset,
    Set(f32),
}

impl Field {
    /// Decode from the stored float bit pattern.
    pub fn from_f32(value: f32) -> Self {
        if value.is_finite() {
            Field::Set(value)
        } else {
            Field::Unset
        }
    }

    /// Value to persist; `Unset` is stored as NaN.
    pub fn to_f32(self) -> f32 {
        match self {
            Field::Set(v) => v,
            Field::Unset => f32::NAN,
        }
    }

    pub fn value(self) -> Option<f32> {
        match self {
            Field::Set(v) => Some(v),
            Field::Unset => None,
        }
    }

    /// Step the value by ±[`NUDGE_STEP`].
    ///
    /// An unset field counts as zero, and the result never drops below zero.
    pub fn nudge(self, increase: bool) -> Self {
        let step = if increase { NUDGE_STEP } else { -NUDGE_STEP };
        let current = self.value().unwrap_or(0.0);
        Field::Set((current + step).max(0.0))
    }
}

/// The editable fields of a profile, in the order of the settings screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileField {
    MinHeight,
    Diameter,
    TargetCapacity,
}

/// One configured tank.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TankProfile {
    /// Sensor reading for the empty tank.
    pub min_height: Field,
    /// Tank diameter in the sensor's linear unit.
    pub diameter: Field,
    /// Desired full-tank volume (L).
    pub target_capacity: Field,
}

impl TankProfile {
    pub const fn new(min_height: f32, diameter: f32, target_capacity: f32) -> Self {
        Self {
            min_height: Field::Set(min_height),
            diameter: Field::Set(diameter),
            target_capacity: Field::Set(target_capacity),
        }
    }

    pub fn field(&self, field: ProfileField) -> Field {
        match field {
            ProfileField::MinHeight => self.min_height,
            ProfileField::Diameter => self.diameter,
            ProfileField::TargetCapacity => self.target_capacity,
        }
    }

    pub fn field_mut(&mut self, field: ProfileField) -> &mut Field {
        match field {
            ProfileField::MinHeight => &mut self.min_height,
            ProfileField::Diameter => &mut self.diameter,
            ProfileField::TargetCapacity => &mut self.target_capacity,
        }
    }

    /// Serialise into a byte slice for storage.
    /// Returns the number of bytes written (0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < PROFILE_RECORD_SIZE {
            return 0;
        }
        buf[0..4].copy_from_slice(&self.min_height.to_f32().to_le_bytes());
        buf[4..8].copy_from_slice(&self.diameter.to_f32().to_le_bytes());
        buf[8..12].copy_from_slice(&self.target_capacity.to_f32().to_le_bytes());
        PROFILE_RECORD_SIZE
    }

    /// Parse a stored record. Garbage is accepted; non-finite values
    /// become `Unset`.
    pub fn deserialize(data: &[u8]) -> Option<Self> {
        if data.len() < PROFILE_RECORD_SIZE {
            return None;
        }
        let read = |at: usize| {
            Field::from_f32(f32::from_le_bytes([
                data[at],
                data[at + 1],
                data[at + 2],
                data[at + 3],
            ]))
        };
        Some(Self {
            min_height: read(0),
            diameter: read(4),
            target_capacity: read(8),
        })
    }
}

/// Fixed set of profile slots.
pub type ProfileSet = [TankProfile; PROFILE_COUNT];

/// Index of a profile slot, always in `0..PROFILE_COUNT`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileIndex(u8);

impl ProfileIndex {
    pub const FIRST: Self = Self(0);
    pub const LAST: Self = Self(PROFILE_COUNT as u8 - 1);

    /// Validate a raw (possibly garbage) index.
    pub fn new(raw: i32) -> Option<Self> {
        if (0..PROFILE_COUNT as i32).contains(&raw) {
            Some(Self(raw as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Move one slot up or down, staying on the first / last slot.
    pub fn step(self, increase: bool) -> Self {
        if increase {
            Self(self.0.saturating_add(1).min(Self::LAST.0))
        } else {
            Self(self.0.saturating_sub(1))
        }
    }
}
