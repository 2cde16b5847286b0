//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, storage layout and
//! screen geometry live here so they can be tuned in one place.

use crate::ui::input_filter::InputMode;

// Main loop

/// Delay between two polling ticks (ms).
pub const TICK_MS: u64 = 100;

// Rangefinder (HC-SR04 style)

/// Time the trigger line is held low before the pulse (µs).
pub const TRIGGER_SETTLE_US: u64 = 2;

/// Width of the trigger pulse (µs).
pub const TRIGGER_PULSE_US: u64 = 10;

/// Speed of sound in centimetres per microsecond.
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.034;

/// Give up waiting for the echo after this long (ms).
/// The sensor holds echo high for ~38 ms when nothing is in range.
pub const ECHO_TIMEOUT_MS: u64 = 40;

// Tank profiles

/// Number of tank profile slots. Shared by the settings store, the
/// load screen and the persisted layout.
pub const PROFILE_COUNT: usize = 5;

/// Step applied by LEFT / RIGHT on the diameter and capacity rows.
pub const NUDGE_STEP: f32 = 10.0;

// Buttons
//
// Input handling mode. `Raw` acts on every tick a line reads pressed,
// `Debounced` only on the press edge.
pub const INPUT_MODE: InputMode = InputMode::Raw;

/// Minimum time between two accepted presses of one button in
/// `InputMode::Debounced` (ms).
pub const DEBOUNCE_MS: u64 = 100;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the `embassy_nrf::peripherals::*` pins are
// picked in `main.rs`.  Adjust for your custom PCB.
//
//   Sonar TRIG     → P0.03
//   Sonar ECHO     → P0.04
//   Button UP      → P0.11
//   Button DOWN    → P0.12
//   Button SELECT  → P0.13
//   Button LEFT    → P0.24
//   Button RIGHT   → P0.25
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

// Display

/// OLED width in pixels.
pub const DISPLAY_WIDTH: u32 = 128;

/// OLED height in pixels.
pub const DISPLAY_HEIGHT: u32 = 64;

/// Height of one list row (menu, settings).
pub const ROW_HEIGHT: u32 = 10;

/// Y coordinate of the separator under a screen title.
pub const TITLE_RULE_Y: i32 = 10;

/// Progress bar geometry on the main screen.
pub const PROGRESS_BAR_X: i32 = 2;
pub const PROGRESS_BAR_WIDTH: u32 = DISPLAY_WIDTH - 4;
pub const PROGRESS_BAR_HEIGHT: u32 = 8;

// Persistent settings storage

/// Size of the byte image holding every profile plus the active index.
pub const SETTINGS_IMAGE_SIZE: usize = 64;

/// Flash page index where settings storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for settings storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
