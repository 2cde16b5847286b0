//! Ultrasonic tank gauge for the nRF52840.
//!
//! An HC-SR04 looks down into a cylindrical tank; the distance to the
//! liquid surface is turned into liters using the active tank profile and
//! shown on an SSD1306 OLED. Five profiles can be viewed, edited and
//! activated from a button-driven menu and are kept in internal flash.
//!
//! Everything except the hardware drivers (`ui::buttons`, `ui::display`,
//! `sensor::hcsr04`, `storage::flash`, gated behind the `embedded`
//! feature) builds on the host, so the logic is tested with plain
//! `cargo test`.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod app;
pub mod config;
pub mod error;
pub mod profile;
pub mod sensor;
pub mod settings;
pub mod storage;
pub mod ui;
pub mod volume;

pub use app::Controller;
pub use error::{Error, StorageError};
