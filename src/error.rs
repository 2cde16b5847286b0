//! Unified error type for tank-gauge.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.
//!
//! None of these are fatal: callers log them and keep rendering.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Persistent storage failed.
    Storage(StorageError),

    /// I²C transaction to the display failed.
    Display,

    /// The rangefinder never saw an echo.
    SensorTimeout,
}

/// Failures of the byte-addressed settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Access past the end of the storage image.
    OutOfBounds,
    /// Flash read/write/erase failed.
    Flash,
    /// Stored image has an unexpected size.
    Corrupt,
}

// Convenience conversions

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}
