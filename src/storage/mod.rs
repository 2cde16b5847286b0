//! Byte-addressed persistent storage.
//!
//! The settings store only needs "get/put bytes at an offset", the way an
//! EEPROM works. [`ByteStore`] is that seam:
//!
//! - [`RamImage`] keeps the bytes in RAM (tests, and the shadow copy of
//!   the flash backend).
//! - `flash::FlashEeprom` (embedded only) persists a `RamImage` to the
//!   nRF52840 internal flash via `sequential-storage`.

#[cfg(feature = "embedded")]
pub mod flash;

use crate::error::StorageError;

/// EEPROM-like storage addressed by byte offset.
pub trait ByteStore {
    /// Fill `buf` with the bytes stored at `offset`.
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Store `data` at `offset`.
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError>;
}

/// Fixed-size byte image held in RAM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RamImage<const N: usize> {
    bytes: [u8; N],
    /// True if the image changed since the last `mark_clean`.
    dirty: bool,
}

impl<const N: usize> RamImage<N> {
    /// An image in the erased state (all `0xFF`), like fresh flash.
    pub const fn erased() -> Self {
        Self {
            bytes: [0xFF; N],
            dirty: false,
        }
    }

    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self {
            bytes,
            dirty: false,
        }
    }

    /// Rebuild an image from bytes read back from persistent storage.
    ///
    /// Anything but exactly `N` bytes is `StorageError::Corrupt`.
    pub fn from_stored(data: &[u8]) -> Result<Self, StorageError> {
        let bytes = <[u8; N]>::try_from(data).map_err(|_| StorageError::Corrupt)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Clear the dirty flag, returning whether it was set.
    ///
    /// A commit is attempted once per change: a failed commit is not
    /// repeated until the image is written again.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    fn range(offset: usize, len: usize) -> Result<core::ops::Range<usize>, StorageError> {
        let end = offset.checked_add(len).ok_or(StorageError::OutOfBounds)?;
        if end > N {
            return Err(StorageError::OutOfBounds);
        }
        Ok(offset..end)
    }
}

impl<const N: usize> Default for RamImage<N> {
    fn default() -> Self {
        Self::erased()
    }
}

impl<const N: usize> ByteStore for RamImage<N> {
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let range = Self::range(offset, buf.len())?;
        buf.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        let range = Self::range(offset, data.len())?;
        // Only unchanged bytes: nothing to commit.
        if self.bytes[range.clone()] != *data {
            self.bytes[range].copy_from_slice(data);
            self.dirty = true;
        }
        Ok(())
    }
}
