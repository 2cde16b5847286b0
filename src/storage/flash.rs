//! Settings persistence on the nRF52840 internal flash.
//!
//! Emulates an EEPROM on top of `sequential-storage`: the whole settings
//! image is kept in RAM, byte writes only touch the RAM copy, and
//! [`FlashEeprom::sync`] stores the image as a single map item when it
//! changed. `sequential-storage` takes care of wear levelling and GC.
//!
//! Storage layout:
//!   - One map item under [`KEY_SETTINGS_IMAGE`], holding the raw
//!     `SETTINGS_IMAGE_SIZE`-byte image (profiles + active index).

use embedded_storage_async::nor_flash::NorFlash;

use super::{ByteStore, RamImage};
use crate::config::{SETTINGS_IMAGE_SIZE, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use crate::error::{Error, StorageError};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Key for the settings image in the map storage.
const KEY_SETTINGS_IMAGE: u8 = 0x01;

/// Scratch buffer size for `sequential-storage` (item header + image).
const ITEM_BUFFER_SIZE: usize = 128;

/// RAM-shadowed settings image backed by internal flash.
pub struct FlashEeprom<F> {
    flash: F,
    image: RamImage<SETTINGS_IMAGE_SIZE>,
}

impl<F: NorFlash> FlashEeprom<F> {
    /// Take ownership of the flash and load the stored image.
    ///
    /// Missing or unreadable data leaves the image erased; the settings
    /// store repairs that on boot.
    pub async fn load(mut flash: F) -> Self {
        let mut image = RamImage::erased();
        let mut buf = [0u8; ITEM_BUFFER_SIZE];

        match sequential_storage::map::fetch_item::<u8, &[u8], _>(
            &mut flash,
            STORAGE_START..STORAGE_END,
            &mut sequential_storage::cache::NoCache::new(),
            &mut buf,
            &KEY_SETTINGS_IMAGE,
        )
        .await
        {
            Ok(Some(data)) => match RamImage::from_stored(data) {
                Ok(stored) => {
                    image = stored;
                    info!("Loaded settings image from flash");
                }
                Err(e) => {
                    warn!(
                        "Settings image has {} bytes, expected {}: {:?}",
                        data.len(),
                        SETTINGS_IMAGE_SIZE,
                        Error::from(e)
                    );
                }
            },
            Ok(None) => {
                info!("No settings in flash");
            }
            Err(e) => {
                error!("Flash read error: {:?}", defmt::Debug2Format(&e));
            }
        }

        Self { flash, image }
    }

    /// Persist the image if any byte changed since the last sync.
    ///
    /// A failed commit is reported once and not retried; the next write
    /// to the image schedules a new commit of the whole image.
    pub async fn sync(&mut self) -> Result<(), StorageError> {
        if !self.image.take_dirty() {
            return Ok(());
        }

        let mut buf = [0u8; ITEM_BUFFER_SIZE];
        let item: &[u8] = self.image.as_bytes();

        match sequential_storage::map::store_item::<u8, &[u8], _>(
            &mut self.flash,
            STORAGE_START..STORAGE_END,
            &mut sequential_storage::cache::NoCache::new(),
            &mut buf,
            &KEY_SETTINGS_IMAGE,
            &item,
        )
        .await
        {
            Ok(()) => {
                debug!("Settings image committed to flash");
                Ok(())
            }
            Err(e) => {
                error!("Flash write error: {:?}", defmt::Debug2Format(&e));
                Err(StorageError::Flash)
            }
        }
    }
}

impl<F> ByteStore for FlashEeprom<F> {
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        self.image.read(offset, buf)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        self.image.write(offset, data)
    }
}
