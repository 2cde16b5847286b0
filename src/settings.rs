//! Tank profile settings, cached in RAM and synced with a [`ByteStore`].
//!
//! Storage layout (fixed, no versioning):
//!   - Offset `i * PROFILE_RECORD_SIZE`: profile slot `i` (5 slots).
//!   - Offset [`ACTIVE_INDEX_OFFSET`]: active profile index (`i32`, LE).
//!
//! The store is the only writer to persistent storage. Storage errors are
//! logged and otherwise ignored: the RAM copy stays authoritative and the
//! UI keeps running.

use crate::config::{PROFILE_COUNT, SETTINGS_IMAGE_SIZE};
use crate::profile::{ProfileIndex, ProfileSet, TankProfile, PROFILE_RECORD_SIZE};
use crate::storage::ByteStore;

/// Byte offset of the persisted active profile index.
pub const ACTIVE_INDEX_OFFSET: usize = PROFILE_COUNT * PROFILE_RECORD_SIZE;

const _: () = assert!(ACTIVE_INDEX_OFFSET + 4 <= SETTINGS_IMAGE_SIZE);

/// In-memory profiles plus the storage they are persisted to.
pub struct SettingsStore<S> {
    storage: S,
    profiles: ProfileSet,
    active: ProfileIndex,
}

impl<S: ByteStore> SettingsStore<S> {
    /// Wrap a storage backend without reading it.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            profiles: [TankProfile::default(); PROFILE_COUNT],
            active: ProfileIndex::FIRST,
        }
    }

    /// Cold start: restore (and repair) the active index, then all profiles.
    pub fn boot(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load_active_index();
        store.load_all();
        store
    }

    /// Re-read every profile slot from storage.
    pub fn load_all(&mut self) -> &ProfileSet {
        for (slot, profile) in self.profiles.iter_mut().enumerate() {
            let mut buf = [0u8; PROFILE_RECORD_SIZE];
            match self.storage.read(slot * PROFILE_RECORD_SIZE, &mut buf) {
                Ok(()) => {
                    if let Some(loaded) = TankProfile::deserialize(&buf) {
                        *profile = loaded;
                    }
                }
                Err(e) => {
                    error!("Profile {} read failed: {:?}", slot, e);
                }
            }
        }
        debug!("Loaded {} profiles", PROFILE_COUNT);
        &self.profiles
    }

    /// Write the RAM copy of profile `index` to storage.
    ///
    /// Indices outside the profile set are ignored.
    pub fn save(&mut self, index: usize) {
        let Some(profile) = self.profiles.get(index) else {
            return;
        };
        let mut buf = [0u8; PROFILE_RECORD_SIZE];
        profile.serialize(&mut buf);
        match self.storage.write(index * PROFILE_RECORD_SIZE, &buf) {
            Ok(()) => info!("Saved profile {}", index),
            Err(e) => error!("Profile {} write failed: {:?}", index, e),
        }
    }

    /// Read the persisted active index.
    ///
    /// An out-of-range value (never written, corrupted) is reset to the
    /// first profile and written back straight away.
    pub fn load_active_index(&mut self) -> ProfileIndex {
        let mut buf = [0u8; 4];
        let raw = match self.storage.read(ACTIVE_INDEX_OFFSET, &mut buf) {
            Ok(()) => Some(i32::from_le_bytes(buf)),
            Err(e) => {
                error!("Active index read failed: {:?}", e);
                None
            }
        };

        match raw.and_then(ProfileIndex::new) {
            Some(index) => self.active = index,
            None => {
                warn!("Invalid active profile index - resetting to 0");
                self.save_active_index(ProfileIndex::FIRST);
            }
        }
        self.active
    }

    /// Make `index` the active profile and persist it.
    pub fn save_active_index(&mut self, index: ProfileIndex) {
        self.active = index;
        let raw = index.get() as i32;
        match self.storage.write(ACTIVE_INDEX_OFFSET, &raw.to_le_bytes()) {
            Ok(()) => info!("Active profile set to {}", index.get()),
            Err(e) => error!("Active index write failed: {:?}", e),
        }
    }

    /// Change the active profile in RAM only.
    pub fn set_active_index(&mut self, index: ProfileIndex) {
        self.active = index;
    }

    pub fn active_index(&self) -> ProfileIndex {
        self.active
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    /// Profile at `index`, `None` outside the profile set.
    pub fn profile(&self, index: usize) -> Option<&TankProfile> {
        self.profiles.get(index)
    }

    pub fn active_profile(&self) -> &TankProfile {
        &self.profiles[self.active.get()]
    }

    pub fn active_profile_mut(&mut self) -> &mut TankProfile {
        &mut self.profiles[self.active.get()]
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
