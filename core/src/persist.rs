//! Persistent storage of the set point.
//!
//! The set point is kept as a little-endian `i32` in a single 4-byte slot. Writing erases the
//! slot, writes it, and reads it back for verification.

use crate::{DEFAULT_SETPOINT, SETPOINT_MAX, SETPOINT_MIN};

/// The address of the set point slot.
pub const SLOT_ADDRESS: u32 = 0;

/// The size of the set point slot in bytes.
pub const SLOT_SIZE: usize = 4;

/// The content of an erased slot.
pub const ERASED: [u8; SLOT_SIZE] = [0xff; SLOT_SIZE];

/// The number of erase-write-verify attempts per store.
const STORE_ATTEMPTS: u8 = 2;

/// A non-volatile slot that holds the set point.
#[allow(async_fn_in_trait)]
pub trait SetpointSlot {
    /// Errors of the underlying storage.
    type Error;

    /// Read the slot.
    async fn read(&mut self) -> Result<[u8; SLOT_SIZE], Self::Error>;

    /// Erase the slot.
    async fn erase(&mut self) -> Result<(), Self::Error>;

    /// Write the slot, which must have been erased.
    async fn write(&mut self, data: &[u8; SLOT_SIZE]) -> Result<(), Self::Error>;
}

/// Errors while loading the set point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError<E> {
    /// The slot could not be read.
    Slot(E),
    /// The stored value is not a valid set point (e.g. never written).
    OutOfRange(i32),
}

/// Errors while storing the set point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError<E> {
    /// The slot could not be accessed.
    Slot(E),
    /// The slot did not read back what was written.
    VerifyMismatch,
}

/// How the set point was obtained by [`SetpointStore::load_or_default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadOutcome<E> {
    /// The slot held a valid set point.
    Stored(i16),
    /// The slot held no valid set point. The default was written back, with this result.
    Restored {
        /// The invalid value that was found.
        found: i32,
        /// The result of writing the default.
        write: Result<u8, StoreError<E>>,
    },
    /// The slot could not be read. The default is used, the slot is left untouched.
    Unreadable(E),
}

impl<E> LoadOutcome<E> {
    /// The set point to run with.
    pub fn setpoint(&self) -> i16 {
        match self {
            LoadOutcome::Stored(setpoint) => *setpoint,
            LoadOutcome::Restored { .. } | LoadOutcome::Unreadable(_) => DEFAULT_SETPOINT,
        }
    }
}

/// Loads and stores the set point in a slot.
pub struct SetpointStore<S> {
    /// The underlying slot.
    slot: S,
}

impl<S: SetpointSlot> SetpointStore<S> {
    /// Create a store on a slot.
    pub const fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Release the underlying slot.
    pub fn into_slot(self) -> S {
        self.slot
    }

    /// Load the set point.
    ///
    /// Values outside of the editable range are rejected, which includes an erased slot.
    pub async fn load(&mut self) -> Result<i16, LoadError<S::Error>> {
        let data = self.slot.read().await.map_err(LoadError::Slot)?;
        let value = i32::from_le_bytes(data);

        if (SETPOINT_MIN as i32..=SETPOINT_MAX as i32).contains(&value) {
            Ok(value as i16)
        } else {
            Err(LoadError::OutOfRange(value))
        }
    }

    /// Load the set point, falling back to [`DEFAULT_SETPOINT`].
    ///
    /// The default is written back only if the slot was read and holds no valid set point. A
    /// read error never causes a write, so a valid record survives a flaky bus.
    pub async fn load_or_default(&mut self) -> LoadOutcome<S::Error> {
        match self.load().await {
            Ok(setpoint) => LoadOutcome::Stored(setpoint),
            Err(LoadError::Slot(e)) => LoadOutcome::Unreadable(e),
            Err(LoadError::OutOfRange(found)) => LoadOutcome::Restored {
                found,
                write: self.store(DEFAULT_SETPOINT).await,
            },
        }
    }

    /// Store the set point by erasing, writing and verifying.
    ///
    /// A failed verification is retried once. Returns the number of attempts that were needed.
    pub async fn store(&mut self, setpoint: i16) -> Result<u8, StoreError<S::Error>> {
        let data = (setpoint as i32).to_le_bytes();

        for attempt in 1..=STORE_ATTEMPTS {
            if self.write_verified(&data).await? {
                return Ok(attempt);
            }
        }

        Err(StoreError::VerifyMismatch)
    }

    /// One erase-write-verify sequence. Returns true, if verification succeeded.
    async fn write_verified(
        &mut self,
        data: &[u8; SLOT_SIZE],
    ) -> Result<bool, StoreError<S::Error>> {
        self.slot.erase().await.map_err(StoreError::Slot)?;
        self.slot.write(data).await.map_err(StoreError::Slot)?;
        let read_back = self.slot.read().await.map_err(StoreError::Slot)?;

        Ok(&read_back == data)
    }
}
