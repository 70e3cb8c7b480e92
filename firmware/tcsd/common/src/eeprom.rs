//! Persists the set point in an I2C EEPROM.
use defmt::{Format, debug, error, info, warn};
use embassy_stm32::i2c;
use embassy_time::Timer;
use tcsd_core::persist::{
    ERASED, LoadOutcome, SLOT_ADDRESS, SLOT_SIZE, SetpointSlot, SetpointStore,
};

use crate::STORE_SETPOINT_SIG;

/// The type of EEPROM on this device.
pub type Eeprom = eeprom24x::Eeprom24x<
    i2c::I2c<'static, embassy_stm32::mode::Async, embassy_stm32::i2c::mode::Master>,
    eeprom24x::page_size::B32,
    eeprom24x::addr_size::TwoBytes,
    eeprom24x::unique_serial::No,
>;

/// Errors when accessing the EEPROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Error {
    /// The I2C transfer failed.
    Bus(i2c::Error),
    /// The EEPROM rejected the address or the amount of data.
    Access,
}

impl From<eeprom24x::Error<i2c::Error>> for Error {
    fn from(value: eeprom24x::Error<i2c::Error>) -> Self {
        match value {
            eeprom24x::Error::I2C(e) => Self::Bus(e),
            _ => Self::Access,
        }
    }
}

/// The EEPROM region that holds the set point.
pub struct EepromSlot {
    /// The device.
    eeprom: Eeprom,
}

impl EepromSlot {
    /// Wrap an EEPROM device.
    pub fn new(eeprom: Eeprom) -> Self {
        Self { eeprom }
    }

    /// Write a page, retrying once after a bus error.
    ///
    /// Returns after the device's write cycle has ended.
    async fn write_page(&mut self, data: &[u8; SLOT_SIZE]) -> Result<(), Error> {
        if self.eeprom.write_page(SLOT_ADDRESS, data).is_err() {
            debug!("Retry EEPROM write");
            Timer::after_millis(10).await;
            self.eeprom.write_page(SLOT_ADDRESS, data)?;
        }

        // Maximum write delay.
        Timer::after_millis(5).await;
        Ok(())
    }
}

impl SetpointSlot for EepromSlot {
    type Error = Error;

    async fn read(&mut self) -> Result<[u8; SLOT_SIZE], Error> {
        let mut buf = [0u8; SLOT_SIZE];

        if self.eeprom.read_data(SLOT_ADDRESS, &mut buf).is_err() {
            debug!("Retry EEPROM read");
            Timer::after_millis(10).await;
            self.eeprom.read_data(SLOT_ADDRESS, &mut buf)?;
        }

        debug!("EEPROM read slot bytes: {}", buf);
        Ok(buf)
    }

    async fn erase(&mut self) -> Result<(), Error> {
        self.write_page(&ERASED).await
    }

    async fn write(&mut self, data: &[u8; SLOT_SIZE]) -> Result<(), Error> {
        self.write_page(data).await?;
        debug!("EEPROM wrote slot bytes: {}", data);
        Ok(())
    }
}

/// Load the set point from EEPROM.
///
/// Falls back to the default set point, if the slot is unreadable or holds no valid set point.
/// Only the latter writes the default back.
pub async fn load_setpoint(store: &mut SetpointStore<EepromSlot>) -> i16 {
    let outcome = store.load_or_default().await;

    match &outcome {
        LoadOutcome::Stored(_) => {}
        LoadOutcome::Unreadable(e) => warn!("Failed to read set point, using default: {}", e),
        LoadOutcome::Restored { found, write } => {
            warn!("Stored set point {} is invalid, restoring default", found);
            if let Err(e) = write {
                error!("Failed to store default set point: {}", e);
            }
        }
    }

    outcome.setpoint()
}

/// Handles writing committed set points to EEPROM.
#[embassy_executor::task]
pub async fn eeprom_task(mut store: SetpointStore<EepromSlot>) {
    loop {
        let setpoint = STORE_SETPOINT_SIG.wait().await;

        match store.store(setpoint).await {
            Ok(1) => info!("Saved set point {} °C", setpoint),
            Ok(attempts) => info!("Saved set point {} °C after {} attempts", setpoint, attempts),
            Err(e) => error!("Failed to save set point {} °C: {}", setpoint, e),
        }
    }
}
