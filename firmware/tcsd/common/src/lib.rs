//! Firmware for a temperature-controlled soldering station.
#![no_std]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use tcsd_core::Shared;
use {defmt_rtt as _, panic_probe as _};

pub mod app;
pub mod control;
pub mod eeprom;
pub mod ticks;
pub mod ui;

/// Wakes the panel loop after tick flags were raised or keys were sampled.
static PANEL_WAKE_SIG: Signal<ThreadModeRawMutex, ()> = Signal::new();

/// Signals a committed set point that shall be stored.
static STORE_SETPOINT_SIG: Signal<ThreadModeRawMutex, i16> = Signal::new();

/// State shared by the control loop, the display scan, the slow tick and the panel.
///
/// All accesses go through `lock`, so no multi-byte field is ever observed half-written.
pub static SHARED_MUTEX: Mutex<ThreadModeRawMutex, RefCell<Shared>> =
    Mutex::new(RefCell::new(Shared::new()));
