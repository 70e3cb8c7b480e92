//! Control and interaction logic of a temperature-controlled soldering station.
//!
//! The station senses the tip temperature once per mains half-cycle and switches the heater fully
//! on or off. A three-digit seven-segment display and a three-key keypad share a multiplexed scan.
//! The set point is edited digit by digit and kept in a small persistent slot.
//!
//! Nothing in here touches hardware. Every service works on one [`Shared`] context, which the
//! firmware guards with a critical section.
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod blink;
pub mod editor;
pub mod heater;
pub mod keypad;
pub mod multiplex;
pub mod panel;
pub mod persist;
pub mod segment;
pub mod ticks;

use keypad::Keypad;
use segment::DisplayBuffer;
use ticks::TickFlags;

/// The lowest set point that can be entered, in °C.
pub const SETPOINT_MIN: i16 = 1;

/// The highest set point that can be entered, in °C.
pub const SETPOINT_MAX: i16 = 999;

/// The set point used when no valid value was stored, in °C.
pub const DEFAULT_SETPOINT: i16 = 350;

/// State shared between the periodic services and the cooperative panel loop.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Shared {
    /// The set point in °C.
    pub setpoint: i16,
    /// The measured tip temperature in °C, or [`segment::FAULT_SENTINEL`] during a sensor fault.
    pub measured: i16,
    /// The most recent raw conversion result (12 bit).
    pub raw_sample: u16,
    /// The state of the heater output.
    pub heater_on: bool,
    /// The segment patterns that are scanned out to the display.
    pub display: DisplayBuffer,
    /// Debounce state of the keys.
    pub keypad: Keypad,
    /// Sticky tick flags, raised by the periodic services.
    pub ticks: TickFlags,
}

impl Shared {
    /// Shared state at power-on, before the set point was loaded.
    pub const fn new() -> Self {
        Self {
            setpoint: 0,
            measured: 0,
            raw_sample: 0,
            heater_on: false,
            display: DisplayBuffer::blank(),
            keypad: Keypad::new(),
            ticks: TickFlags::new(),
        }
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}
