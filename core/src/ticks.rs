//! Tick flags and the slow tick service.

use crate::Shared;

/// The display and keypad scan rate in Hz.
///
/// A full scan of all rows therefore takes three periods, which sets the sub-second tick to 60 Hz.
pub const MULTIPLEX_HZ: u64 = 180;

/// The slow tick rate in Hz (half-second period).
pub const SLOW_TICK_HZ: u64 = 2;

/// The slow tick has elapsed.
const SECOND: u8 = 0x80;
/// A full display scan has elapsed.
const SUBSECOND: u8 = 0x40;

/// A kind of tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Raised by the slow tick service.
    Second,
    /// Raised after each full display scan.
    Subsecond,
}

impl Tick {
    /// The flag bit of this tick.
    fn bit(self) -> u8 {
        match self {
            Tick::Second => SECOND,
            Tick::Subsecond => SUBSECOND,
        }
    }
}

/// Sticky tick flags. Raised by the periodic services, cleared by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickFlags(u8);

impl TickFlags {
    /// No tick raised.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Raise a tick.
    pub fn raise(&mut self, tick: Tick) {
        self.0 |= tick.bit();
    }

    /// If true, the tick is raised.
    pub fn is_raised(&self, tick: Tick) -> bool {
        self.0 & tick.bit() != 0
    }

    /// Clear a tick and report whether it was raised.
    pub fn take(&mut self, tick: Tick) -> bool {
        let raised = self.is_raised(tick);
        self.0 &= !tick.bit();
        raised
    }
}

/// The slow tick service, invoked at [`SLOW_TICK_HZ`].
pub fn on_slow_tick(shared: &mut Shared) {
    shared.ticks.raise(Tick::Second);
}
