//! The display and keypad scan.
//!
//! Each invocation lights one display row and samples the key wired to that row. After the last
//! row, the scan wraps and raises the sub-second tick.

use crate::Shared;
use crate::keypad::Key;
use crate::segment::{DIGITS, DisplayBuffer};
use crate::ticks::Tick;

/// How to drive the display during one scan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowDrive {
    /// The row to select (all others deselected).
    pub row: usize,
    /// The level pattern for the segment bus, which is active-low.
    pub segments: u8,
}

/// The scan position.
#[derive(Debug, Default)]
pub struct Multiplexer {
    /// The row that is currently scanned.
    row: usize,
}

impl Multiplexer {
    /// A scan that starts at the first row.
    pub const fn new() -> Self {
        Self { row: 0 }
    }

    /// Get the drive for the current row.
    pub fn drive(&self, display: &DisplayBuffer) -> RowDrive {
        RowDrive {
            row: self.row,
            segments: !display.row(self.row),
        }
    }

    /// Sample the current row's key line and advance to the next row.
    ///
    /// Must be called after the current row was selected. Returns true, if the scan wrapped.
    pub fn sample_and_advance(&mut self, shared: &mut Shared, key_asserted: bool) -> bool {
        if let Some(key) = Key::from_row(self.row) {
            shared.keypad.sample(key, key_asserted);
        }

        self.row += 1;
        if self.row >= DIGITS {
            self.row = 0;
            shared.ticks.raise(Tick::Subsecond);
            true
        } else {
            false
        }
    }
}
