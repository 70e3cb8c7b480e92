//! Scans the multiplexed seven-segment display and the keypad.
use embassy_stm32::gpio::{Input, Level, Output};
use embassy_time::{Duration, Ticker};
use tcsd_core::multiplex::{Multiplexer, RowDrive};
use tcsd_core::segment::DIGITS;
use tcsd_core::ticks::MULTIPLEX_HZ;

use crate::{PANEL_WAKE_SIG, SHARED_MUTEX};

/// The number of segment lines (seven segments and the decimal point).
const SEGMENTS: usize = 8;

/// Resources for driving the display and reading the keypad.
pub struct DisplayResources {
    /// Row (digit) select lines, active-low. Units digit first.
    pub pins_row: [Output<'static>; DIGITS],
    /// Segment lines `a` to `g`, then the decimal point. Active-low.
    pub pins_segment: [Output<'static>; SEGMENTS],
    /// The shared keypad return line. Reads high while the key of the selected row is pressed.
    pub pin_keypad: Input<'static>,
}

impl DisplayResources {
    /// Deselect all rows and darken all segments.
    fn darken(&mut self) {
        for pin in self.pins_row.iter_mut().chain(self.pins_segment.iter_mut()) {
            pin.set_high();
        }
    }

    /// Select a row and put its pattern on the segment lines.
    ///
    /// The segments are switched while no row is selected, to avoid ghosting.
    fn drive(&mut self, drive: RowDrive) {
        self.darken();

        for (index, pin) in self.pins_segment.iter_mut().enumerate() {
            pin.set_level(Level::from(drive.segments & (0x80 >> index) != 0));
        }

        self.pins_row[drive.row].set_low();
    }
}

/// Scans one display row per tick, and samples that row's key.
#[embassy_executor::task]
pub async fn display_task(mut resources: DisplayResources) {
    resources.darken();

    let mut multiplexer = Multiplexer::new();
    let mut ticker = Ticker::every(Duration::from_hz(MULTIPLEX_HZ));

    loop {
        ticker.next().await;

        let drive = SHARED_MUTEX.lock(|x| multiplexer.drive(&x.borrow().display));
        resources.drive(drive);

        let key_asserted = resources.pin_keypad.is_high();
        let wrapped = SHARED_MUTEX.lock(|x| {
            multiplexer.sample_and_advance(&mut x.borrow_mut(), key_asserted)
        });

        if wrapped {
            PANEL_WAKE_SIG.signal(());
        }
    }
}
