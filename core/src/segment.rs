//! Seven-segment glyphs for the three-digit display.

/// The number of digits, which is also the number of multiplexed rows.
pub const DIGITS: usize = 3;

/// Segment patterns for the hexadecimal digits.
///
/// Bit 7 is segment `a`, bit 1 is segment `g`, bit 0 is the decimal point.
pub const FONT: [u8; 16] = [
    0xfc, 0x60, 0xda, 0xf2, 0x66, 0xb6, 0xbe, 0xe0, 0xfe, 0xf6, 0xee, 0x3e, 0x9c, 0x7a, 0x9e, 0x8e,
];

/// The value that renders as the fault glyph instead of digits.
pub const FAULT_SENTINEL: i16 = 511;

/// The fault glyph "S-E", units digit first.
const FAULT_GLYPH: [u8; DIGITS] = [0x9e, 0x02, 0xb6];

/// The decimal point of the units digit, lit while the heater is on.
pub const HEATER_INDICATOR: u8 = 0x01;

/// A digit position in the display buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Position {
    /// The rightmost digit.
    Units = 0,
    /// The middle digit.
    Tens = 1,
    /// The leftmost digit.
    Hundreds = 2,
}

/// Encode a value as three segment patterns, units digit first.
///
/// The fault sentinel yields the fault glyph. Values outside of `0..=999` wrap around, callers
/// clamp before encoding.
pub fn encode(value: i16) -> [u8; DIGITS] {
    if value == FAULT_SENTINEL {
        return FAULT_GLYPH;
    }

    let mut rest = value.rem_euclid(1000) as usize;
    let mut patterns = [0u8; DIGITS];
    for pattern in patterns.iter_mut() {
        *pattern = FONT[rest % 10];
        rest /= 10;
    }

    patterns
}

/// The segment patterns that are scanned out to the display, units digit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer([u8; DIGITS]);

impl DisplayBuffer {
    /// A buffer with all segments dark.
    pub const fn blank() -> Self {
        Self([0; DIGITS])
    }

    /// Show a value (see [`encode`]).
    ///
    /// Clears the heater indicator until the next control cycle sets it again.
    pub fn show(&mut self, value: i16) {
        self.0 = encode(value);
    }

    /// Darken a single digit.
    pub fn blank_digit(&mut self, position: Position) {
        self.0[position as usize] = 0;
    }

    /// Light or darken the heater indicator.
    pub fn set_heater_indicator(&mut self, on: bool) {
        let units = &mut self.0[Position::Units as usize];
        if on {
            *units |= HEATER_INDICATOR;
        } else {
            *units &= !HEATER_INDICATOR;
        }
    }

    /// The segment pattern of a display row.
    pub fn row(&self, row: usize) -> u8 {
        self.0[row]
    }

    /// All segment patterns, units digit first.
    #[cfg(test)]
    pub(crate) fn patterns(&self) -> &[u8; DIGITS] {
        &self.0
    }
}
