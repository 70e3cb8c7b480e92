//! Debouncing of the three keys.
//!
//! Each key is sampled once per display scan (see [`crate::multiplex`]). Its state byte holds two
//! flags and a saturating count of consecutive asserted samples:
//!
//! - `PRESSED` is set while the key line is asserted,
//! - `HANDLED` marks the press as consumed, until the key is released,
//! - the count saturates at [`KEY_THRESHOLD`].
//!
//! A release clears the whole byte.

/// The number of consecutive asserted samples, after which a key counts as held.
pub const KEY_THRESHOLD: u8 = 60;

/// The key line is currently asserted.
const PRESSED: u8 = 0x80;
/// The current press was already consumed.
const HANDLED: u8 = 0x40;
/// Both flag bits.
const FLAGS: u8 = PRESSED | HANDLED;
/// The debounce count bits.
const COUNT: u8 = !FLAGS;

/// The keys, in the order of the display rows that sample them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Increments the value.
    Plus = 0,
    /// Decrements the value.
    Minus = 1,
    /// Steps through the set point editor.
    Star = 2,
}

impl Key {
    /// The key that is sampled during a display row.
    pub fn from_row(row: usize) -> Option<Self> {
        match row {
            0 => Some(Key::Plus),
            1 => Some(Key::Minus),
            2 => Some(Key::Star),
            _ => None,
        }
    }
}

/// Debounce state of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyState(u8);

impl KeyState {
    /// A released key.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Feed one sample of the key line.
    pub fn sample(&mut self, asserted: bool) {
        if asserted {
            self.0 |= PRESSED;
            if self.count() < KEY_THRESHOLD {
                self.0 += 1;
            }
        } else {
            self.0 = 0;
        }
    }

    /// The number of consecutive asserted samples (saturating).
    pub fn count(self) -> u8 {
        self.0 & COUNT
    }

    /// If true, the key line is asserted.
    pub fn is_pressed(self) -> bool {
        self.0 & PRESSED != 0
    }

    /// If true, the current press was already consumed.
    pub fn is_handled(self) -> bool {
        self.0 & HANDLED != 0
    }

    /// If true, the key has been held for the full debounce threshold.
    pub fn is_held(self) -> bool {
        self.count() == KEY_THRESHOLD
    }

    /// Consume the current press, if it was not consumed yet.
    ///
    /// Returns true at most once per physical press.
    pub fn take_press(&mut self) -> bool {
        if self.0 & FLAGS == PRESSED {
            self.0 |= HANDLED;
            true
        } else {
            false
        }
    }
}

/// Debounce state of all keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keypad([KeyState; 3]);

impl Keypad {
    /// A keypad with all keys released.
    pub const fn new() -> Self {
        Self([KeyState::new(); 3])
    }

    /// The state of a key.
    pub fn key(&self, key: Key) -> KeyState {
        self.0[key as usize]
    }

    /// Feed one sample of the key line into a key's state.
    pub fn sample(&mut self, key: Key, asserted: bool) {
        self.0[key as usize].sample(asserted);
    }

    /// Consume a key's current press (see [`KeyState::take_press`]).
    pub fn take_press(&mut self, key: Key) -> bool {
        self.0[key as usize].take_press()
    }
}
