//! Consumes the tick flags: refreshes the display and nudges the set point.

use crate::editor::EditState;
use crate::keypad::Key;
use crate::segment::FAULT_SENTINEL;
use crate::ticks::Tick;
use crate::{SETPOINT_MAX, SETPOINT_MIN, Shared};

/// Keys that nudge the live set point, and their step.
const NUDGE_KEYS: [(Key, i16); 2] = [(Key::Plus, 1), (Key::Minus, -1)];

/// The value to show for a measured temperature.
fn displayed_measurement(measured: i16) -> i16 {
    if measured == FAULT_SENTINEL {
        measured
    } else {
        measured.clamp(0, 999)
    }
}

/// The display and blink controller.
#[derive(Debug)]
pub struct BlinkController {
    /// If true, the next slow tick darkens the edited digit.
    blank_next: bool,
    /// Per nudge key: if true, the next time the key is held nudges the set point.
    armed: [bool; NUDGE_KEYS.len()],
}

impl Default for BlinkController {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkController {
    /// A controller that shows the edited digit on the first slow tick.
    pub const fn new() -> Self {
        Self {
            blank_next: false,
            armed: [true; NUDGE_KEYS.len()],
        }
    }

    /// Drain the tick flags.
    ///
    /// On the slow tick, shows the measured temperature while idle, or the candidate with a blinking
    /// digit while editing. On the sub-second tick, a held plus or minus key nudges the set point
    /// by one degree, once per press. Nudging only applies while idle.
    ///
    /// Returns true, if the slow tick had elapsed.
    pub fn on_ticks(&mut self, shared: &mut Shared, state: EditState, candidate: i16) -> bool {
        let second_elapsed = shared.ticks.take(Tick::Second);
        if second_elapsed {
            match state.position() {
                None => shared.display.show(displayed_measurement(shared.measured)),
                Some(position) if self.blank_next => shared.display.blank_digit(position),
                Some(_) => shared.display.show(candidate),
            }
            self.blank_next = !self.blank_next;
        }

        if shared.ticks.take(Tick::Subsecond) {
            for (armed, (key, step)) in self.armed.iter_mut().zip(NUDGE_KEYS) {
                let held = shared.keypad.key(key).is_held();

                if held && *armed && state == EditState::Idle {
                    shared.setpoint = (shared.setpoint + step).clamp(SETPOINT_MIN, SETPOINT_MAX);
                    shared.display.show(shared.setpoint);
                }
                *armed = !held;
            }
        }

        second_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::KEY_THRESHOLD;
    use crate::segment::{Position, encode};

    fn hold(shared: &mut Shared, key: Key, samples: u8) {
        for _ in 0..samples {
            shared.keypad.sample(key, true);
        }
    }

    #[test]
    fn shows_measurement_while_idle() {
        let mut shared = Shared {
            measured: 287,
            ..Shared::new()
        };
        let mut controller = BlinkController::new();

        shared.ticks.raise(Tick::Second);
        assert!(controller.on_ticks(&mut shared, EditState::Idle, 0));
        assert_eq!(shared.display.patterns(), &encode(287));
        assert!(!shared.ticks.is_raised(Tick::Second));
    }

    #[test]
    fn clamps_cold_measurement_but_keeps_fault() {
        let mut shared = Shared {
            measured: -20,
            ..Shared::new()
        };
        let mut controller = BlinkController::new();

        shared.ticks.raise(Tick::Second);
        controller.on_ticks(&mut shared, EditState::Idle, 0);
        assert_eq!(shared.display.patterns(), &encode(0));

        shared.measured = FAULT_SENTINEL;
        shared.ticks.raise(Tick::Second);
        controller.on_ticks(&mut shared, EditState::Idle, 0);
        assert_eq!(shared.display.patterns(), &encode(FAULT_SENTINEL));
    }

    #[test]
    fn blinks_edited_digit() {
        let mut shared = Shared::new();
        let mut controller = BlinkController::new();
        let mut blanked = encode(456);
        blanked[Position::Tens as usize] = 0;

        for expected in [encode(456), blanked, encode(456), blanked] {
            shared.ticks.raise(Tick::Second);
            controller.on_ticks(&mut shared, EditState::Tens, 456);
            assert_eq!(shared.display.patterns(), &expected);
        }
    }

    #[test]
    fn no_tick_no_change() {
        let mut shared = Shared {
            measured: 100,
            ..Shared::new()
        };
        let mut controller = BlinkController::new();

        assert!(!controller.on_ticks(&mut shared, EditState::Idle, 0));
        assert_eq!(shared.display.patterns(), &[0, 0, 0]);
    }

    #[test]
    fn held_key_nudges_once_per_press() {
        let mut shared = Shared {
            setpoint: 300,
            ..Shared::new()
        };
        let mut controller = BlinkController::new();

        hold(&mut shared, Key::Plus, KEY_THRESHOLD - 1);
        shared.ticks.raise(Tick::Subsecond);
        controller.on_ticks(&mut shared, EditState::Idle, 0);
        assert_eq!(shared.setpoint, 300);

        for _ in 0..10 {
            hold(&mut shared, Key::Plus, 1);
            shared.ticks.raise(Tick::Subsecond);
            controller.on_ticks(&mut shared, EditState::Idle, 0);
        }
        assert_eq!(shared.setpoint, 301);
        assert_eq!(shared.display.patterns(), &encode(301));

        shared.keypad.sample(Key::Plus, false);
        shared.ticks.raise(Tick::Subsecond);
        controller.on_ticks(&mut shared, EditState::Idle, 0);

        hold(&mut shared, Key::Minus, KEY_THRESHOLD);
        shared.ticks.raise(Tick::Subsecond);
        controller.on_ticks(&mut shared, EditState::Idle, 0);
        assert_eq!(shared.setpoint, 300);
    }

    #[test]
    fn nudge_is_clamped() {
        let mut shared = Shared {
            setpoint: 999,
            ..Shared::new()
        };
        let mut controller = BlinkController::new();

        hold(&mut shared, Key::Plus, KEY_THRESHOLD);
        shared.ticks.raise(Tick::Subsecond);
        controller.on_ticks(&mut shared, EditState::Idle, 0);
        assert_eq!(shared.setpoint, 999);
    }

    #[test]
    fn no_nudge_while_editing() {
        let mut shared = Shared {
            setpoint: 300,
            ..Shared::new()
        };
        let mut controller = BlinkController::new();

        hold(&mut shared, Key::Plus, KEY_THRESHOLD);
        shared.ticks.raise(Tick::Subsecond);
        controller.on_ticks(&mut shared, EditState::Hundreds, 300);
        assert_eq!(shared.setpoint, 300);

        // Still held after editing ended: the press was already spent.
        shared.ticks.raise(Tick::Subsecond);
        controller.on_ticks(&mut shared, EditState::Idle, 0);
        assert_eq!(shared.setpoint, 300);
    }
}
