//! Digit-by-digit editing of the set point.
//!
//! The star key walks through `Idle -> Hundreds -> Tens -> Units -> Idle`. While a digit is
//! selected, plus and minus adjust the candidate by that digit's weight. Leaving the units digit
//! commits the candidate as the new set point.

use crate::Shared;
use crate::keypad::Key;
use crate::segment::Position;

/// Bounds for adjusting one digit of the candidate.
#[derive(Debug, Clone, Copy)]
struct DigitBounds {
    /// The amount to add or subtract.
    weight: i16,
    /// Decrementing stops at this value.
    floor: i16,
    /// Incrementing stops at this value.
    ceiling: i16,
}

impl DigitBounds {
    /// Increment, clamped at the ceiling.
    fn increment(self, value: i16) -> i16 {
        if value < self.ceiling {
            (value + self.weight).min(self.ceiling)
        } else {
            value
        }
    }

    /// Decrement, clamped at the floor.
    fn decrement(self, value: i16) -> i16 {
        if value > self.floor {
            (value - self.weight).max(self.floor)
        } else {
            value
        }
    }
}

/// The state of the set point editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditState {
    /// Not editing.
    #[default]
    Idle,
    /// Editing the hundreds digit.
    Hundreds,
    /// Editing the tens digit.
    Tens,
    /// Editing the units digit.
    Units,
}

impl EditState {
    /// The digit that is being edited.
    pub fn position(self) -> Option<Position> {
        match self {
            EditState::Idle => None,
            EditState::Hundreds => Some(Position::Hundreds),
            EditState::Tens => Some(Position::Tens),
            EditState::Units => Some(Position::Units),
        }
    }

    /// Adjustment bounds of the edited digit.
    fn bounds(self) -> Option<DigitBounds> {
        let (weight, floor, ceiling) = match self {
            EditState::Idle => return None,
            EditState::Hundreds => (100, 100, 900),
            EditState::Tens => (10, 10, 990),
            EditState::Units => (1, 1, 999),
        };

        Some(DigitBounds {
            weight,
            floor,
            ceiling,
        })
    }
}

/// The set point editor.
#[derive(Debug, Default)]
pub struct SetpointEditor {
    /// The current state.
    state: EditState,
    /// The value that is being edited.
    candidate: i16,
}

impl SetpointEditor {
    /// An idle editor.
    pub const fn new() -> Self {
        Self {
            state: EditState::Idle,
            candidate: 0,
        }
    }

    /// The current state.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// The value that is being edited.
    pub fn candidate(&self) -> i16 {
        self.candidate
    }

    /// Advance with key presses that were not consumed yet.
    ///
    /// At most one press is consumed per call. Returns the new set point when it was committed.
    pub fn step(&mut self, shared: &mut Shared) -> Option<i16> {
        let Some(bounds) = self.state.bounds() else {
            if shared.keypad.take_press(Key::Star) {
                self.candidate = shared.setpoint;
                self.state = EditState::Hundreds;
                shared.display.show(self.candidate);
            }
            return None;
        };

        if shared.keypad.take_press(Key::Plus) {
            self.candidate = bounds.increment(self.candidate);
            shared.display.show(self.candidate);
        } else if shared.keypad.take_press(Key::Minus) {
            self.candidate = bounds.decrement(self.candidate);
            shared.display.show(self.candidate);
        } else if shared.keypad.take_press(Key::Star) {
            match self.state {
                EditState::Hundreds => self.state = EditState::Tens,
                EditState::Tens => self.state = EditState::Units,
                EditState::Idle | EditState::Units => {
                    shared.setpoint = self.candidate;
                    self.state = EditState::Idle;
                    return Some(self.candidate);
                }
            }
            shared.display.show(self.candidate);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::encode;

    /// Press and release a key, with one editor step in between.
    fn press(editor: &mut SetpointEditor, shared: &mut Shared, key: Key) -> Option<i16> {
        shared.keypad.sample(key, true);
        let commit = editor.step(shared);
        shared.keypad.sample(key, false);
        commit
    }

    fn editing(setpoint: i16, state: EditState) -> (SetpointEditor, Shared) {
        let mut shared = Shared {
            setpoint,
            ..Shared::new()
        };
        let mut editor = SetpointEditor::new();

        press(&mut editor, &mut shared, Key::Star);
        while editor.state() != state {
            press(&mut editor, &mut shared, Key::Star);
        }

        (editor, shared)
    }

    #[test]
    fn round_trip_commits_unchanged_set_point_once() {
        let mut shared = Shared {
            setpoint: 345,
            ..Shared::new()
        };
        let mut editor = SetpointEditor::new();
        let mut commits = Vec::new();

        for expected in [EditState::Hundreds, EditState::Tens, EditState::Units, EditState::Idle] {
            if let Some(value) = press(&mut editor, &mut shared, Key::Star) {
                commits.push(value);
            }
            assert_eq!(editor.state(), expected);
        }

        assert_eq!(commits, [345]);
        assert_eq!(shared.setpoint, 345);
    }

    #[test]
    fn entering_seeds_candidate_and_shows_it() {
        let (editor, shared) = editing(275, EditState::Hundreds);

        assert_eq!(editor.candidate(), 275);
        assert_eq!(shared.display.patterns(), &encode(275));
    }

    #[test]
    fn hundreds_clamp() {
        for (start, expected) in [(100, 200), (450, 550), (850, 900), (900, 900), (950, 950)] {
            let (mut editor, mut shared) = editing(start, EditState::Hundreds);
            press(&mut editor, &mut shared, Key::Plus);
            assert_eq!(editor.candidate(), expected, "increment from {start}");
        }

        for (start, expected) in [(999, 899), (150, 100), (100, 100), (50, 50)] {
            let (mut editor, mut shared) = editing(start, EditState::Hundreds);
            press(&mut editor, &mut shared, Key::Minus);
            assert_eq!(editor.candidate(), expected, "decrement from {start}");
        }
    }

    #[test]
    fn tens_clamp() {
        for (start, expected) in [(300, 310), (985, 990), (990, 990), (995, 995)] {
            let (mut editor, mut shared) = editing(start, EditState::Tens);
            press(&mut editor, &mut shared, Key::Plus);
            assert_eq!(editor.candidate(), expected, "increment from {start}");
        }

        for (start, expected) in [(300, 290), (15, 10), (10, 10), (5, 5)] {
            let (mut editor, mut shared) = editing(start, EditState::Tens);
            press(&mut editor, &mut shared, Key::Minus);
            assert_eq!(editor.candidate(), expected, "decrement from {start}");
        }
    }

    #[test]
    fn units_clamp() {
        let (mut editor, mut shared) = editing(998, EditState::Units);
        press(&mut editor, &mut shared, Key::Plus);
        press(&mut editor, &mut shared, Key::Plus);
        assert_eq!(editor.candidate(), 999);

        let (mut editor, mut shared) = editing(2, EditState::Units);
        press(&mut editor, &mut shared, Key::Minus);
        press(&mut editor, &mut shared, Key::Minus);
        assert_eq!(editor.candidate(), 1);
    }

    #[test]
    fn commits_edited_value() {
        let (mut editor, mut shared) = editing(300, EditState::Hundreds);
        press(&mut editor, &mut shared, Key::Plus);
        press(&mut editor, &mut shared, Key::Star);
        press(&mut editor, &mut shared, Key::Minus);
        press(&mut editor, &mut shared, Key::Star);
        press(&mut editor, &mut shared, Key::Plus);
        assert_eq!(shared.setpoint, 300);

        assert_eq!(press(&mut editor, &mut shared, Key::Star), Some(391));
        assert_eq!(shared.setpoint, 391);
        assert_eq!(editor.state(), EditState::Idle);
    }

    #[test]
    fn held_key_acts_once() {
        let (mut editor, mut shared) = editing(300, EditState::Hundreds);

        for _ in 0..100 {
            shared.keypad.sample(Key::Plus, true);
            editor.step(&mut shared);
        }

        assert_eq!(editor.candidate(), 400);
    }

    #[test]
    fn plus_and_minus_ignored_while_idle() {
        let mut shared = Shared {
            setpoint: 300,
            ..Shared::new()
        };
        let mut editor = SetpointEditor::new();

        press(&mut editor, &mut shared, Key::Plus);
        press(&mut editor, &mut shared, Key::Minus);

        assert_eq!(editor.state(), EditState::Idle);
        assert_eq!(shared.setpoint, 300);
    }
}
