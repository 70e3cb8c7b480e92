//! One iteration of the cooperative panel loop.

use crate::Shared;
use crate::blink::BlinkController;
use crate::editor::{EditState, SetpointEditor};

/// What happened during a panel iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelEvents {
    /// The slow tick had elapsed.
    pub second_elapsed: bool,
    /// A new set point was committed and must be stored.
    pub commit: Option<i16>,
}

/// The display and blink controller, together with the set point editor.
#[derive(Debug, Default)]
pub struct Panel {
    /// Consumes tick flags.
    blink: BlinkController,
    /// Consumes key presses.
    editor: SetpointEditor,
}

impl Panel {
    /// An idle panel.
    pub const fn new() -> Self {
        Self {
            blink: BlinkController::new(),
            editor: SetpointEditor::new(),
        }
    }

    /// The editor state.
    pub fn edit_state(&self) -> EditState {
        self.editor.state()
    }

    /// Drain the tick flags, then advance the editor with pending key presses.
    pub fn poll(&mut self, shared: &mut Shared) -> PanelEvents {
        let second_elapsed = self
            .blink
            .on_ticks(shared, self.editor.state(), self.editor.candidate());
        let commit = self.editor.step(shared);

        PanelEvents {
            second_elapsed,
            commit,
        }
    }
}
