//! The front panel: display, keypad and set point editing.
pub mod display;

use defmt::debug;
use tcsd_core::panel::Panel;

use crate::{PANEL_WAKE_SIG, SHARED_MUTEX, STORE_SETPOINT_SIG};

/// Refreshes the display and runs the set point editor, whenever ticks or keys changed.
#[embassy_executor::task]
pub async fn panel_task() {
    let mut panel = Panel::new();
    let mut edit_state = panel.edit_state();

    loop {
        PANEL_WAKE_SIG.wait().await;

        let (events, raw_sample) = SHARED_MUTEX.lock(|x| {
            let mut shared = x.borrow_mut();
            let events = panel.poll(&mut shared);
            (events, shared.raw_sample)
        });

        if cfg!(feature = "diagnostics") && events.second_elapsed {
            debug!("Raw tip sample: {}", raw_sample);
        }

        if panel.edit_state() != edit_state {
            edit_state = panel.edit_state();
            debug!("Set point editor: {}", edit_state);
        }

        if let Some(setpoint) = events.commit {
            debug!("Committed set point {} °C", setpoint);
            STORE_SETPOINT_SIG.signal(setpoint);
        }
    }
}
