//! The slow tick, which paces the display refresh and the digit blinking.

use embassy_time::{Duration, Ticker};
use tcsd_core::ticks::{SLOW_TICK_HZ, on_slow_tick};

use crate::{PANEL_WAKE_SIG, SHARED_MUTEX};

/// Raises the slow tick flag.
#[embassy_executor::task]
pub async fn slow_tick_task() {
    let mut ticker = Ticker::every(Duration::from_hz(SLOW_TICK_HZ));

    loop {
        ticker.next().await;
        SHARED_MUTEX.lock(|x| on_slow_tick(&mut x.borrow_mut()));
        PANEL_WAKE_SIG.signal(());
    }
}
