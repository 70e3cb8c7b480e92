//! Drives the heating element, based on set point and tip temperature.

pub mod sensors;

use defmt::{info, warn};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Output;
use sensors::TipSensor;
use tcsd_core::heater::{self, Regulation};

use crate::SHARED_MUTEX;

/// Resources for measuring the tip and driving the heater.
pub struct HeaterResources {
    /// Resources for measuring the tip temperature.
    pub sensor: TipSensor,
    /// Zero-crossing detector output, one falling edge per mains half-cycle.
    pub exti_zero_crossing: ExtiInput<'static>,
    /// Switches the heater (via a zero-crossing solid state relay).
    pub pin_heater: Output<'static>,
}

/// Control the heating element.
///
/// On every mains zero-crossing, measures the tip and switches the heater fully on or off.
#[embassy_executor::task]
pub async fn heater_task(mut resources: HeaterResources) {
    resources.pin_heater.set_low();
    let mut previous: Option<Regulation> = None;

    loop {
        resources.exti_zero_crossing.wait_for_falling_edge().await;

        let sample = resources.sensor.measure().await;
        let regulation = SHARED_MUTEX.lock(|x| heater::regulate(&mut x.borrow_mut(), sample));

        if regulation.heater_on() {
            resources.pin_heater.set_high();
        } else {
            resources.pin_heater.set_low();
        }

        match (previous, regulation) {
            (Some(Regulation::Fault(last)), Regulation::Fault(fault)) if last == fault => {}
            (_, Regulation::Fault(fault)) => warn!("Heater off, sensor fault: {}", fault),
            (Some(Regulation::Fault(_)), _) => info!("Sensor recovered"),
            _ => {}
        }
        previous = Some(regulation);
    }
}
